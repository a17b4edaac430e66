pub mod error;
pub mod guard;
pub mod health;
pub mod job;
pub mod validation;
