use actix_web::{
    HttpResponse,
    middleware::from_fn,
    web::{self, Data, Path, Query, ServiceConfig, resource, scope},
};
use actix_web_validator::Json as ValidatedJson;

use super::models::{CreateJob, ListQuery, UpdateJob};
use super::service::JobService;
use crate::api::error::ApiError;
use crate::api::guard::read_only_guard;
use crate::auth::AuthUser;

async fn list_jobs(
    service: Data<JobService>,
    user: AuthUser,
    query: Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let body = service.list_jobs(&user, &query).await?;
    Ok(HttpResponse::Ok().json(body))
}

async fn get_job(
    service: Data<JobService>,
    user: AuthUser,
    path: Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let body = service.get_job(&user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(body))
}

async fn create_job(
    service: Data<JobService>,
    user: AuthUser,
    job: ValidatedJson<CreateJob>,
) -> Result<HttpResponse, ApiError> {
    let body = service.create_job(&user, &job).await?;
    Ok(HttpResponse::Created().json(body))
}

async fn update_job(
    service: Data<JobService>,
    user: AuthUser,
    path: Path<i32>,
    changes: ValidatedJson<UpdateJob>,
) -> Result<HttpResponse, ApiError> {
    let body = service
        .update_job(&user, path.into_inner(), &changes)
        .await?;
    Ok(HttpResponse::Ok().json(body))
}

async fn delete_job(
    service: Data<JobService>,
    user: AuthUser,
    path: Path<i32>,
) -> Result<HttpResponse, ApiError> {
    service.delete_job(&user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

async fn show_stats(service: Data<JobService>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    let body = service.show_stats(&user).await?;
    Ok(HttpResponse::Ok().json(body))
}

/// Mount the jobs API under /api/v1/jobs
///
/// The read-only guard wraps the whole scope; it only enforces on
/// mutating methods, so list/get/stats stay open to the demo account.
/// `/stats` must register before `/{id}`.
pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/api/v1/jobs")
            .wrap(from_fn(read_only_guard))
            .service(resource("/stats").route(web::get().to(show_stats)))
            .service(
                resource("")
                    .route(web::get().to(list_jobs))
                    .route(web::post().to(create_job)),
            )
            .service(
                resource("/{id}")
                    .route(web::get().to(get_job))
                    .route(web::patch().to(update_job))
                    .route(web::delete().to(delete_job)),
            ),
    );
}
