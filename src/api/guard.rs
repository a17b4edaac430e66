use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::Next;

use crate::api::error::ApiError;
use crate::auth::AuthUser;

pub const READ_ONLY_MESSAGE: &str = "Demo account is in read-only mode";

/// Reject mutations from the restricted demo account
///
/// Wrapped around the jobs scope; only mutating methods consult the
/// caller's flag, reads pass through untouched. Runs after identity
/// resolution and never reaches storage.
pub async fn read_only_guard(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if is_mutating(req.method()) {
        let user = req.extract::<AuthUser>().await?;
        if user.test_user {
            return Err(ApiError::BadRequest(READ_ONLY_MESSAGE.into()).into());
        }
    }
    next.call(req).await
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PATCH | Method::DELETE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthKeys, Claims};
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::Duration;

    fn keys() -> web::Data<AuthKeys> {
        web::Data::new(AuthKeys::from_secret("test-secret"))
    }

    fn token(keys: &AuthKeys, test_user: bool) -> String {
        keys.issue(&Claims::new(1, test_user, Duration::hours(1)))
            .unwrap()
    }

    macro_rules! guarded_app {
        ($keys:expr) => {
            test::init_service(
                App::new().app_data($keys).service(
                    web::scope("/jobs").wrap(from_fn(read_only_guard)).service(
                        web::resource("")
                            .route(web::get().to(HttpResponse::Ok))
                            .route(web::post().to(HttpResponse::Created))
                            .route(web::delete().to(HttpResponse::Ok)),
                    ),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn demo_account_mutation_fails_with_fixed_message() {
        let keys = keys();
        let demo = token(&keys, true);
        let app = guarded_app!(keys);

        let req = test::TestRequest::post()
            .uri("/jobs")
            .insert_header((AUTHORIZATION, format!("Bearer {}", demo)))
            .to_request();
        // The guard errors before dispatch, so the raw app service yields
        // Err; the HTTP layer is what renders it into a response.
        let err = test::try_call_service(&app, req).await.unwrap_err();
        let resp = err.error_response();
        assert_eq!(resp.status(), 400);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["fields"]["message"], READ_ONLY_MESSAGE);
    }

    #[actix_web::test]
    async fn demo_account_reads_pass_through() {
        let keys = keys();
        let demo = token(&keys, true);
        let app = guarded_app!(keys);

        let req = test::TestRequest::get()
            .uri("/jobs")
            .insert_header((AUTHORIZATION, format!("Bearer {}", demo)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn regular_account_mutations_pass_through() {
        let keys = keys();
        let regular = token(&keys, false);
        let app = guarded_app!(keys.clone());

        let req = test::TestRequest::post()
            .uri("/jobs")
            .insert_header((AUTHORIZATION, format!("Bearer {}", regular)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::delete()
            .uri("/jobs")
            .insert_header((AUTHORIZATION, format!("Bearer {}", regular)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn anonymous_mutation_is_unauthorized() {
        let app = guarded_app!(keys());
        let req = test::TestRequest::post().uri("/jobs").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 401);
    }

    // `test` above shadows the built-in #[test] attribute
    #[actix_web::test]
    async fn only_mutating_methods_are_checked() {
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::PATCH));
        assert!(is_mutating(&Method::DELETE));
        assert!(!is_mutating(&Method::GET));
    }
}
