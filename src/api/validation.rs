use actix_web::HttpResponse;

use crate::api::error::ErrorResponse;

/// Global JsonConfig translating body deserialization and validator
/// failures into the project-wide ErrorResponse shape
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default().error_handler(|err, _req| {
        let mut fields = serde_json::Map::new();

        let error = match err {
            actix_web_validator::Error::Validate(validation_errors) => {
                for (field, errors) in validation_errors.field_errors() {
                    let messages: Vec<String> = errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("Validation error in field: {}", field))
                        })
                        .collect();
                    fields.insert(field.to_string(), serde_json::json!({ "errors": messages }));
                }
                "Validation failed"
            }
            actix_web_validator::Error::Deserialize(de_err) => {
                let message = if de_err.to_string().contains("EOF while parsing") {
                    "Request body is empty. Expected JSON payload"
                } else {
                    "Invalid JSON format"
                };
                fields.insert("message".to_string(), serde_json::json!(message));
                "Request validation failed"
            }
            _ => {
                fields.insert("message".to_string(), serde_json::json!("Validation error"));
                "Validation failed"
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            fields: serde_json::Value::Object(fields),
        };
        actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(body))
            .into()
    })
}
