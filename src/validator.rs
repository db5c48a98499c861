use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use registrar_core::{AppError, FieldError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// JSON body extractor that also runs `validator` rules.
///
/// The body is parsed in two steps. Malformed JSON is a plain 400, while a
/// well-formed document that does not fit `T` is reported against the
/// offending field in the same `errors` shape as rule violations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        let value = decode::<T>(body)?;
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow::anyhow!(
            "Missing 'Content-Type: application/json' header"
        )),
        _ => invalid_body(),
    }
}

fn invalid_body() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Invalid request body"))
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_path_to_error::deserialize(body).map_err(data_error)
}

fn data_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let path = err.path().to_string();
    let at_root = path == ".";
    let inner = err.into_inner().to_string();

    if let Some(name) = missing_field(&inner) {
        let field = if at_root {
            name.to_string()
        } else {
            format!("{path}.{name}")
        };
        let message = format!("{field} is required");
        return AppError::validation(vec![FieldError::new(field, message)]);
    }

    if at_root {
        return invalid_body();
    }

    let message = format!("{path} is invalid");
    AppError::validation(vec![FieldError::new(path, message)])
}

/// Field name carried by serde's `missing_field` error.
fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Enrollment {
        first_name: String,
        #[allow(dead_code)]
        enrollment_date: NaiveDate,
        #[serde(default)]
        #[allow(dead_code)]
        contact: Option<Contact>,
    }

    #[derive(Debug, Deserialize)]
    struct Contact {
        #[allow(dead_code)]
        phone: String,
    }

    fn field_errors(err: AppError) -> Vec<(String, String)> {
        assert_eq!(err.status.as_u16(), 400);
        err.details
            .into_iter()
            .map(|d| (d.field, d.message))
            .collect()
    }

    #[test]
    fn test_missing_field_is_reported_by_name() {
        let err = decode::<Enrollment>(json!({ "enrollmentDate": "2024-01-15" })).unwrap_err();
        assert_eq!(
            field_errors(err),
            vec![("firstName".to_string(), "firstName is required".to_string())]
        );
    }

    #[test]
    fn test_wrong_type_is_reported_by_path() {
        let err = decode::<Enrollment>(json!({
            "firstName": "Ada",
            "enrollmentDate": "not-a-date"
        }))
        .unwrap_err();
        assert_eq!(
            field_errors(err),
            vec![("enrollmentDate".to_string(), "enrollmentDate is invalid".to_string())]
        );
    }

    #[test]
    fn test_nested_fields_keep_their_path() {
        let err = decode::<Enrollment>(json!({
            "firstName": "Ada",
            "enrollmentDate": "2024-01-15",
            "contact": {}
        }))
        .unwrap_err();
        assert_eq!(field_errors(err)[0].0, "contact.phone");

        let err = decode::<Enrollment>(json!({
            "firstName": "Ada",
            "enrollmentDate": "2024-01-15",
            "contact": { "phone": 5 }
        }))
        .unwrap_err();
        assert_eq!(field_errors(err)[0].0, "contact.phone");
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        let err = decode::<Enrollment>(json!(["Ada"])).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert!(err.details.is_empty());
        assert_eq!(err.public_message(), "Invalid request body");
    }

    #[test]
    fn test_valid_body_decodes() {
        let value = decode::<Enrollment>(json!({
            "firstName": "Ada",
            "enrollmentDate": "2024-01-15"
        }))
        .unwrap();
        assert_eq!(value.first_name, "Ada");
    }
}
