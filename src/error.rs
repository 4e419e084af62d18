use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::book::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns an empty response with [`StatusCode::NO_CONTENT`] for all errors.
    None,
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_message(&self) -> bool {
        matches!(
            self,
            ErrorVerbosity::Message | ErrorVerbosity::Type | ErrorVerbosity::Full
        )
    }

    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

pub trait ErrorVerbosityProvider {
    fn error_verbosity(&self) -> ErrorVerbosity;
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiErrorMessage {
    message: &'static str,
}

impl From<ApiErrorResponse> for ApiErrorMessage {
    fn from(response: ApiErrorResponse) -> Self {
        ApiErrorMessage {
            message: response.message,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => {
                (status_code, Json(ApiErrorMessage::from(self))).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, Json(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Body error
    ///
    /// This error is returned when the body is not JSON.
    Body(BodyError),
    /// Payload error
    ///
    /// This error is returned when the body is JSON but does not have the expected shape.
    Payload(PayloadError),
    /// Path error
    ///
    /// This error is returned when the path is not as expected.
    Path(PathError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested resource is not found.
    NotFound(NotFoundError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Body(err) => err.verbosity,
            ApiError::Payload(err) => err.verbosity,
            ApiError::Path(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Body(_) => "Failed to parse request body",
            ApiError::Payload(_) => "Request body failed validation",
            ApiError::Path(_) => "Failed to parse path parameters",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(err) => err.status_code(),
            ApiError::Body(err) => err.status_code(),
            ApiError::Payload(err) => err.status_code(),
            ApiError::Path(err) => err.status_code(),
            ApiError::MethodNotAllowed(err) => err.status_code(),
            ApiError::NotFound(err) => err.status_code(),
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = match error.verbosity().should_generate_message() {
            true => error.message(),
            false => "",
        };

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Debug, Serialize)]
pub struct BodyError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(skip)]
    status_code: StatusCode,
    body_error_reason: Option<String>,
}

impl BodyError {
    pub fn from_json_rejection(verbosity: ErrorVerbosity, rejection: JsonRejection) -> Self {
        let body_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| rejection.body_text());

        BodyError {
            verbosity,
            status_code: rejection.status(),
            body_error_reason,
        }
    }

    fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

#[derive(Debug, Serialize)]
pub struct PayloadFieldError {
    field: &'static str,
    reason: String,
}

#[derive(Debug, Serialize)]
pub struct PayloadError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    payload_error_reason: Option<String>,
    payload_error_fields: Option<Vec<PayloadFieldError>>,
    payload_expected_schema: Option<String>,
}

impl PayloadError {
    pub fn new(
        verbosity: ErrorVerbosity,
        error: &ValidationError,
        payload_expected_schema: String,
    ) -> Self {
        if !verbosity.should_generate_error_reason() {
            return PayloadError {
                verbosity,
                payload_error_reason: None,
                payload_error_fields: None,
                payload_expected_schema: None,
            };
        }

        let payload_error_fields = error
            .fields()
            .iter()
            .map(|field_error| PayloadFieldError {
                field: field_error.field,
                reason: field_error.kind.to_string(),
            })
            .collect();

        PayloadError {
            verbosity,
            payload_error_reason: Some(error.to_string()),
            payload_error_fields: Some(payload_error_fields),
            payload_expected_schema: Some(payload_expected_schema),
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

#[derive(Debug, Serialize)]
pub struct PathError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    path_error_reason: Option<String>,
}

impl PathError {
    pub fn from_path_rejection(verbosity: ErrorVerbosity, rejection: PathRejection) -> Self {
        let path_error_reason = verbosity
            .should_generate_error_reason()
            .then(|| rejection.body_text());

        PathError {
            verbosity,
            path_error_reason,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

/// Describes an error that is specific to a resource, e.g. a book that does not exist.
pub trait ResourceErrorProvider {
    type Context;

    fn status_code(&self) -> StatusCode;

    fn message(&self) -> &'static str;

    fn context(&self) -> Self::Context;
}

#[derive(Debug, Serialize)]
pub struct ResourceError<T, C> {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    #[serde(flatten)]
    error_type: T,
    error: Option<C>,
    message: &'static str,
}

impl<T, C> ResourceError<T, C>
where
    T: ResourceErrorProvider<Context = C>,
{
    pub fn new(verbosity: ErrorVerbosity, error_type: T) -> Self {
        let error = verbosity
            .should_generate_error_reason()
            .then(|| error_type.context());

        let message = match verbosity.should_generate_message() {
            true => error_type.message(),
            false => "",
        };

        ResourceError {
            verbosity,
            error_type,
            error,
            message,
        }
    }
}

impl<T, C> IntoResponse for ResourceError<T, C>
where
    T: ResourceErrorProvider<Context = C> + Serialize,
    C: Serialize,
{
    fn into_response(self) -> Response {
        let status_code = self.error_type.status_code();

        match self.verbosity {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => (
                status_code,
                Json(ApiErrorMessage {
                    message: self.message,
                }),
            )
                .into_response(),
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, Json(self)).into_response()
            }
        }
    }
}
