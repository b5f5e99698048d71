//! HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::RepositoryError,
    infrastructure::dto::http::{ErrorResponseDto, MessageDto},
    usecase::{ErrorKind, GetRoomMessagesError, RegisterUserError, SendMessageError},
};

/// Error returned by HTTP handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponseDto,
}

impl ApiError {
    fn new(kind: ErrorKind, detail: String) -> Self {
        Self {
            status: status_for(kind),
            body: ErrorResponseDto {
                error: kind_label(kind).to_string(),
                detail,
                message: None,
            },
        }
    }

    fn from_store(error: &RepositoryError) -> Self {
        let mut api_error = Self::new(ErrorKind::Store, error.to_string());
        if matches!(error, RepositoryError::Timeout(_)) {
            api_error.status = StatusCode::GATEWAY_TIMEOUT;
        }
        api_error
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Store | ErrorKind::PartialFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::BadRequest => "bad_request",
        ErrorKind::NotFound => "not_found",
        ErrorKind::Validation => "validation_error",
        ErrorKind::Conflict => "conflict",
        ErrorKind::Store => "store_error",
        ErrorKind::PartialFailure => "partial_failure",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match &error {
            SendMessageError::Store(source) => Self::from_store(source),
            SendMessageError::PartialFailure { message, .. } => {
                let mut api_error = Self::new(error.kind(), error.to_string());
                api_error.body.message = Some(MessageDto::from(message.as_ref()));
                api_error
            }
            _ => Self::new(error.kind(), error.to_string()),
        }
    }
}

impl From<GetRoomMessagesError> for ApiError {
    fn from(error: GetRoomMessagesError) -> Self {
        match &error {
            GetRoomMessagesError::Store(source) => Self::from_store(source),
            _ => Self::new(error.kind(), error.to_string()),
        }
    }
}

impl From<RegisterUserError> for ApiError {
    fn from(error: RegisterUserError) -> Self {
        match &error {
            RegisterUserError::Store(source) => Self::from_store(source),
            _ => Self::new(error.kind(), error.to_string()),
        }
    }
}

/// Unreadable bodies (wrong content type, malformed or mistyped JSON) are
/// reported as bad requests with the usual error body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        Self::new(ErrorKind::BadRequest, rejection.body_text())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        Self::from_store(&error)
    }
}
