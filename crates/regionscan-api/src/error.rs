use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regionscan_core::RegionscanError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<RegionscanError> for ApiError {
    fn from(err: RegionscanError) -> Self {
        let details = err.to_string();
        match &err {
            e if e.is_not_found() => Self::not_found("Region not found"),
            RegionscanError::AmbiguousLocode { .. } => Self::conflict("Ambiguous locode"),
            RegionscanError::InvalidRegionCode { .. }
            | RegionscanError::InvalidPadding { .. }
            | RegionscanError::InvalidBoundingBox { .. }
            | RegionscanError::InvalidQuery { .. } => Self::unprocessable("Invalid request"),
            RegionscanError::GeometryParse { .. } | RegionscanError::EmptyGeometry => {
                Self::unprocessable("Invalid boundary geometry")
            }
            RegionscanError::StoreUnavailable { .. } => {
                tracing::error!(error = %err, "Asset store unavailable");
                Self::unavailable("Asset store unavailable")
            }
            _ => {
                tracing::error!(error = %err, "Request failed");
                Self::internal("Internal error")
            }
        }
        .with_details(details)
    }
}
