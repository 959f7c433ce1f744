use actix_web::error::ResponseError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use db_infra::DbInfraError;
use thiserror::Error;
use tracing::error;

/// Body of the response when the database cannot be reached.
/// This is the whole response; no page is rendered after it.
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection failed. Please try again later.";

/// Body of any other failed response
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Errors that end a request.
///
/// `Display` carries operator detail and is only ever logged; the response
/// body is always one of the fixed messages above.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database connection failed: {source}")]
    ConnectionFailure {
        #[source]
        source: DbInfraError,
    },
    #[error("Render error: {detail}")]
    Render { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Stable code for log correlation
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConnectionFailure { .. } => "DB_CONNECTION_FAILED",
            AppError::Render { .. } => "RENDER_FAILED",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ConnectionFailure { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The only text an end user ever sees for this error
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::ConnectionFailure { .. } => CONNECTION_FAILED_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    pub fn connection_failure(source: DbInfraError) -> Self {
        Self::ConnectionFailure { source }
    }

    pub fn render(detail: String) -> Self {
        Self::Render { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<DbInfraError> for AppError {
    fn from(e: DbInfraError) -> Self {
        match e {
            DbInfraError::Config { message } => AppError::config(message),
            e @ DbInfraError::Connect { .. } => AppError::connection_failure(e),
            e @ DbInfraError::Close { .. } => AppError::internal(e.to_string()),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::render(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        // Detail goes to operators only
        error!(code = self.code(), status = status.as_u16(), detail = %self, "request_failed");

        HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(self.public_message())
    }
}
