#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Server error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a non-2xx response. The backend is not ours, so this goes by
    /// status code, taking the human-readable message from the `error` field
    /// the backend puts in its JSON bodies when it has one.
    pub fn parse(status: http::StatusCode, body: &[u8]) -> Error {
        use http::StatusCode;
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|data| {
                data.get("error")
                    .and_then(|e| e.as_str())
                    .map(String::from)
            });
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::PermissionDenied,
            StatusCode::NOT_FOUND => Error::NotFound,
            s if s.is_client_error() => {
                Error::InvalidRequest(message.unwrap_or_else(|| String::from("bad request")))
            }
            _ => Error::Internal(message.unwrap_or_else(|| String::from("internal server error"))),
        }
    }
}
