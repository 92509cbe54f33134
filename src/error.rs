use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http status {status}: {text}")]
    Status { status: u16, text: String },

    #[error("invalid response: {message}")]
    InvalidResponse { message: String, body: String },
}

impl AuthError {
    pub fn status_text(&self) -> Option<&str> {
        match self {
            AuthError::Status { text, .. } => Some(text),
            _ => None,
        }
    }
}
