use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    URLParseError(#[from] url::ParseError),

    #[error(transparent)]
    SerdeJSONError(#[from] serde_json::Error),

    #[error(transparent)]
    Base64DecodeError(#[from] base64::DecodeError),

    #[error(transparent)]
    UTF8Error(#[from] std::string::FromUtf8Error),

    #[error("jwt decode error")]
    JWTDecodeError,

    #[error("the backend rejected the credentials")]
    Unauthorized,

    #[error("user may not perform that action")]
    Forbidden,

    #[error("the resource could not be found")]
    NotFound,

    #[error("the request was rejected")]
    Rejected(Option<String>),

    #[error("the backend answered with status {0}")]
    Server(u16),
}

impl Error {
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 409 | 422 => Self::Rejected(message),
            _ => Self::Server(status),
        }
    }
}
