use crate::domain::auth::{
    ServiceAuthenticatedError, ServiceLoginError, ServiceLogoutError, ServiceProfileError,
};
use crate::domain::inbox::InboxError;
use crate::domain::session::SessionError;
use crate::domain::team::TeamError;
use crate::domain::workspace::WorkspaceError;
use crate::outbound::rest::error::Error as BackendError;
use thiserror::Error;

/// What the user gets to see when a command fails.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("auth required")]
    Unauthorized(Option<String>),

    #[error("user may not perform that action")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("bad request")]
    BadRequest(Option<String>),

    #[error("request was rejected")]
    Rejected(Option<String>),

    #[error("backend unavailable")]
    Unavailable,

    #[error("internal error")]
    Internal,
}

impl AppError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "Not signed in",
            Self::Forbidden => "Not allowed",
            Self::NotFound => "Not found",
            Self::BadRequest(_) => "Invalid input",
            Self::Rejected(_) => "Request rejected",
            Self::Unavailable => "Server unreachable",
            Self::Internal => "Something went wrong",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::BadRequest(message) | Self::Rejected(message) => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Process exit status, following the BSD `sysexits` numbering.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BadRequest(_) | Self::Rejected(_) => 65,
            Self::NotFound => 66,
            Self::Unavailable => 69,
            Self::Internal => 70,
            Self::Unauthorized(_) | Self::Forbidden => 77,
        }
    }
}

pub fn internal_error<E: ToString>(err: E) -> AppError {
    tracing::error!("{}", err.to_string());
    AppError::Internal
}

pub fn bad_request(message: impl Into<String>) -> AppError {
    AppError::BadRequest(Some(message.into()))
}

pub fn not_logged_in() -> AppError {
    AppError::Unauthorized(Some("run `taskdeck login` first".to_string()))
}

fn session_error(err: SessionError) -> AppError {
    match err {
        SessionError::ReadSessionError => {
            AppError::Unauthorized(Some("the stored session is unreadable, log in again".into()))
        }
        other => internal_error(other),
    }
}

impl From<BackendError> for AppError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unauthorized => not_logged_in(),
            BackendError::Forbidden => AppError::Forbidden,
            BackendError::NotFound => AppError::NotFound,
            BackendError::Rejected(message) => AppError::Rejected(message),
            BackendError::Server(status) if status >= 500 => {
                tracing::warn!(status, "backend failure");
                AppError::Unavailable
            }
            BackendError::ReqwestError(err) if err.is_connect() || err.is_timeout() => {
                tracing::warn!("backend unreachable: {err}");
                AppError::Unavailable
            }
            other => internal_error(other),
        }
    }
}

impl From<ServiceLoginError> for AppError {
    fn from(value: ServiceLoginError) -> Self {
        match value {
            ServiceLoginError::InvalidCredentials => {
                AppError::Unauthorized(Some("invalid email or password".to_string()))
            }
            ServiceLoginError::SessionError(err) => internal_error(err),
            ServiceLoginError::BackendError(err) => err.into(),
        }
    }
}

impl From<ServiceLogoutError> for AppError {
    fn from(value: ServiceLogoutError) -> Self {
        match value {
            ServiceLogoutError::SessionError(err) => internal_error(err),
        }
    }
}

impl From<ServiceAuthenticatedError> for AppError {
    fn from(value: ServiceAuthenticatedError) -> Self {
        match value {
            ServiceAuthenticatedError::SessionError(err) => session_error(err),
            ServiceAuthenticatedError::RefreshError(BackendError::Unauthorized) => not_logged_in(),
            ServiceAuthenticatedError::RefreshError(err) => err.into(),
        }
    }
}

impl From<ServiceProfileError> for AppError {
    fn from(value: ServiceProfileError) -> Self {
        match value {
            ServiceProfileError::Unauthenticated => not_logged_in(),
            ServiceProfileError::SessionError(err) => session_error(err),
            ServiceProfileError::BackendError(err) => err.into(),
        }
    }
}

impl From<WorkspaceError> for AppError {
    fn from(value: WorkspaceError) -> Self {
        match value {
            WorkspaceError::Unauthenticated => not_logged_in(),
            WorkspaceError::ValidationError(err) => bad_request(err.to_string()),
            WorkspaceError::KanbanError(err) => bad_request(err.to_string()),
            WorkspaceError::CalendarError(err) => bad_request(err.to_string()),
            WorkspaceError::SessionError(err) => session_error(err),
            WorkspaceError::BackendError(err) => err.into(),
        }
    }
}

impl From<TeamError> for AppError {
    fn from(value: TeamError) -> Self {
        match value {
            TeamError::Unauthenticated => not_logged_in(),
            TeamError::AlreadyMember(_) | TeamError::AlreadyInvited(_) => {
                AppError::Rejected(Some(value.to_string()))
            }
            TeamError::InvitationClosed => AppError::Rejected(Some(value.to_string())),
            TeamError::ValidationError(err) => bad_request(err.to_string()),
            TeamError::SessionError(err) => session_error(err),
            TeamError::BackendError(err) => err.into(),
        }
    }
}

impl From<InboxError> for AppError {
    fn from(value: InboxError) -> Self {
        match value {
            InboxError::Unauthenticated => not_logged_in(),
            InboxError::ValidationError(err) => bad_request(err.to_string()),
            InboxError::SessionError(err) => session_error(err),
            InboxError::BackendError(err) => err.into(),
        }
    }
}
