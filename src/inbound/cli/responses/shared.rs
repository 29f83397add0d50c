use crate::errors::{AppError, internal_error};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A command result that can be shown as text or as JSON.
pub trait Render: Send {
    fn render(&self, format: OutputFormat) -> Result<String, AppError>;
}

impl<T> Render for T
where
    T: Serialize + fmt::Display + Send,
{
    fn render(&self, format: OutputFormat) -> Result<String, AppError> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(self).map_err(internal_error),
        }
    }
}

/// Plain confirmation such as "Project deleted".
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for MessageResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub(crate) fn or_dash(value: Option<impl fmt::Display>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}
