use crate::domain::workspace::Tag;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct TagBody {
    id: Uuid,
    name: String,
    color: String,
    icon: Option<String>,
}

impl From<Tag> for TagBody {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id,
            name: value.name,
            color: value.color,
            icon: value.icon,
        }
    }
}

impl fmt::Display for TagBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {:<8} {}", self.id, self.color, self.name)?;
        if let Some(icon) = &self.icon {
            write!(f, " ({icon})")?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TagListResponse {
    tags: Vec<TagBody>,
}

impl From<Vec<Tag>> for TagListResponse {
    fn from(value: Vec<Tag>) -> Self {
        Self {
            tags: value.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TagListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            return f.write_str("No tags.");
        }

        let lines: Vec<String> = self.tags.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    tag: TagBody,
}

impl From<Tag> for TagResponse {
    fn from(value: Tag) -> Self {
        Self { tag: value.into() }
    }
}

impl fmt::Display for TagResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}
