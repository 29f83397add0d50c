use crate::domain::status::StatusUpdate;
use crate::domain::workspace::{Task, TaskResult};
use crate::inbound::cli::responses::shared::or_dash;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct TaskBody {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: &'static str,
    priority: &'static str,
    due_date: Option<String>,
    project_id: Option<Uuid>,
    assignee: Option<String>,
    tags: Vec<String>,
}

impl From<Task> for TaskBody {
    fn from(value: Task) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            status: value.status.as_str(),
            priority: value.priority.as_str(),
            due_date: value.due_date.map(|date| date.to_string()),
            project_id: value.project_id,
            assignee: value.assignee.map(|member| member.full_name),
            tags: value.tags.into_iter().map(|tag| tag.name).collect(),
        }
    }
}

impl fmt::Display for TaskBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  [{:<11}] {:<6} {}  due {}",
            self.id,
            self.status,
            self.priority,
            self.title,
            or_dash(self.due_date.as_deref())
        )
    }
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    tasks: Vec<TaskBody>,
}

impl From<Vec<Task>> for TaskListResponse {
    fn from(value: Vec<Task>) -> Self {
        Self {
            tasks: value.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TaskListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return f.write_str("No tasks.");
        }

        let lines: Vec<String> = self.tasks.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectUpdateBody {
    status: Option<&'static str>,
    progress: u8,
}

impl From<StatusUpdate> for ProjectUpdateBody {
    fn from(value: StatusUpdate) -> Self {
        Self {
            status: value.new_status.map(|status| status.as_str()),
            progress: value.progress,
        }
    }
}

pub(crate) fn describe_update(update: &ProjectUpdateBody) -> Option<String> {
    update
        .status
        .map(|status| format!("project moved to {status} ({}% done)", update.progress))
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    task: TaskBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_update: Option<ProjectUpdateBody>,
}

impl From<TaskResult> for TaskResponse {
    fn from(value: TaskResult) -> Self {
        Self {
            task: value.task.into(),
            project_update: value
                .project_update
                .filter(|update| update.should_update)
                .map(Into::into),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(value: Task) -> Self {
        Self {
            task: value.into(),
            project_update: None,
        }
    }
}

impl fmt::Display for TaskResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.task)?;
        if let Some(description) = &self.task.description {
            write!(f, "\n{description}")?;
        }
        if let Some(assignee) = &self.task.assignee {
            write!(f, "\nassignee: {assignee}")?;
        }
        if !self.task.tags.is_empty() {
            write!(f, "\ntags: {}", self.task.tags.join(", "))?;
        }
        if let Some(line) = self.project_update.as_ref().and_then(describe_update) {
            write!(f, "\n{line}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{ProjectStatus, TaskPriority, TaskStatus};
    use time::macros::date;

    fn task() -> Task {
        Task {
            id: Uuid::nil(),
            title: "Deploy".to_string(),
            description: None,
            status: TaskStatus::Done,
            priority: TaskPriority::High,
            due_date: Some(date!(2024 - 03 - 01)),
            project_id: None,
            assignee: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_task_response_mentions_project_update() {
        let response = TaskResponse::from(TaskResult {
            task: task(),
            project_update: Some(StatusUpdate {
                should_update: true,
                new_status: Some(ProjectStatus::Completed),
                progress: 100,
            }),
        });

        let text = response.to_string();
        assert!(text.contains("due 2024-03-01"));
        assert!(text.contains("project moved to completed (100% done)"));
    }

    #[test]
    fn test_unchanged_project_is_not_reported() {
        let response = TaskResponse::from(TaskResult {
            task: task(),
            project_update: Some(StatusUpdate {
                should_update: false,
                new_status: None,
                progress: 40,
            }),
        });

        assert!(response.project_update.is_none());
    }
}
