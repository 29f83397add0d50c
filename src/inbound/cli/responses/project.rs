use crate::domain::status::{TaskStats, calculate_project_progress, calculate_task_stats};
use crate::domain::workspace::{Project, SyncProjectStatusResult};
use crate::inbound::cli::responses::shared::or_dash;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    id: Uuid,
    name: String,
    status: &'static str,
    progress: u8,
    start_date: Option<String>,
    end_date: Option<String>,
    task_count: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(value: &Project) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            status: value.status.as_str(),
            progress: calculate_project_progress(value).progress,
            start_date: value.start_date.map(|date| date.to_string()),
            end_date: value.end_date.map(|date| date.to_string()),
            task_count: value.tasks.len(),
        }
    }
}

impl fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<28} {:<12} {:>3}%  {} tasks",
            self.id, self.name, self.status, self.progress, self.task_count
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    projects: Vec<ProjectSummary>,
}

impl From<Vec<Project>> for ProjectListResponse {
    fn from(value: Vec<Project>) -> Self {
        Self {
            projects: value.iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ProjectListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.projects.is_empty() {
            return f.write_str("No projects yet.");
        }

        let lines: Vec<String> = self.projects.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct StatsBody {
    todo: usize,
    in_progress: usize,
    done: usize,
    total: usize,
}

impl From<TaskStats> for StatsBody {
    fn from(value: TaskStats) -> Self {
        Self {
            todo: value.todo,
            in_progress: value.in_progress,
            done: value.done,
            total: value.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    summary: ProjectSummary,
    description: Option<String>,
    recommended_status: &'static str,
    stats: StatsBody,
    members: Vec<String>,
    tags: Vec<String>,
}

impl From<Project> for ProjectResponse {
    fn from(value: Project) -> Self {
        Self {
            summary: ProjectSummary::from(&value),
            recommended_status: calculate_project_progress(&value).recommended_status.as_str(),
            stats: calculate_task_stats(&value.tasks).into(),
            members: value
                .members
                .iter()
                .map(|member| member.full_name.clone())
                .collect(),
            tags: value.tags.iter().map(|tag| tag.name.clone()).collect(),
            description: value.description,
        }
    }
}

impl fmt::Display for ProjectResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.summary.name, self.summary.id)?;
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
        }
        writeln!(
            f,
            "status: {} (tasks suggest {})",
            self.summary.status, self.recommended_status
        )?;
        writeln!(
            f,
            "dates: {} -> {}",
            or_dash(self.summary.start_date.as_deref()),
            or_dash(self.summary.end_date.as_deref())
        )?;
        writeln!(
            f,
            "progress: {}% ({} todo, {} in progress, {} done)",
            self.summary.progress, self.stats.todo, self.stats.in_progress, self.stats.done
        )?;
        writeln!(f, "members: {}", self.members.join(", "))?;
        write!(f, "tags: {}", self.tags.join(", "))
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSyncResponse {
    project_id: Uuid,
    status: &'static str,
    progress: u8,
    changed: bool,
}

impl From<SyncProjectStatusResult> for StatusSyncResponse {
    fn from(value: SyncProjectStatusResult) -> Self {
        Self {
            project_id: value.project.id,
            status: value.project.status.as_str(),
            progress: value.update.progress,
            changed: value.update.should_update,
        }
    }
}

impl fmt::Display for StatusSyncResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changed {
            write!(f, "Project is now {} ({}% done)", self.status, self.progress)
        } else {
            write!(f, "Project stays {} ({}% done)", self.status, self.progress)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{ProjectStatus, Task, TaskStatus};

    fn task(status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Deploy".to_string(),
            description: None,
            status,
            priority: Default::default(),
            due_date: None,
            project_id: None,
            assignee: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_project_response() {
        let project = Project {
            id: Uuid::nil(),
            name: "Website".to_string(),
            description: None,
            start_date: None,
            end_date: None,
            status: ProjectStatus::Ongoing,
            members: vec![],
            tasks: vec![task(TaskStatus::Done), task(TaskStatus::Todo)],
            tags: vec![],
        };

        let response = ProjectResponse::from(project);

        assert_eq!(50, response.summary.progress);
        assert_eq!(1, response.stats.done);
        assert!(response.to_string().contains("progress: 50%"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            "No projects yet.",
            ProjectListResponse::from(vec![]).to_string()
        );
    }
}
