use crate::domain::calendar::Agenda;
use crate::domain::workspace::Task;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DueBody {
    task_id: Uuid,
    title: String,
    status: &'static str,
    priority: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SpanBody {
    project_id: Uuid,
    name: String,
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DayBody {
    date: String,
    tasks: Vec<DueBody>,
    projects: Vec<SpanBody>,
}

#[derive(Debug, Serialize)]
pub struct AgendaResponse {
    from: String,
    to: String,
    marked_dates: Vec<String>,
    days: Vec<DayBody>,
}

impl From<Agenda> for AgendaResponse {
    fn from(value: Agenda) -> Self {
        Self {
            from: value.from.to_string(),
            to: value.to.to_string(),
            marked_dates: value
                .marked_dates()
                .into_iter()
                .map(|date| date.to_string())
                .collect(),
            days: value
                .days()
                .map(|(date, day)| DayBody {
                    date: date.to_string(),
                    tasks: day
                        .tasks
                        .iter()
                        .map(|task| DueBody {
                            task_id: task.task_id,
                            title: task.title.clone(),
                            status: task.status.as_str(),
                            priority: task.priority.as_str(),
                        })
                        .collect(),
                    projects: day
                        .projects
                        .iter()
                        .map(|span| SpanBody {
                            project_id: span.project_id,
                            name: span.name.clone(),
                            status: span.status.as_str(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for AgendaResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if self.days.is_empty() {
            return write!(f, "\nnothing scheduled");
        }

        for day in &self.days {
            write!(f, "\n\n{}", day.date)?;
            for project in &day.projects {
                write!(f, "\n  ~ {} ({})", project.name, project.status)?;
            }
            for task in &day.tasks {
                write!(f, "\n  - {} [{}, {}]", task.title, task.status, task.priority)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct OverdueResponse {
    today: String,
    tasks: Vec<OverdueBody>,
}

#[derive(Debug, Serialize)]
pub struct OverdueBody {
    task_id: Uuid,
    title: String,
    due_date: String,
    days_late: i64,
}

impl OverdueResponse {
    pub fn new(today: time::Date, tasks: Vec<&Task>) -> Self {
        Self {
            today: today.to_string(),
            tasks: tasks
                .into_iter()
                .filter_map(|task| {
                    let due_date = task.due_date?;
                    Some(OverdueBody {
                        task_id: task.id,
                        title: task.title.clone(),
                        due_date: due_date.to_string(),
                        days_late: (today - due_date).whole_days(),
                    })
                })
                .collect(),
        }
    }
}

impl fmt::Display for OverdueResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tasks.is_empty() {
            return f.write_str("Nothing overdue.");
        }

        let lines: Vec<String> = self
            .tasks
            .iter()
            .map(|task| {
                format!(
                    "{}  {}  due {} ({} days late)",
                    task.task_id, task.title, task.due_date, task.days_late
                )
            })
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{TaskPriority, TaskStatus};
    use time::macros::date;

    #[test]
    fn test_overdue_days_late() {
        let task = Task {
            id: Uuid::nil(),
            title: "File taxes".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            due_date: Some(date!(2024 - 04 - 15)),
            project_id: None,
            assignee: None,
            tags: vec![],
        };

        let response = OverdueResponse::new(date!(2024 - 04 - 18), vec![&task]);

        assert_eq!(3, response.tasks[0].days_late);
        assert!(response.to_string().contains("(3 days late)"));
    }

    #[test]
    fn test_empty_agenda() {
        let agenda = Agenda::build(&[], &[], date!(2024 - 04 - 01), date!(2024 - 04 - 30)).unwrap();

        assert_eq!(
            "2024-04-01 -> 2024-04-30\nnothing scheduled",
            AgendaResponse::from(agenda).to_string()
        );
    }
}
