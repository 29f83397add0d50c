use crate::domain::kanban::{Board, Card};
use crate::domain::workspace::MoveCardResult;
use crate::inbound::cli::responses::project::StatsBody;
use crate::inbound::cli::responses::task::{ProjectUpdateBody, describe_update};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CardBody {
    task_id: Uuid,
    title: String,
    priority: &'static str,
    due_date: Option<String>,
    assignee: Option<String>,
}

impl From<&Card> for CardBody {
    fn from(value: &Card) -> Self {
        Self {
            task_id: value.task_id,
            title: value.title.clone(),
            priority: value.priority.as_str(),
            due_date: value.due_date.map(|date| date.to_string()),
            assignee: value.assignee.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ColumnBody {
    status: &'static str,
    title: &'static str,
    cards: Vec<CardBody>,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    project_id: Option<Uuid>,
    columns: Vec<ColumnBody>,
    stats: StatsBody,
}

impl From<&Board> for BoardResponse {
    fn from(value: &Board) -> Self {
        Self {
            project_id: value.project_id,
            columns: value
                .columns()
                .iter()
                .map(|column| ColumnBody {
                    status: column.status.as_str(),
                    title: column.status.title(),
                    cards: column.cards.iter().map(Into::into).collect(),
                })
                .collect(),
            stats: value.stats().into(),
        }
    }
}

impl fmt::Display for BoardResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let mut section = format!("== {} ({}) ==", column.title, column.cards.len());
            for (position, card) in column.cards.iter().enumerate() {
                section.push_str(&format!(
                    "\n{:>2}. {} [{}] {}",
                    position, card.title, card.priority, card.task_id
                ));
                if let Some(assignee) = &card.assignee {
                    section.push_str(&format!(" @{assignee}"));
                }
            }
            sections.push(section);
        }

        write!(f, "{}", sections.join("\n\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    board: BoardResponse,
    moved: Option<MovedBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_update: Option<ProjectUpdateBody>,
}

#[derive(Debug, Serialize)]
pub struct MovedBody {
    task_id: Uuid,
    from: &'static str,
    to: &'static str,
}

impl From<MoveCardResult> for MoveResponse {
    fn from(value: MoveCardResult) -> Self {
        Self {
            board: BoardResponse::from(&value.board),
            moved: value.change.map(|change| MovedBody {
                task_id: change.task_id,
                from: change.from.as_str(),
                to: change.to.as_str(),
            }),
            project_update: value
                .project_update
                .filter(|update| update.should_update)
                .map(Into::into),
        }
    }
}

impl fmt::Display for MoveResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match &self.moved {
            Some(moved) => write!(
                f,
                "\n\nmoved {} from {} to {}",
                moved.task_id, moved.from, moved.to
            )?,
            None => write!(f, "\n\nreordered")?,
        }
        if let Some(line) = self.project_update.as_ref().and_then(describe_update) {
            write!(f, "\n{line}")?;
        }

        Ok(())
    }
}
