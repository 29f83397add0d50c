//! In-memory kanban board: one column per task status, cards ordered as the
//! user arranged them. Dragging a card into another column yields the status
//! change that has to be sent to the backend.

use crate::domain::status::TaskStats;
use crate::domain::workspace::{Task, TaskPriority, TaskStatus};
use thiserror::Error;
use time::Date;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KanbanError {
    #[error("task {0} is not on the board")]
    CardNotFound(Uuid),

    #[error("task {0} is already on the board")]
    DuplicateCard(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub task_id: Uuid,
    pub title: String,
    pub priority: TaskPriority,
    pub due_date: Option<Date>,
    pub assignee: Option<String>,
}

impl From<&Task> for Card {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            priority: task.priority,
            due_date: task.due_date,
            assignee: task.assignee.as_ref().map(|member| member.full_name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: TaskStatus,
    pub cards: Vec<Card>,
}

impl Column {
    fn position(&self, task_id: Uuid) -> Option<usize> {
        self.cards.iter().position(|card| card.task_id == task_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: Uuid,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub project_id: Option<Uuid>,
    columns: Vec<Column>,
}

impl Board {
    pub fn new(project_id: Option<Uuid>) -> Self {
        Self {
            project_id,
            columns: TaskStatus::ALL
                .iter()
                .map(|status| Column {
                    status: *status,
                    cards: vec![],
                })
                .collect(),
        }
    }

    pub fn from_tasks(project_id: Option<Uuid>, tasks: &[Task]) -> Self {
        let mut board = Self::new(project_id);
        for task in tasks {
            // a repeated task keeps its first position
            let _ = board.insert_card(task);
        }
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &Column {
        &self.columns[Self::column_index(status)]
    }

    fn column_index(status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }

    fn locate(&self, task_id: Uuid) -> Result<(usize, usize), KanbanError> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(index, column)| column.position(task_id).map(|slot| (index, slot)))
            .ok_or(KanbanError::CardNotFound(task_id))
    }

    pub fn status_of(&self, task_id: Uuid) -> Option<TaskStatus> {
        self.locate(task_id)
            .ok()
            .map(|(column, _)| self.columns[column].status)
    }

    /// Appends a task to the bottom of the column matching its status.
    pub fn insert_card(&mut self, task: &Task) -> Result<(), KanbanError> {
        if self.locate(task.id).is_ok() {
            return Err(KanbanError::DuplicateCard(task.id));
        }

        self.columns[Self::column_index(task.status)]
            .cards
            .push(Card::from(task));

        Ok(())
    }

    pub fn remove_card(&mut self, task_id: Uuid) -> Result<Card, KanbanError> {
        let (column, index) = self.locate(task_id)?;

        Ok(self.columns[column].cards.remove(index))
    }

    /// Moves a card to `to_index` of the `to_status` column. The index is
    /// clamped to the column length. Returns the status change when the card
    /// left its column.
    pub fn move_card(
        &mut self,
        task_id: Uuid,
        to_status: TaskStatus,
        to_index: usize,
    ) -> Result<Option<StatusChange>, KanbanError> {
        let (from_column, from_index) = self.locate(task_id)?;
        let from = self.columns[from_column].status;
        let card = self.columns[from_column].cards.remove(from_index);

        let target = &mut self.columns[Self::column_index(to_status)].cards;
        let to_index = to_index.min(target.len());
        target.insert(to_index, card);

        if from == to_status {
            return Ok(None);
        }

        Ok(Some(StatusChange {
            task_id,
            from,
            to: to_status,
        }))
    }

    pub fn reorder(&mut self, task_id: Uuid, to_index: usize) -> Result<(), KanbanError> {
        let (column, _) = self.locate(task_id)?;
        let status = self.columns[column].status;
        self.move_card(task_id, status, to_index)?;

        Ok(())
    }

    /// Translates a drop position (relative to the board's top-left corner)
    /// into the column and slot it lands on.
    pub fn drop_target(
        &self,
        x: f32,
        y: f32,
        column_width: f32,
        card_height: f32,
    ) -> (TaskStatus, usize) {
        let last = self.columns.len() - 1;
        let column = if x <= 0.0 || column_width <= 0.0 {
            0
        } else {
            ((x / column_width) as usize).min(last)
        };

        let slots = self.columns[column].cards.len();
        let index = if y <= 0.0 || card_height <= 0.0 {
            0
        } else {
            ((y / card_height) as usize).min(slots)
        };

        (self.columns[column].status, index)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_statuses(
            self.columns
                .iter()
                .flat_map(|column| column.cards.iter().map(|_| column.status)),
        )
    }
}
