use crate::domain::workspace::{Project, ProjectStatus, Task, TaskPriority, TaskStatus};
use std::collections::BTreeMap;
use thiserror::Error;
use time::{Date, Month};
use uuid::Uuid;

/// Longest range an agenda may cover, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("range start {from} is after range end {to}")]
    InvalidRange { from: Date, to: Date },

    #[error("range covers {0} days, more than a year")]
    RangeTooLong(i64),

    #[error("{year}-{month} is not a calendar month")]
    InvalidMonth { year: i32, month: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueTask {
    pub task_id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSpan {
    pub project_id: Uuid,
    pub name: String,
    pub status: ProjectStatus,
    pub start_date: Date,
    pub end_date: Date,
}

impl ProjectSpan {
    fn from_project(project: &Project) -> Option<Self> {
        let (start_date, end_date) = match (project.start_date, project.end_date) {
            (Some(start), Some(end)) if start <= end => (start, end),
            (Some(start), Some(end)) => (end, start),
            (Some(date), None) | (None, Some(date)) => (date, date),
            (None, None) => return None,
        };

        Some(Self {
            project_id: project.id,
            name: project.name.clone(),
            status: project.status,
            start_date,
            end_date,
        })
    }

    fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Day {
    pub tasks: Vec<DueTask>,
    pub projects: Vec<ProjectSpan>,
}

impl Day {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.projects.is_empty()
    }
}

/// Tasks and projects bucketed per day over an inclusive date range.
#[derive(Debug, Clone, PartialEq)]
pub struct Agenda {
    pub from: Date,
    pub to: Date,
    days: BTreeMap<Date, Day>,
}

impl Agenda {
    pub fn build(
        projects: &[Project],
        tasks: &[Task],
        from: Date,
        to: Date,
    ) -> Result<Self, CalendarError> {
        if from > to {
            return Err(CalendarError::InvalidRange { from, to });
        }

        let length = (to - from).whole_days() + 1;
        if length > MAX_RANGE_DAYS {
            return Err(CalendarError::RangeTooLong(length));
        }

        let mut days: BTreeMap<Date, Day> = BTreeMap::new();

        for task in tasks {
            let Some(due_date) = task.due_date else {
                continue;
            };
            if due_date < from || due_date > to {
                continue;
            }

            days.entry(due_date).or_default().tasks.push(DueTask {
                task_id: task.id,
                title: task.title.clone(),
                status: task.status,
                priority: task.priority,
                project_id: task.project_id,
            });
        }

        let spans: Vec<ProjectSpan> = projects
            .iter()
            .filter_map(ProjectSpan::from_project)
            .collect();
        let mut date = from;
        loop {
            for span in spans.iter().filter(|span| span.covers(date)) {
                days.entry(date).or_default().projects.push(span.clone());
            }

            match date.next_day() {
                Some(next) if next <= to => date = next,
                _ => break,
            }
        }

        Ok(Self { from, to, days })
    }

    pub fn day(&self, date: Date) -> Option<&Day> {
        self.days.get(&date)
    }

    /// Dates carrying at least one task or project, in order.
    pub fn marked_dates(&self) -> Vec<Date> {
        self.days
            .iter()
            .filter(|(_, day)| !day.is_empty())
            .map(|(date, _)| *date)
            .collect()
    }

    pub fn days(&self) -> impl Iterator<Item = (&Date, &Day)> {
        self.days.iter()
    }
}

/// First and last day of a calendar month.
pub fn month_range(year: i32, month: u8) -> Result<(Date, Date), CalendarError> {
    let invalid = || CalendarError::InvalidMonth { year, month };
    let calendar_month = Month::try_from(month).map_err(|_| invalid())?;
    let first = Date::from_calendar_date(year, calendar_month, 1).map_err(|_| invalid())?;
    let last_day = time::util::days_in_year_month(year, calendar_month);
    let last = Date::from_calendar_date(year, calendar_month, last_day).map_err(|_| invalid())?;

    Ok((first, last))
}

/// Unfinished tasks whose due date lies before `today`, oldest first.
pub fn overdue_tasks(tasks: &[Task], today: Date) -> Vec<&Task> {
    let mut overdue: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Done)
        .filter(|task| task.due_date.is_some_and(|due| due < today))
        .collect();
    overdue.sort_by_key(|task| task.due_date);
    overdue
}
