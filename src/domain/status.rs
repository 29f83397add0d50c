use crate::domain::workspace::{Project, ProjectStatus, Task, TaskStatus};

/// Progress at or above which a project is considered well under way.
pub const IN_PROGRESS_THRESHOLD: u8 = 70;

const COMPLETED_PROJECT: &[&str] = &[
    "completed",
    "complete",
    "done",
    "finished",
    "terminé",
    "termine",
    "terminée",
    "achevé",
    "fini",
];

const IN_PROGRESS_PROJECT: &[&str] = &[
    "in_progress",
    "in progress",
    "in-progress",
    "inprogress",
    "en cours",
    "en_cours",
];

const ONGOING_PROJECT: &[&str] = &[
    "ongoing", "active", "open", "started", "actif", "ouvert", "démarré",
];

const CANCELED_PROJECT: &[&str] = &[
    "canceled",
    "cancelled",
    "annulé",
    "annule",
    "annulée",
    "abandonné",
];

const DONE_TASK: &[&str] = &[
    "done",
    "completed",
    "complete",
    "finished",
    "terminé",
    "termine",
    "terminée",
    "fait",
    "fini",
];

const IN_PROGRESS_TASK: &[&str] = &[
    "in_progress",
    "in progress",
    "in-progress",
    "inprogress",
    "doing",
    "started",
    "en cours",
    "en_cours",
];

/// Maps a freeform project status (any case, English or French) onto the
/// canonical set. Anything unrecognised is `Pending`.
pub fn normalize_project_status(status: &str) -> ProjectStatus {
    let status = status.trim().to_lowercase();
    let status = status.as_str();

    if COMPLETED_PROJECT.contains(&status) {
        ProjectStatus::Completed
    } else if IN_PROGRESS_PROJECT.contains(&status) {
        ProjectStatus::InProgress
    } else if ONGOING_PROJECT.contains(&status) {
        ProjectStatus::Ongoing
    } else if CANCELED_PROJECT.contains(&status) {
        ProjectStatus::Canceled
    } else {
        ProjectStatus::Pending
    }
}

/// Maps a freeform task status onto the canonical set, defaulting to `Todo`.
pub fn normalize_task_status(status: &str) -> TaskStatus {
    let status = status.trim().to_lowercase();
    let status = status.as_str();

    if DONE_TASK.contains(&status) {
        TaskStatus::Done
    } else if IN_PROGRESS_TASK.contains(&status) {
        TaskStatus::InProgress
    } else {
        TaskStatus::Todo
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub total: usize,
}

impl TaskStats {
    fn record(mut self, status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => self.todo += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Done => self.done += 1,
        }
        self.total += 1;
        self
    }

    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = TaskStatus>,
    {
        statuses.into_iter().fold(Self::default(), Self::record)
    }

    /// Percentage of done tasks, rounded half up. Zero for an empty list.
    pub fn progress(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }

        let ratio = self.done as f64 / self.total as f64;
        (ratio * 100.0).round() as u8
    }
}

pub fn calculate_task_stats(tasks: &[Task]) -> TaskStats {
    TaskStats::from_statuses(tasks.iter().map(|task| task.status))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectProgress {
    pub progress: u8,
    pub recommended_status: ProjectStatus,
}

fn recommended_status(progress: u8) -> ProjectStatus {
    if progress == 100 {
        ProjectStatus::Completed
    } else if progress >= IN_PROGRESS_THRESHOLD {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::Ongoing
    }
}

pub fn progress_for_tasks(tasks: &[Task]) -> ProjectProgress {
    let progress = calculate_task_stats(tasks).progress();

    ProjectProgress {
        progress,
        recommended_status: recommended_status(progress),
    }
}

pub fn calculate_project_progress(project: &Project) -> ProjectProgress {
    progress_for_tasks(&project.tasks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub should_update: bool,
    pub new_status: Option<ProjectStatus>,
    pub progress: u8,
}

impl StatusUpdate {
    fn keep(progress: u8) -> Self {
        Self {
            should_update: false,
            new_status: None,
            progress,
        }
    }

    fn change(status: ProjectStatus, progress: u8) -> Self {
        Self {
            should_update: true,
            new_status: Some(status),
            progress,
        }
    }
}

/// Decides whether the project's stored status disagrees with what its
/// tasks say. Canceled projects and projects without tasks are left alone.
pub fn should_update_project_status(project: &Project, tasks: &[Task]) -> StatusUpdate {
    let current = project.status;

    if tasks.is_empty() {
        return StatusUpdate::keep(0);
    }

    let stats = calculate_task_stats(tasks);
    let progress = stats.progress();

    if current == ProjectStatus::Canceled {
        return StatusUpdate::keep(progress);
    }

    if stats.done == stats.total {
        return if current == ProjectStatus::Completed {
            StatusUpdate::keep(progress)
        } else {
            StatusUpdate::change(ProjectStatus::Completed, progress)
        };
    }

    // a completed project whose tasks were reopened goes back to work
    if current == ProjectStatus::Completed {
        return StatusUpdate::change(ProjectStatus::InProgress, progress);
    }

    // an open task rules out completed even when the percentage rounds to 100
    let target = match recommended_status(progress) {
        ProjectStatus::Completed => ProjectStatus::InProgress,
        status => status,
    };
    if target != current {
        return StatusUpdate::change(target, progress);
    }

    StatusUpdate::keep(progress)
}
