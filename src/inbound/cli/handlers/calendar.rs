use crate::core::application::ApplicationServices;
use crate::domain::calendar::{month_range, overdue_tasks};
use crate::domain::workspace::{AgendaParams, WorkspaceError, WorkspaceService};
use crate::errors::AppError;
use crate::inbound::cli::responses::calendar::{AgendaResponse, OverdueResponse};
use time::Date;
use uuid::Uuid;

/// Agenda of one month. Missing year or month default to those of `today`.
pub async fn month<S: ApplicationServices>(
    state: &S,
    year: Option<i32>,
    month: Option<u8>,
    project_id: Option<Uuid>,
    today: Date,
) -> Result<AgendaResponse, AppError> {
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(u8::from(today.month()));
    let (from, to) = month_range(year, month).map_err(WorkspaceError::from)?;

    range(state, from, to, project_id).await
}

pub async fn range<S: ApplicationServices>(
    state: &S,
    from: Date,
    to: Date,
    project_id: Option<Uuid>,
) -> Result<AgendaResponse, AppError> {
    let agenda = state
        .workspace_service()
        .agenda(AgendaParams {
            from,
            to,
            project_id,
        })
        .await?;

    Ok(agenda.into())
}

pub async fn overdue<S: ApplicationServices>(
    state: &S,
    project_id: Option<Uuid>,
    today: Date,
) -> Result<OverdueResponse, AppError> {
    let tasks = state.workspace_service().get_tasks(project_id).await?;

    Ok(OverdueResponse::new(today, overdue_tasks(&tasks, today)))
}
