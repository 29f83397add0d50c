use crate::core::application::ApplicationServices;
use crate::domain::inbox::{DeviceToken, UpdateSettingsParams};
use crate::domain::team::{InvitationAnswer, InviteParams};
use crate::domain::workspace::{
    CreateProjectParams, CreateTagParams, CreateTaskParams, UpdateProjectParams, UpdateTaskParams,
};
use crate::errors::AppError;
use crate::inbound::cli::commands::{
    BoardCommands, CalendarCommands, Commands, DeviceCommands, NotificationCommands,
    ProjectCommands, SettingsCommands, TagCommands, TaskCommands, TeamCommands,
};
use crate::inbound::cli::handlers::{auth, board, calendar, inbox, projects, tags, tasks, team};
use crate::inbound::cli::middleware;
use crate::inbound::cli::responses::shared::Render;
use time::OffsetDateTime;

type Rendered = Result<Box<dyn Render>, AppError>;

fn boxed<R: Render + 'static>(response: R) -> Box<dyn Render> {
    Box::new(response)
}

/// Runs one command against the application. Everything except `login` and
/// `logout` goes through the session guard first.
pub async fn dispatch<S: ApplicationServices>(state: &S, command: Commands) -> Rendered {
    if !command.is_public() {
        middleware::auth(state).await?;
    }

    match command {
        Commands::Login { email, password } => {
            Ok(boxed(auth::login(state, email, password).await?))
        }
        Commands::Logout => Ok(boxed(auth::logout(state).await?)),
        Commands::Whoami => Ok(boxed(auth::whoami(state).await?)),
        Commands::Subscription => Ok(boxed(auth::subscription(state).await?)),
        Commands::Projects(command) => project_command(state, command).await,
        Commands::Tasks(command) => task_command(state, command).await,
        Commands::Board(command) => board_command(state, command).await,
        Commands::Calendar(command) => calendar_command(state, command).await,
        Commands::Team(command) => team_command(state, command).await,
        Commands::Notifications(command) => notification_command(state, command).await,
        Commands::Tags(command) => tag_command(state, command).await,
        Commands::Device(command) => device_command(state, command).await,
    }
}

async fn project_command<S: ApplicationServices>(state: &S, command: ProjectCommands) -> Rendered {
    match command {
        ProjectCommands::List => Ok(boxed(projects::list_projects(state).await?)),
        ProjectCommands::Show { project_id } => {
            Ok(boxed(projects::show_project(state, project_id).await?))
        }
        ProjectCommands::Create {
            name,
            description,
            start,
            end,
            members,
        } => {
            let params = CreateProjectParams {
                name,
                description,
                start_date: start,
                end_date: end,
                member_ids: members,
            };
            Ok(boxed(projects::create_project(state, params).await?))
        }
        ProjectCommands::Update {
            project_id,
            name,
            description,
            start,
            end,
            status,
        } => {
            let params = UpdateProjectParams {
                project_id,
                name,
                description,
                start_date: start,
                end_date: end,
                status: status.map(Into::into),
            };
            Ok(boxed(projects::update_project(state, params).await?))
        }
        ProjectCommands::Delete { project_id } => {
            Ok(boxed(projects::delete_project(state, project_id).await?))
        }
        ProjectCommands::Sync { project_id } => {
            Ok(boxed(projects::sync_project(state, project_id).await?))
        }
    }
}

async fn task_command<S: ApplicationServices>(state: &S, command: TaskCommands) -> Rendered {
    match command {
        TaskCommands::List { project } => Ok(boxed(tasks::list_tasks(state, project).await?)),
        TaskCommands::Show { task_id } => Ok(boxed(tasks::show_task(state, task_id).await?)),
        TaskCommands::Create {
            title,
            project,
            status,
            fields,
        } => {
            let params = CreateTaskParams {
                title,
                description: fields.description,
                status: status.into(),
                priority: fields.priority.map(Into::into).unwrap_or_default(),
                due_date: fields.due,
                project_id: project,
                assignee_id: fields.assignee,
                tag_ids: fields.tags,
            };
            Ok(boxed(tasks::create_task(state, params).await?))
        }
        TaskCommands::Update {
            task_id,
            title,
            status,
            fields,
        } => {
            let params = UpdateTaskParams {
                task_id,
                title,
                description: fields.description,
                status: status.map(Into::into),
                priority: fields.priority.map(Into::into),
                due_date: fields.due,
                assignee_id: fields.assignee,
                tag_ids: (!fields.tags.is_empty()).then_some(fields.tags),
            };
            Ok(boxed(tasks::update_task(state, params).await?))
        }
        TaskCommands::Status { task_id, status } => Ok(boxed(
            tasks::set_task_status(state, task_id, status.into()).await?,
        )),
        TaskCommands::Delete { task_id } => Ok(boxed(tasks::delete_task(state, task_id).await?)),
    }
}

async fn board_command<S: ApplicationServices>(state: &S, command: BoardCommands) -> Rendered {
    match command {
        BoardCommands::Show { project_id } => {
            Ok(boxed(board::show_board(state, project_id).await?))
        }
        BoardCommands::Move {
            project_id,
            task_id,
            status,
            index,
        } => Ok(boxed(
            board::move_card(state, project_id, task_id, status.into(), index).await?,
        )),
    }
}

async fn calendar_command<S: ApplicationServices>(
    state: &S,
    command: CalendarCommands,
) -> Rendered {
    let today = OffsetDateTime::now_utc().date();

    match command {
        CalendarCommands::Month {
            year,
            month,
            project,
        } => Ok(boxed(
            calendar::month(state, year, month, project, today).await?,
        )),
        CalendarCommands::Range { from, to, project } => {
            Ok(boxed(calendar::range(state, from, to, project).await?))
        }
        CalendarCommands::Overdue { project } => {
            Ok(boxed(calendar::overdue(state, project, today).await?))
        }
    }
}

async fn team_command<S: ApplicationServices>(state: &S, command: TeamCommands) -> Rendered {
    let now = OffsetDateTime::now_utc();

    match command {
        TeamCommands::Members => Ok(boxed(team::list_members(state).await?)),
        TeamCommands::Remove { member_id } => {
            Ok(boxed(team::remove_member(state, member_id).await?))
        }
        TeamCommands::Invitations => Ok(boxed(team::list_invitations(state, now).await?)),
        TeamCommands::Invite {
            email,
            role,
            project,
        } => {
            let params = InviteParams {
                email,
                role: role.into(),
                project_id: project,
            };
            Ok(boxed(team::invite(state, params, now).await?))
        }
        TeamCommands::Accept { invitation_id } => Ok(boxed(
            team::respond(state, invitation_id, InvitationAnswer::Accept, now).await?,
        )),
        TeamCommands::Decline { invitation_id } => Ok(boxed(
            team::respond(state, invitation_id, InvitationAnswer::Decline, now).await?,
        )),
        TeamCommands::Cancel { invitation_id } => {
            Ok(boxed(team::cancel_invitation(state, invitation_id).await?))
        }
    }
}

async fn notification_command<S: ApplicationServices>(
    state: &S,
    command: NotificationCommands,
) -> Rendered {
    match command {
        NotificationCommands::List { unread } => {
            Ok(boxed(inbox::list_notifications(state, unread).await?))
        }
        NotificationCommands::Count => Ok(boxed(inbox::unread_count(state).await?)),
        NotificationCommands::Read { notification_id } => {
            Ok(boxed(inbox::mark_read(state, notification_id).await?))
        }
        NotificationCommands::ReadAll => Ok(boxed(inbox::mark_all_read(state).await?)),
        NotificationCommands::Settings(SettingsCommands::Show { settings_id }) => {
            Ok(boxed(inbox::show_settings(state, settings_id).await?))
        }
        NotificationCommands::Settings(SettingsCommands::Update {
            settings_id,
            push,
            email,
            task_reminders,
            team_updates,
            project_updates,
        }) => {
            let params = UpdateSettingsParams {
                settings_id,
                push_enabled: push,
                email_enabled: email,
                task_reminders,
                team_updates,
                project_updates,
            };
            Ok(boxed(inbox::update_settings(state, params).await?))
        }
    }
}

async fn tag_command<S: ApplicationServices>(state: &S, command: TagCommands) -> Rendered {
    match command {
        TagCommands::List { project_id } => Ok(boxed(tags::list_tags(state, project_id).await?)),
        TagCommands::Create {
            project_id,
            name,
            color,
            icon,
        } => {
            let params = CreateTagParams {
                project_id,
                name,
                color,
                icon,
            };
            Ok(boxed(tags::create_tag(state, params).await?))
        }
        TagCommands::Delete { tag_id } => Ok(boxed(tags::delete_tag(state, tag_id).await?)),
    }
}

async fn device_command<S: ApplicationServices>(state: &S, command: DeviceCommands) -> Rendered {
    match command {
        DeviceCommands::Register { token, platform } => {
            let device = DeviceToken {
                token,
                platform: platform.into(),
            };
            Ok(boxed(inbox::register_device(state, device).await?))
        }
        DeviceCommands::Unregister { token } => {
            Ok(boxed(inbox::unregister_device(state, token).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::MockAuthService;
    use crate::domain::workspace::MockWorkspaceService;
    use crate::inbound::cli::responses::shared::OutputFormat;
    use std::future;

    #[tokio::test]
    async fn test_protected_command_requires_session() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(false))));
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service.expect_get_projects().never();

        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            auth_service: Some(auth_service),
            workspace_service: Some(workspace_service),
            ..Default::default()
        });

        let result = dispatch(&app, Commands::Projects(ProjectCommands::List)).await;

        assert!(matches!(result, Err(AppError::Unauthorized(Some(_)))));
    }

    #[tokio::test]
    async fn test_logout_skips_guard() {
        let mut auth_service = MockAuthService::new();
        auth_service.expect_authenticated().never();
        auth_service
            .expect_logout()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(()))));

        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            auth_service: Some(auth_service),
            ..Default::default()
        });

        let output = dispatch(&app, Commands::Logout)
            .await
            .unwrap()
            .render(OutputFormat::Text)
            .unwrap();

        assert_eq!("Logged out", output);
    }

    #[tokio::test]
    async fn test_json_output() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .returning(|| Box::pin(future::ready(Ok(true))));
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service
            .expect_get_projects()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(vec![]))));

        let app = MockApplication::mock_instance(MockAppInstanceParameters {
            auth_service: Some(auth_service),
            workspace_service: Some(workspace_service),
            ..Default::default()
        });

        let output = dispatch(&app, Commands::Projects(ProjectCommands::List))
            .await
            .unwrap()
            .render(OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(serde_json::json!({"projects": []}), value);
    }
}
