use crate::core::config::Config;
use crate::domain::auth::AuthService;
use crate::domain::inbox::InboxService;
use crate::domain::team::TeamService;
use crate::domain::workspace::WorkspaceService;
use std::sync::Arc;

pub trait ApplicationServices: Clone + Send + Sync {
    type AUTH: AuthService + Send;
    type WORKSPACE: WorkspaceService + Send;
    type TEAM: TeamService + Send;
    type INBOX: InboxService + Send;

    fn config(&self) -> Config;

    fn auth_service(&self) -> Arc<Self::AUTH>;

    fn workspace_service(&self) -> Arc<Self::WORKSPACE>;

    fn team_service(&self) -> Arc<Self::TEAM>;

    fn inbox_service(&self) -> Arc<Self::INBOX>;
}

pub struct Application<AUTH, WORKSPACE, TEAM, INBOX>
where
    AUTH: AuthService + Send + Sync + 'static,
    WORKSPACE: WorkspaceService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    INBOX: InboxService + Send + Sync + 'static,
{
    config: Config,
    auth_service: Arc<AUTH>,
    workspace_service: Arc<WORKSPACE>,
    team_service: Arc<TEAM>,
    inbox_service: Arc<INBOX>,
}

pub struct NewApplicationParams<AUTH, WORKSPACE, TEAM, INBOX> {
    pub config: Config,
    pub auth_service: AUTH,
    pub workspace_service: WORKSPACE,
    pub team_service: TEAM,
    pub inbox_service: INBOX,
}

impl<AUTH, WORKSPACE, TEAM, INBOX> Application<AUTH, WORKSPACE, TEAM, INBOX>
where
    AUTH: AuthService + Send + Sync + 'static,
    WORKSPACE: WorkspaceService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    INBOX: InboxService + Send + Sync + 'static,
{
    pub fn new(params: NewApplicationParams<AUTH, WORKSPACE, TEAM, INBOX>) -> Self {
        Self {
            config: params.config,
            auth_service: Arc::new(params.auth_service),
            workspace_service: Arc::new(params.workspace_service),
            team_service: Arc::new(params.team_service),
            inbox_service: Arc::new(params.inbox_service),
        }
    }
}

impl<AUTH, WORKSPACE, TEAM, INBOX> Clone for Application<AUTH, WORKSPACE, TEAM, INBOX>
where
    AUTH: AuthService + Send + Sync + 'static,
    WORKSPACE: WorkspaceService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    INBOX: InboxService + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            auth_service: self.auth_service.clone(),
            workspace_service: self.workspace_service.clone(),
            team_service: self.team_service.clone(),
            inbox_service: self.inbox_service.clone(),
        }
    }
}

impl<AUTH, WORKSPACE, TEAM, INBOX> ApplicationServices for Application<AUTH, WORKSPACE, TEAM, INBOX>
where
    AUTH: AuthService + Send + Sync + 'static,
    WORKSPACE: WorkspaceService + Send + Sync + 'static,
    TEAM: TeamService + Send + Sync + 'static,
    INBOX: InboxService + Send + Sync + 'static,
{
    type AUTH = AUTH;
    type WORKSPACE = WORKSPACE;
    type TEAM = TEAM;
    type INBOX = INBOX;

    fn config(&self) -> Config {
        self.config.clone()
    }

    fn auth_service(&self) -> Arc<Self::AUTH> {
        self.auth_service.clone()
    }

    fn workspace_service(&self) -> Arc<Self::WORKSPACE> {
        self.workspace_service.clone()
    }

    fn team_service(&self) -> Arc<Self::TEAM> {
        self.team_service.clone()
    }

    fn inbox_service(&self) -> Arc<Self::INBOX> {
        self.inbox_service.clone()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::core::application::{Application, NewApplicationParams};
    use crate::core::config::Config;
    use crate::domain::auth::MockAuthService;
    use crate::domain::inbox::MockInboxService;
    use crate::domain::team::MockTeamService;
    use crate::domain::workspace::MockWorkspaceService;

    pub type MockApplication =
        Application<MockAuthService, MockWorkspaceService, MockTeamService, MockInboxService>;

    #[derive(Default)]
    pub struct MockAppInstanceParameters {
        pub config: Option<Config>,
        pub auth_service: Option<MockAuthService>,
        pub workspace_service: Option<MockWorkspaceService>,
        pub team_service: Option<MockTeamService>,
        pub inbox_service: Option<MockInboxService>,
    }

    impl MockApplication {
        pub fn mock_instance(params: MockAppInstanceParameters) -> MockApplication {
            Application::new(NewApplicationParams {
                config: params.config.unwrap_or_default(),
                auth_service: params.auth_service.unwrap_or_default(),
                workspace_service: params.workspace_service.unwrap_or_default(),
                team_service: params.team_service.unwrap_or_default(),
                inbox_service: params.inbox_service.unwrap_or_default(),
            })
        }
    }
}
