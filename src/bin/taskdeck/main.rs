use anyhow::anyhow;
use clap::Parser;
use std::process::exit;
use std::sync::Arc;
use taskdeck::core::application::{Application, NewApplicationParams};
use taskdeck::core::config::Config;
use taskdeck::domain::{auth, inbox, team, workspace};
use taskdeck::errors::AppError;
use taskdeck::inbound::cli::responses::shared::OutputFormat;
use taskdeck::inbound::cli::{Commands, dispatch};
use taskdeck::outbound::cache::CachedWorkspaceApi;
use taskdeck::outbound::rest::{NewRestClientParams, RestClient};
use taskdeck::outbound::session::FileSessionStore;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type ApplicationAlias = Application<
    auth::Service<FileSessionStore, RestClient>,
    workspace::Service<FileSessionStore, CachedWorkspaceApi<RestClient>>,
    team::Service<FileSessionStore, RestClient>,
    inbox::Service<FileSessionStore, RestClient>,
>;

#[derive(Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[arg(long)]
    config_path: Option<String>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = start(cli).await {
        match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                match app_error.message() {
                    Some(message) => eprintln!("{}: {message}", app_error.title()),
                    None => eprintln!("{}", app_error.title()),
                }
                exit(app_error.exit_code());
            }
            None => {
                error!("Error: {:#?}", e);
                exit(1);
            }
        }
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let Some(command) = cli.command else {
        return Ok(());
    };

    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let application = create_application(config)?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let response = dispatch(&application, command).await?;
    println!("{}", response.render(format)?);

    Ok(())
}

fn create_application(config: Config) -> Result<ApplicationAlias, anyhow::Error> {
    tracing::debug!("creating backend client");
    let client = RestClient::new(NewRestClientParams {
        base_url: config.api.base_url.clone(),
        timeout: config.api.timeout(),
    })
    .map_err(|e| anyhow!(e.to_string()))?;

    let session_path = config.session.path();
    tracing::debug!(path = %session_path.display(), "using session file");
    let session = Arc::new(FileSessionStore::new(session_path));

    let cached_workspace_api = CachedWorkspaceApi::new(client.clone(), config.cache.stale_after());
    let client = Arc::new(client);

    Ok(Application::new(NewApplicationParams {
        auth_service: auth::Service::new(session.clone(), client.clone()),
        workspace_service: workspace::Service::new(session.clone(), Arc::new(cached_workspace_api)),
        team_service: team::Service::new(session.clone(), client.clone()),
        inbox_service: inbox::Service::new(session, client),
        config,
    }))
}
