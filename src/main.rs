use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use entitlement_engine::api::{AppState, create_router};
use entitlement_engine::calculation::assess;
use entitlement_engine::config::ConfigLoader;
use entitlement_engine::models::HouseholdProfile;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(
    name = "entitlement-engine",
    about = "Estimate unclaimed benefits and cliff-edge risks for a household",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a single household profile read from a JSON file
    Assess(AssessArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Policy document (YAML or JSON); the built-in 2024-25 policy is used when absent or invalid
    #[arg(long)]
    policy: Option<PathBuf>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            policy: None,
        }
    }
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// JSON file holding a household profile
    #[arg(long)]
    profile: PathBuf,
    /// Policy document (YAML or JSON)
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Print the full report including the audit trace
    #[arg(long)]
    explain: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing()?;

    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => run_server(args).await,
        Command::Assess(args) => run_assess(args),
    }
}

fn init_tracing() -> CliResult<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()?;
    Ok(())
}

async fn run_server(args: ServeArgs) -> CliResult<()> {
    let config = ConfigLoader::load_or_default(args.policy.as_deref());
    info!(policy_version = %config.policy().version, "Policy active");

    let app = create_router(AppState::new(config));
    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!(address = %listener.local_addr()?, "Entitlement engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_assess(args: AssessArgs) -> CliResult<()> {
    let config = ConfigLoader::load_or_default(args.policy.as_deref());

    let content = fs::read_to_string(&args.profile)
        .map_err(|err| format!("failed to read profile '{}': {err}", args.profile.display()))?;
    let profile: HouseholdProfile = serde_json::from_str(&content)?;
    profile.validate()?;

    let report = assess(&profile, config.policy());
    let output = if args.explain {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.assessment)?
    };
    println!("{output}");
    Ok(())
}
