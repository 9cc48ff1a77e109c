use crate::demo::{run_availability, run_recommend, AvailabilityArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lunchping::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "LunchPing",
    about = "Serve the LunchPing API or answer lunch questions from the command line",
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
    /// Classify a restaurant's opening status at a given moment
    Availability(AvailabilityArgs),
    /// Run a recommendation session over a list of candidates
    Recommend(RecommendArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Keep uploads in memory instead of under STORAGE_ROOT
    #[arg(long)]
    pub(crate) ephemeral_storage: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Availability(args) => run_availability(args),
        Command::Recommend(args) => run_recommend(args).await,
    }
}
