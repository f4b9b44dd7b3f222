use crate::commands::{run_apply, run_match, ApplyArgs, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use venturelink::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "venturelink",
    about = "Run the venturelink investor service or drive its workflows from the command line",
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
    /// Rank a CSV export of projects against an investor profile
    Match(MatchArgs),
    /// Walk the investor application wizard over a draft file and submit it
    Apply(ApplyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Apply(args) => run_apply(args).await,
    }
}
