use crate::demo::{run_demo, run_profile_recalc, run_unround, DemoArgs, RecalcArgs, UnroundArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fitrep_rv::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fitrep RV Calculator",
    about = "Replay fitness reports against a reporting-senior profile and report relative values",
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
    /// Work with a reporting-senior profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Recover the exact average behind a two-decimal profile value
    Unround(UnroundArgs),
    /// Walk through a sample profile session
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Replay a grade sheet against a baseline profile
    Recalc(RecalcArgs),
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
        Command::Profile {
            command: ProfileCommand::Recalc(args),
        } => run_profile_recalc(args),
        Command::Unround(args) => run_unround(args),
        Command::Demo(args) => run_demo(args),
    }
}
