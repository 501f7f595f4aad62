use crate::demo::{run_demo, run_register, run_units, DemoArgs, RegisterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use morire_leads::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Morire Leads",
    about = "Capture and route purchase-interest leads for the Morire residences",
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
    /// Register interest from the command line and walk through the confirmation page
    Register(RegisterArgs),
    /// List the unit types open for registration
    Units,
    /// Run scripted registration and inquiry scenarios against in-memory adapters
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Keep registrations in memory and log notifications instead of sending them
    #[arg(long)]
    pub(crate) in_memory: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Register(args) => run_register(args).await,
        Command::Units => {
            run_units();
            Ok(())
        }
        Command::Demo(args) => run_demo(args).await,
    }
}
