mod commands;
mod helpers;

use clap::Parser;
use clas12_core::domain::Clas12Error;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_clas12_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            eprintln!("{}", diagnostic.fatal_exit_line());
            diagnostic.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "clas12-rs",
    version,
    about = "CLAS12 electron kinematics and sampling-fraction analysis"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Select electrons, fill kinematic histograms and write them to one artifact
    Analyze(commands::AnalyzeArgs),
    /// Read every event and report the read rate
    Scan(commands::ScanArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Analyze(args) => commands::run_analyze_command(args),
        CliCommand::Scan(args) => commands::run_scan_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(Clas12Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<Clas12Error> for CliError {
    fn from(error: Clas12Error) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_clas12_error(&self) -> Clas12Error {
        match self {
            Self::Usage(message) => Clas12Error::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => Clas12Error::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
