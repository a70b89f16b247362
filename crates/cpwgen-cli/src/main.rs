use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod render;

use error::CliError;
use render::Format;

#[derive(Parser)]
#[command(name = "cpwgen", version, about = "CPW layout geometry with airbridge placement")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build every component of a design file and place its airbridges
    Render {
        /// Design file (YAML)
        #[arg(value_name = "CONFIG")]
        input: PathBuf,

        /// Output format written to stdout
        #[arg(short, long, value_enum, default_value_t = Format::Summary)]
        format: Format,

        /// Log at debug level unless RUST_LOG says otherwise
        #[arg(short, long)]
        debug: bool,
    },
}

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(CliError::usage(err.to_string())),
    };

    match cli.command {
        Command::Render {
            input,
            format,
            debug,
        } => {
            init_logging(debug);
            render::run_render(&input, format)
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
