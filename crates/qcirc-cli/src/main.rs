//! qcirc Command-Line Interface
//!
//! The main entry point for the `qcirc` tool. Run without arguments it
//! builds the conditional demonstration circuit and prints its JSON form.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::OutputFormat;
use commands::{build, convert, version};

/// qcirc - build and serialize quantum circuits with classical control
#[derive(Parser)]
#[command(name = "qcirc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `build` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the conditional demonstration circuit and print it
    Build {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Indent JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Load a JSON circuit and emit it again
    Convert {
        /// Input file (JSON)
        #[arg(short, long)]
        input: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Indent JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; stderr keeps stdout a clean document.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Build {
        format: OutputFormat::Json,
        pretty: false,
        output: None,
    });

    let result = match command {
        Commands::Build {
            format,
            pretty,
            output,
        } => build::execute(format, pretty, output.as_deref()),

        Commands::Convert {
            input,
            format,
            pretty,
            output,
        } => convert::execute(&input, format, pretty, output.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
