use clap::{Parser, Subcommand};
use fontbridge::{
    commands::{
        config::{self, ConfigAction},
        edit, info,
        version::{self, VersionAction},
    },
    common, GlobalOpts,
};
use fontbridge_logger as logger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fontbridge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Inspect and edit fonts through fontforge",
    long_about = "fontbridge drives fontforge's Python module from Rust to inspect and edit fonts."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure fontbridge
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Show names, metrics and version of a font
    Info { font: PathBuf },
    /// Normalize or parse version strings without opening a font
    #[command(subcommand)]
    Version(VersionAction),
    /// Replace SFNT name values: KEY VALUE [KEY VALUE ...]
    SetNames {
        font: PathBuf,
        #[arg(required = true, num_args = 1..)]
        pairs: Vec<String>,
        /// Where to write the result (.sfd saves, other extensions generate)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Set the font version
    SetVersion {
        font: PathBuf,
        version: String,
        /// Where to write the result (.sfd saves, other extensions generate)
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.no_stdout)
    {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    common::init_tracing(&cli.global);

    let result = match cli.command {
        Commands::Config { action } => config::handle_config(action, &cli.global),
        Commands::Info { font } => info::handle_info(&font),
        Commands::Version(action) => version::handle_version(action),
        Commands::SetNames {
            font,
            pairs,
            output,
        } => edit::handle_set_names(&font, &pairs, &output),
        Commands::SetVersion {
            font,
            version,
            output,
        } => edit::handle_set_version(&font, &version, &output),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        logger::error(&e.to_string());
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
