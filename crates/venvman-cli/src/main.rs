use clap::{Parser, Subcommand};
use std::path::PathBuf;
use venvman::commands::{
    bind,
    config::{self, ConfigAction},
    info, interpreters, scan, watch,
};
use venvman::common::GlobalOpts;
use venvman::startup;
use venvman_logger as logger;

#[derive(Parser)]
#[command(name = "venvman")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Python virtual-environment inspector",
    long_about = "venvman is a CLI tool for inspecting Python virtual environments: it finds venvs in a project tree, decorates them with interpreter metadata, and binds their interpreters to projects and modules."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show interpreter metadata for a virtual environment
    Info {
        /// Venv directory (or a file inside one)
        path: PathBuf,
    },
    /// Find virtual environments under a directory and decorate them
    Scan {
        /// Directory to scan (default: current directory)
        path: Option<PathBuf>,
    },
    /// Scan, then keep decorations fresh as pyvenv.cfg files change
    Watch {
        /// Directory to watch (default: current directory)
        path: Option<PathBuf>,
    },
    /// Bind a virtual environment's interpreter to a project or module
    Bind {
        #[command(subcommand)]
        action: bind::BindAction,
    },
    /// List registered interpreters
    Interpreters,
    /// Configure decoration and warning settings
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    startup::warn_if_python_missing();

    match cli.command {
        Commands::Info { path } => {
            if let Err(e) = info::handle_info(&path, &cli.global) {
                logger::error(&e);
                std::process::exit(1);
            }
        }
        Commands::Scan { path } => {
            if let Err(e) = scan::handle_scan(path, &cli.global) {
                logger::error(&e);
                std::process::exit(1);
            }
        }
        Commands::Watch { path } => {
            if let Err(e) = watch::handle_watch(path, &cli.global) {
                logger::error(&e);
                std::process::exit(1);
            }
        }
        Commands::Bind { action } => {
            if let Err(e) = bind::handle_bind(action, &cli.global) {
                logger::error(&e);
                std::process::exit(1);
            }
        }
        Commands::Interpreters => {
            if let Err(e) = interpreters::handle_interpreters(&cli.global) {
                logger::error(&e);
                std::process::exit(1);
            }
        }
        Commands::Config { action } => {
            config::handle_config(action, cli.global);
        }
    }
}
