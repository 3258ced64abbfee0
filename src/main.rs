use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hr_analytics::cli::FilterArgs;
use hr_analytics::cli::commands;

#[derive(Parser)]
#[command(name = "hr-analytics")]
#[command(
    version,
    about = "HR analytics over per-country employee exports, with a rule-based assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize HR Analytics in the current directory
    Init {
        #[arg(long, short, help = "Overwrite existing initialization")]
        force: bool,
    },

    /// Load the per-country CSV exports into the store
    Load {
        #[arg(long, help = "Directory holding the raw exports (overrides config)")]
        raw_dir: Option<PathBuf>,
    },

    /// Export the employees table to CSV
    Export {
        #[arg(long, short, help = "Output file (default: export.employees_csv)")]
        output: Option<PathBuf>,
    },

    /// Show the employees table layout
    Inspect {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Cross-country workforce KPIs
    Kpis {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// KPI cards and department views for a selection
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Ask an HR question (interactive when no question is given)
    Ask {
        #[arg(help = "Question, e.g. \"Which department has highest attrition?\"")]
        question: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Build and save the summary report for a selection
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, short, help = "Report directory (default: export.report_dir)")]
        output: Option<PathBuf>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Generate AI insights for a selection
    Insights {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Upload the per-country exports to Google Sheets, one worksheet each
    Upload {
        #[arg(long, help = "Directory holding the raw exports (overrides config)")]
        raw_dir: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mhr-analytics encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { force } => commands::init::run(force)?,
        Commands::Load { raw_dir } => commands::load::run(raw_dir)?,
        Commands::Export { output } => commands::export::run(output)?,
        Commands::Inspect { format } => commands::inspect::run(&format)?,
        Commands::Kpis { format } => commands::kpis::run(&format)?,
        Commands::Dashboard { filter, format } => commands::dashboard::run(&filter, &format)?,
        Commands::Ask { question, filter } => commands::ask::run(question, &filter)?,
        Commands::Report {
            filter,
            output,
            format,
        } => commands::report::run(&filter, output, &format)?,
        Commands::Insights { filter } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::insights::run(&filter))?;
        }
        Commands::Upload { raw_dir } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::upload::run(raw_dir))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => commands::config::show(global, &format)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { global, force } => {
                if global {
                    commands::config::init_global(force)?;
                } else {
                    commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
