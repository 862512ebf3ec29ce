use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogwriter::ai::Tone;
use blogwriter::cli::commands::generate::GenerateOptions;

/// Parse tone from string
fn parse_tone(s: &str) -> Result<Tone, String> {
    s.parse::<Tone>().map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "blogwriter")]
#[command(version, about = "AI blog post writer backed by OpenRouter")]
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
    /// Write one blog post and print it
    Generate {
        #[arg(long, short, help = "Blog topic")]
        topic: String,
        #[arg(long, value_parser = parse_tone, default_value = "formal", help = "Tone: formal, casual, seo")]
        tone: Tone,
        #[arg(long, help = "Copy the post to the clipboard")]
        copy: bool,
        #[arg(long, short, help = "Save the post as blog-<topic>.txt")]
        download: bool,
        #[arg(long, short, help = "Directory for downloads (overrides config)")]
        output_dir: Option<PathBuf>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Interactive session: set topic and tone, generate, copy, download
    Interactive {
        #[arg(long, short, help = "Directory for downloads (overrides config)")]
        output_dir: Option<PathBuf>,
    },

    /// Show or toggle the dark/light theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme
    Show,
    /// Switch between dark and light
    Toggle,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective configuration
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Create the global configuration file
    Init {
        #[arg(long, short, help = "Overwrite existing config")]
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
        eprintln!("\x1b[31mBlogWriter encountered an unexpected error:\x1b[0m");
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
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<ExitCode> {
    // .env is optional
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            topic,
            tone,
            copy,
            download,
            output_dir,
            format,
        } => {
            let succeeded = blogwriter::cli::commands::generate::run(GenerateOptions {
                topic,
                tone,
                copy,
                download,
                output_dir,
                format,
            })?;
            if !succeeded {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Interactive { output_dir } => {
            blogwriter::cli::commands::interactive::run(output_dir)?;
        }
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => blogwriter::cli::commands::theme::show()?,
            ThemeAction::Toggle => blogwriter::cli::commands::theme::toggle()?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                blogwriter::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                blogwriter::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                blogwriter::cli::commands::config::init_global(force)?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
