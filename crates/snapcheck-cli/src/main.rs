use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "snapcheck")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Headless-browser verification of app pages with screenshot evidence",
    long_about = "Snapcheck drives a headless Chrome through fixed verification \
                  sequences against the locally served app and captures full-page \
                  screenshots as visual evidence."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the locally served app
    #[arg(long, global = true, default_value = "http://localhost:5173")]
    base_url: Url,

    /// Directory screenshots are written into
    #[arg(long, global = true, default_value = "verification")]
    output_dir: PathBuf,

    /// Path to the Chrome/Chromium binary
    #[arg(long, global = true)]
    chrome_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the status page renders its animation
    Status,

    /// Verify the reorder link repopulates the image canvas
    Reorder,

    /// Verify the canvas placeholder stays content-editable
    Placeholder,

    /// Verify the landing and order-history pages render
    Pages,

    /// Run every verification check in sequence
    All,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let ctx = commands::CheckContext {
        base_url: cli.base_url,
        output_dir: cli.output_dir,
        chrome_path: cli.chrome_path,
    };

    match cli.command {
        Commands::Status => commands::status::execute(&ctx),
        Commands::Reorder => commands::reorder::execute(&ctx),
        Commands::Placeholder => commands::placeholder::execute(&ctx),
        Commands::Pages => commands::pages::execute(&ctx),
        Commands::All => commands::all::execute(&ctx),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("snapcheck=debug,snapcheck_core=debug,snapcheck_browser=debug")
    } else {
        EnvFilter::new("snapcheck=info,snapcheck_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
