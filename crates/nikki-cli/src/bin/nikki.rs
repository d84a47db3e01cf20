//! CLI for Nikki lesson generation

use clap::Parser;
use nikki_cli::{build_service, commands, load_settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nikki")]
#[command(about = "Turn diary entries into Japanese manga lessons", long_about = None)]
struct Cli {
    /// Call the live model even if USE_MODEL_STUBS is set
    #[arg(long, global = true)]
    live: bool,

    /// JSON model settings file (replaces the environment)
    #[arg(long, short, global = true, env = "NIKKI_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Build a lesson from a diary entry
    Reflect {
        /// Diary entry
        entry: String,

        /// Proficiency level
        #[arg(long, short, default_value = "beginner")]
        level: String,
    },
    /// Draw a manga page from a `{manga_prompt, panels}` JSON file
    Manga {
        /// Input JSON file
        #[arg(long, short)]
        input: PathBuf,

        /// Write the image here instead of printing JSON (extension added if missing)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Build a lesson and draw its page
    Generate {
        /// Diary entry
        entry: String,

        /// Proficiency level
        #[arg(long, short, default_value = "beginner")]
        level: String,

        /// Also write the image to this file (extension added if missing)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nikki::config::load_dotenv();
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref(), cli.live)?;
    let service = build_service(settings);

    match &cli.command {
        Commands::Reflect { entry, level } => {
            commands::run_reflect(&service, entry, level).await?;
        }
        Commands::Manga { input, out } => {
            commands::run_manga(&service, input, out.as_deref()).await?;
        }
        Commands::Generate { entry, level, out } => {
            commands::run_generate(&service, entry, level, out.as_deref()).await?;
        }
    }

    Ok(())
}
