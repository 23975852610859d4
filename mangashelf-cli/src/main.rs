//! Mangashelf CLI - Command-line interface over a manga library file

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ChapterArgs, ViewArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mangashelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the mangas of a library that pass the search and filters
    List {
        /// Library file (snapshot object or array of mangas)
        library: String,

        #[command(flatten)]
        view: ViewArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display information about a manga
    Info {
        /// Library file
        library: String,

        /// Manga id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the chapters of a manga
    Chapters {
        /// Library file
        library: String,

        /// Manga id
        id: i64,

        #[command(flatten)]
        args: ChapterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count read and download progress of the visible mangas
    Stats {
        /// Library file
        library: String,

        #[command(flatten)]
        view: ViewArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a library file for inconsistent records
    Validate {
        /// Library file
        library: String,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "mangashelf_cli=debug,mangashelf_core=debug"
    } else {
        "mangashelf_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::List {
            library,
            view,
            json,
        } => {
            let library = commands::load_library(&library).await?;
            commands::list(&library, &view, json)
        }

        Commands::Info { library, id, json } => {
            let library = commands::load_library(&library).await?;
            commands::info(&library, id, json)
        }

        Commands::Chapters {
            library,
            id,
            args,
            json,
        } => {
            let library = commands::load_library(&library).await?;
            commands::chapters(&library, id, &args, json)
        }

        Commands::Stats {
            library,
            view,
            json,
        } => {
            let library = commands::load_library(&library).await?;
            commands::stats(&library, &view, json)
        }

        Commands::Validate { library, strict } => {
            let library = commands::load_library(&library).await?;
            commands::validate(&library, strict)
        }
    }
}
