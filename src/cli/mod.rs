use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::config;
use crate::domain::{catalog::Catalog, selection::AlbumSelection};
use crate::http::server::HttpServer;
use crate::quiz::{
    generator::{QuizSettings, generate_questions},
    random::RngSource,
    session::QuizSession,
};

mod play;

#[derive(Parser)]
#[command(name = "triplequiz")]
#[command(version = "0.1")]
#[command(about = "Guess three tracks playing at once")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List albums available in the catalog
    Albums,
    /// Print a generated question set as JSON
    Quiz {
        /// Comma separated album ids
        #[arg(short, long)]
        albums: String,
        /// Number of questions, overrides the config
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Play a quiz in the terminal
    Play {
        /// Comma separated album ids
        #[arg(short, long)]
        albums: String,
    },
    /// Run http server exposing the quiz engine
    Serve,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::Config::load(&cli.config)?;
    let catalog = Catalog::load(&cfg.catalog.path)?;
    info!(
        "Loaded catalog {} with {} albums",
        cfg.catalog.path.to_string_lossy(),
        catalog.albums().count()
    );

    match cli.command {
        Commands::Albums => {
            for entry in catalog.albums() {
                println!(
                    "{}  {} / {} ({} tracks)",
                    entry.album.id,
                    entry.artist.name,
                    entry.album.name,
                    entry.album.tracks.len()
                );
            }
        }

        Commands::Quiz { albums, count } => {
            let settings = QuizSettings {
                question_count: count.unwrap_or(cfg.quiz.question_count),
                ..cfg.quiz
            };
            let selection = AlbumSelection::parse(Some(albums.as_str()));
            anyhow::ensure!(!selection.is_empty(), "No albums selected");

            let tracks = catalog.tracks_for_albums(selection.ids());
            let questions = generate_questions(&tracks, &settings, &mut RngSource::thread())?;
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }

        Commands::Play { albums } => {
            let selection = AlbumSelection::parse(Some(albums.as_str()));
            let mut session =
                QuizSession::start(&catalog, selection, cfg.quiz, &mut RngSource::thread())?;

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            play::play(&mut session, stdin.lock(), stdout.lock())
                .context("Terminal quiz failed")?;
        }

        Commands::Serve => {
            let http_server = HttpServer::new(catalog, cfg.quiz, cfg.http);

            println!(
                "HTTP server running at http://{}:{}",
                http_server.config.bind_addr, http_server.config.port
            );
            http_server.run();
        }
    }

    Ok(())
}
