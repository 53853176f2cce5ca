//! AI-narrated text adventure for the terminal.
//!
//! An interactive REPL: menus for character management, free-text play
//! against an AI Dungeon Master, JSON saves on disk.

mod app;

use app::AppConfig;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    if std::env::var("ANTHROPIC_API_KEY").is_err() {
        eprintln!("Error: ANTHROPIC_API_KEY environment variable not set.");
        eprintln!("Please set it in .env file or with: export ANTHROPIC_API_KEY=your_key_here");
        std::process::exit(1);
    }

    let config = AppConfig::from_env();

    if let Err(e) = app::run(config).await {
        eprintln!("\nFatal error: {e}");
        std::process::exit(1);
    }
}
