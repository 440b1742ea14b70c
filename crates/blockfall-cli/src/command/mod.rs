use blockfall_engine::{GameSession, PieceSeed};
use clap::Parser;

use crate::{app::PlayApp, tui::Runtime};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Seed for a deterministic piece sequence (32 hex characters)
    #[clap(long)]
    seed: Option<PieceSeed>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let session = match args.seed {
        Some(seed) => GameSession::with_seed(seed),
        None => GameSession::new(),
    };

    let mut app = PlayApp::new(session);
    Runtime::new().run(&mut app)?;

    if let Some(score) = app.last_game_over_score() {
        println!("final score: {score}");
    }
    Ok(())
}
