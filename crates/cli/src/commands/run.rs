//! `tradeprompt run`: Interactive request builder.

use std::path::Path;
use tradeprompt_builder::{RequestBuilder, Session};
use tradeprompt_config::AppConfig;
use tradeprompt_prompt::TerminalPrompt;

pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(path = %config_path.display(), "loading config");
    let config = AppConfig::load_at(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    let engine = tradeprompt_engine::build_from_config(&config.engine)?;
    let builder = RequestBuilder::new(&config);
    let mut session = Session::new(builder, engine.clone());

    println!();
    println!("  tradeprompt: FIX request builder");
    println!("  Engine:      {}", engine.name());
    println!("  Instrument:  {}", config.market_data.instrument.source);
    println!();

    let mut prompt = TerminalPrompt::stdio();
    let summary = session.run(&mut prompt)?;

    println!();
    println!(
        "  {} sent, {} declined, {} aborted",
        summary.sent, summary.declined, summary.aborted
    );
    Ok(())
}
