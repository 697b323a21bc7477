//! `tradeprompt status`: Show the effective configuration.

use std::path::Path;
use tradeprompt_config::AppConfig;

pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_at(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let md = &config.market_data;

    println!("tradeprompt status");
    println!("==================");
    println!("  Config file:     {}", config_path.display());
    println!("  Engine:          {}", config.engine.kind);
    if let Some(journal) = &config.engine.journal_path {
        println!("  Journal:         {}", journal.display());
    }
    println!("  MDReqID:         {}", md.md_req_id);
    println!("  Subscription:    {}", md.subscription_request_type.code());
    println!("  Market depth:    {}", md.market_depth);
    println!("  Instrument:      {}", md.instrument.source);
    println!("  SecurityReqID:   {}", config.security_list.security_req_id);
    println!(
        "  Unique IDs:      {}",
        if config.unique_request_ids { "yes" } else { "no" }
    );

    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file: run `tradeprompt config init` to create one");
    }

    Ok(())
}
