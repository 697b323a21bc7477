//! `tradeprompt config`: Configuration management commands.

use std::path::Path;
use tradeprompt_config::{AppConfig, EngineKind, InstrumentSource};

pub fn validate(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating configuration...");

    match AppConfig::load_at(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Engine:       {}", config.engine.kind);
            println!("   Instrument:   {}", config.market_data.instrument.source);
            println!("   Entry types:  {}", config.market_data.entry_types.len());
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

/// Settings that are valid but probably not what the operator wants.
fn warnings(config: &AppConfig) -> Vec<&'static str> {
    let mut warnings = Vec::new();

    if config.engine.kind == EngineKind::Console {
        warnings.push("Console engine only prints messages; nothing is handed to a FIX session");
    }

    let instrument = &config.market_data.instrument;
    if instrument.source == InstrumentSource::Random && instrument.seed.is_none() {
        warnings.push("Random instrument source without a seed is not reproducible");
    }

    if !config.unique_request_ids {
        warnings.push("Request IDs are reused across requests (unique_request_ids = false)");
    }

    warnings
}

pub fn show(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_at(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn init(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.");
        return Ok(());
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    Ok(())
}
