use std::path::Path;

use anyhow::{Context, Result};
use docindex::{ConfigStore, ConfigUpdate};

use super::{Env, print_json};

pub fn get(env: &Env) -> Result<()> {
    match ConfigStore::new(env.ctx.shared_store(), String::new()).get() {
        Ok(config) => print_json(&config),
        Err(e) if e.is_not_found() => {
            eprintln!("No config has been created");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn set(env: &Env, file: &Path, secret: String) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let update: ConfigUpdate =
        serde_json::from_str(&text).context("Invalid configuration update document")?;
    let config = ConfigStore::new(env.ctx.shared_store(), secret).update(update)?;
    println!("Updated search configuration ({} index(es))", config.configs.len());
    Ok(())
}
