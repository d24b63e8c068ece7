use std::path::PathBuf;

use anyhow::Result;
use docindex::ingest::Ingestor;

use super::{Env, print_json, read_json_input};

pub fn run(env: &Env, file: Option<PathBuf>) -> Result<()> {
    let value = read_json_input(file.as_ref())?;
    let keys = Ingestor::new(&env.ctx).add_value(value)?;
    print_json(&keys)?;
    eprintln!(
        "Uploaded {} document(s). They become searchable after the next rebuild.",
        keys.len()
    );
    Ok(())
}
