use anyhow::Result;
use docindex::consolidator::{ConsolidationOutcome, Consolidator};

use super::Env;

pub fn run(env: &Env) -> Result<()> {
    match Consolidator::new(&env.ctx).run()? {
        ConsolidationOutcome::NothingToDo { pending } => {
            println!("No batching needed: {pending} pending object(s)");
        }
        ConsolidationOutcome::Consolidated {
            batch_key,
            documents,
            deleted,
        } => {
            println!("Batched {documents} document(s) from {deleted} object(s) into {batch_key}");
        }
    }
    Ok(())
}
