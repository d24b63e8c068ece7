use anyhow::{Context, Result};
use docindex::pipeline::{IndexPipeline, RebuildReport};

use super::{Env, consolidate};

pub fn run(env: &Env, consolidate_first: bool) -> Result<()> {
    if consolidate_first {
        consolidate::run(env)?;
    }
    let report = IndexPipeline::new(&env.ctx)
        .rebuild()
        .context("Rebuild failed")?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RebuildReport) {
    println!("Indexed {} document(s)", report.documents);
    for index in &report.indexes {
        println!(
            "  {}: {} shard(s), {} stale removed",
            index.name, index.shards, index.stale_deleted
        );
    }
}
