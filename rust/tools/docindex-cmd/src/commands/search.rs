use anyhow::Result;
use docindex::federator::QueryFederator;

use super::{Env, print_json};

pub fn run(env: &Env, index: &str, query: &str, count: Option<usize>) -> Result<()> {
    let federator = QueryFederator::new(&env.ctx);
    let hits = match count {
        Some(count) => federator.query(index, query, count),
        None => federator.search(index, query),
    };
    match hits {
        Ok(hits) => print_json(&hits),
        Err(e) if e.is_not_found() => {
            eprintln!("No search index was found: {e}");
            print_json(&Vec::<docindex::SearchHit>::new())
        }
        Err(e) => Err(e.into()),
    }
}
