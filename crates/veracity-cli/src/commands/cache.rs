//! Cache maintenance command implementation.

use crate::cli::{CacheAction, CacheArgs};
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use veracity_cache::ResultCache;

/// Execute the cache command.
pub fn execute_cache(args: CacheArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    match args.action {
        CacheAction::Hash { file } => {
            let content = fs::read_to_string(file)?;
            println!("{}", ResultCache::content_hash(&content));
        }
        CacheAction::Purge => {
            let cache = connected(config)?;
            let removed = cache.purge_expired();
            cache.close();
            println!("{}", formatter.success(&format!("Purged {} expired entries", removed)));
        }
        CacheAction::Delete { hash } => {
            let cache = connected(config)?;
            let removed = cache.delete_verification(&hash);
            cache.close();
            if removed {
                println!("{}", formatter.success(&format!("Deleted cached result {}", hash)));
            } else {
                println!("{}", formatter.info(&format!("No cached result for {}", hash)));
            }
        }
    }

    Ok(())
}

fn connected(config: &AppConfig) -> Result<ResultCache> {
    let cache = ResultCache::open(config.cache.clone());
    cache.connect()?;
    Ok(cache)
}
