//! Reputation command implementation.

use crate::cli::ReputationArgs;
use crate::error::Result;
use crate::output::Formatter;
use veracity_domain::DomainReputationIndex;

/// Execute the reputation command.
pub fn execute_reputation(args: ReputationArgs, formatter: &Formatter) -> Result<()> {
    let index = DomainReputationIndex::builtin();
    let entries: Vec<_> = args
        .domains
        .into_iter()
        .map(|domain| {
            let entry = index.lookup(&domain);
            (domain, entry)
        })
        .collect();

    println!("{}", formatter.format_reputation(&entries)?);
    Ok(())
}
