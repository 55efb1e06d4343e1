//! Generate wallets and append them to the credential logs.

use crate::accounts::AccountProvider;
use crate::commands::{CommandError, CommandReport, Context};
use crate::observability::metrics;

/// Generate `count` accounts, then persist each one.
///
/// Nothing is written if any account fails to generate.
pub fn run_generate(ctx: &Context, count: usize) -> Result<CommandReport, CommandError> {
    let accounts = AccountProvider::new(&ctx.registry).generate(count)?;

    for (i, account) in accounts.iter().enumerate() {
        ctx.store.append_credential(account)?;
        tracing::info!(
            item = i + 1,
            address = %account.address,
            network = %account.network.name,
            "Generated wallet"
        );
    }
    metrics::record_generated(accounts.len());

    Ok(CommandReport::Generated {
        addresses: accounts.iter().map(|a| a.address).collect(),
        address_log: ctx.store.address_log_path(),
    })
}
