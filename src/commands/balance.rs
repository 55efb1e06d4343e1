//! Check balances for every key in a key file.

use std::path::Path;

use crate::blockchain::{format_balance, BlockchainError, Wallet};
use crate::commands::{CommandError, CommandReport, Context};
use crate::ledger::BalanceRecord;
use crate::sequencer::{BatchItem, DelayPolicy, ItemSuccess, Sequencer};

/// A private key from the key file. Labelled by position, never by content.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyItem(pub String);

impl BatchItem for KeyItem {
    fn label(&self, index: usize) -> String {
        format!("key #{}", index + 1)
    }
}

impl std::fmt::Debug for KeyItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyItem(..)")
    }
}

pub async fn run_balance_check(
    ctx: &Context,
    key_file: &Path,
    network_choice: usize,
) -> Result<CommandReport, CommandError> {
    let network = ctx.registry.select(network_choice)?.clone();
    let keys: Vec<KeyItem> = ctx
        .store
        .load_key_list(key_file)?
        .into_iter()
        .map(KeyItem)
        .collect();

    tracing::info!(network = %network.name, keys = keys.len(), "Starting balance check");

    let mut report = ctx.store.begin_balance_report(&network)?;
    let network_name = network.name.clone();
    let gateway = ctx.gateway.as_ref();
    let policy = DelayPolicy::linear_ms(ctx.delays.balance_unit_ms);

    let mut sequencer = Sequencer::new("balance", &network, policy, ctx.sleeper.as_ref());
    let summary = sequencer
        .run(
            &keys,
            move |_, key: KeyItem| {
                let wallet = Wallet::from_private_key(&key.0);
                let network = network.clone();
                async move {
                    let address = wallet?.address();
                    let wei = gateway.balance_of(&network, address).await?;
                    let record = BalanceRecord {
                        address,
                        balance: format_balance(wei),
                        network,
                    };
                    Ok::<_, BlockchainError>(ItemSuccess {
                        subject: record.address.to_string(),
                        value: record.balance,
                    })
                }
            },
            &mut report,
        )
        .await?;

    Ok(CommandReport::Batch {
        operation: "balance",
        network: network_name,
        report: report.path().to_path_buf(),
        summary,
    })
}
