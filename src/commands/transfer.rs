//! Transfer native currency from the funding key to one or many recipients.

use thiserror::Error;

use crate::blockchain::{parse_amount, BlockchainError, TransferRequest, Wallet};
use crate::commands::{CommandError, CommandReport, Context, TransferTarget};
use crate::oracle::OracleError;
use crate::sequencer::{BatchItem, DelayPolicy, ItemSuccess, Sequencer};

/// A recipient address as read from input; parsed per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient(pub String);

impl BatchItem for Recipient {
    fn label(&self, _index: usize) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Error)]
enum TransferItemError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Chain(#[from] BlockchainError),
}

pub async fn run_transfer(
    ctx: &Context,
    amount: &str,
    network_choice: usize,
    target: &TransferTarget,
) -> Result<CommandReport, CommandError> {
    parse_amount(amount).map_err(|e| CommandError::InvalidInput(e.to_string()))?;
    let network = ctx.registry.select(network_choice)?.clone();

    let (recipients, policy) = match target {
        TransferTarget::Manual(address) => {
            let address = address.trim();
            if address.is_empty() {
                return Err(CommandError::InvalidInput(
                    "Recipient address is required.".to_string(),
                ));
            }
            (
                vec![Recipient(address.to_string())],
                DelayPolicy::fixed_ms(ctx.delays.manual_transfer_ms),
            )
        }
        TransferTarget::File(path) => (
            ctx.store
                .load_address_list(path)?
                .into_iter()
                .map(Recipient)
                .collect::<Vec<_>>(),
            DelayPolicy::linear_ms(ctx.delays.transfer_unit_ms),
        ),
    };

    let sender = Wallet::from_private_key(&ctx.store.load_funding_key()?)
        .map_err(CommandError::FundingKey)?;

    tracing::info!(
        sender = %sender.address(),
        network = %network.name,
        recipients = recipients.len(),
        amount = amount,
        "Starting transfers"
    );

    let mut report = ctx.store.begin_transfer_report(&network)?;
    let network_name = network.name.clone();
    let gateway = ctx.gateway.as_ref();
    let oracle = ctx.oracle.as_ref();

    let mut sequencer = Sequencer::new("transfer", &network, policy, ctx.sleeper.as_ref());
    let summary = sequencer
        .run(
            &recipients,
            move |_, recipient: Recipient| {
                let request = TransferRequest::new(sender.clone(), &recipient.0, amount, network.clone());
                async move {
                    let request = request?;
                    let gas_price = oracle.fetch_gas_price().await?;
                    let hash = gateway.submit_transfer(&request, gas_price).await?;
                    Ok::<_, TransferItemError>(ItemSuccess {
                        subject: recipient.0,
                        value: hash.to_string(),
                    })
                }
            },
            &mut report,
        )
        .await?;

    Ok(CommandReport::Batch {
        operation: "transfer",
        network: network_name,
        report: report.path().to_path_buf(),
        summary,
    })
}
