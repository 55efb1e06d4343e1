//! clap argument definitions.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{Command, TransferTarget};

#[derive(Debug, Parser)]
#[command(name = "wallet-batch")]
#[command(about = "Generate wallets, batch-transfer native currency and check balances", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./wallet-batch.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate wallets and append them to the address and key logs
    Generate {
        #[arg(short = 'n', long)]
        count: usize,
    },
    /// Transfer from the funding key to one address or every address in a file
    #[command(group(ArgGroup::new("target").required(true).args(["to", "file"])))]
    Transfer {
        /// Amount in whole-currency units, e.g. 0.01
        #[arg(short, long)]
        amount: String,
        /// Network number as listed by the menu (1-based)
        #[arg(short = 'N', long)]
        network: usize,
        /// Single recipient address
        #[arg(long)]
        to: Option<String>,
        /// File with one recipient address per line
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check the balance of every key in a key file
    Balance {
        #[arg(short, long)]
        keys: PathBuf,
        /// Network number as listed by the menu (1-based)
        #[arg(short = 'N', long)]
        network: usize,
    },
    /// Interactive numbered menu (the default)
    Menu,
}

impl CliCommand {
    /// `None` means the interactive menu should supply the command.
    pub fn into_command(self) -> Option<Command> {
        match self {
            CliCommand::Generate { count } => Some(Command::Generate { count }),
            CliCommand::Transfer {
                amount,
                network,
                to,
                file,
            } => {
                let target = match (to, file) {
                    (Some(address), _) => TransferTarget::Manual(address),
                    (None, Some(path)) => TransferTarget::File(path),
                    (None, None) => return None,
                };
                Some(Command::Transfer {
                    amount,
                    network,
                    target,
                })
            }
            CliCommand::Balance { keys, network } => Some(Command::CheckBalance {
                key_file: keys,
                network,
            }),
            CliCommand::Menu => None,
        }
    }
}
