//! Interactive numbered menu.
//!
//! Reads one answer per prompt and builds a [`Command`]. Any invalid answer
//! ends the session with a rejection message; nothing has run at that point.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::commands::{Command, TransferTarget};
use crate::network::NetworkRegistry;

#[derive(Debug, Error)]
pub enum MenuError {
    /// The answer was rejected; the message is shown to the operator.
    #[error("{0}")]
    Rejected(String),

    #[error("input closed")]
    Closed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn rejected(message: &str) -> MenuError {
    MenuError::Rejected(message.to_string())
}

struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    fn ask(&mut self, prompt: &str) -> Result<String, MenuError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// A positive integer no greater than `max`.
    fn ask_choice(&mut self, prompt: &str, max: usize, rejection: &str) -> Result<usize, MenuError> {
        let answer = self.ask(prompt)?;
        match answer.parse::<usize>() {
            Ok(n) if n >= 1 && n <= max => Ok(n),
            _ => Err(rejected(rejection)),
        }
    }

    fn ask_network(&mut self, heading: &str, registry: &NetworkRegistry) -> Result<usize, MenuError> {
        let prompt = format!("{}\n{}\n", heading, registry.menu_lines().join("\n"));
        self.ask_choice(&prompt, registry.len(), "Invalid network selection.")
    }
}

/// Walk the operator through the menu and return the chosen command.
pub fn prompt_command<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    registry: &NetworkRegistry,
) -> Result<Command, MenuError> {
    let mut p = Prompter { input, output };

    let script = p.ask_choice(
        "Enter the script number to run:\n1. Generate Wallets\n2. Transfer Tokens\n3. Check Balance\n",
        3,
        "Invalid script number. Please enter either 1, 2, or 3.",
    )?;

    match script {
        1 => {
            let count = p.ask_choice(
                "Enter the number of wallets to generate: ",
                usize::MAX,
                "Invalid number of wallets.",
            )?;
            Ok(Command::Generate { count })
        }
        2 => {
            let amount = p.ask("Enter the amount of tokens to transfer: ")?;
            let network = p.ask_network("Select the network for token transfer:", registry)?;
            let method = p.ask_choice(
                "Select transfer method:\n1. Manual - Enter recipient address\n2. File - Use addresses from a file\n",
                2,
                "Invalid transfer method. Please enter either 1 or 2.",
            )?;

            let target = if method == 1 {
                let address = p.ask("Enter the recipient address: ")?;
                if address.is_empty() {
                    return Err(rejected("Recipient address is required."));
                }
                TransferTarget::Manual(address)
            } else {
                let path = p.ask("Enter the path to the file containing recipient addresses: ")?;
                if path.is_empty() {
                    return Err(rejected("A recipient file path is required."));
                }
                TransferTarget::File(PathBuf::from(path))
            };

            Ok(Command::Transfer {
                amount,
                network,
                target,
            })
        }
        _ => {
            let path = p.ask("Enter the path to the private key file: ")?;
            if path.is_empty() {
                return Err(rejected("A private key file path is required."));
            }
            let network = p.ask_network("Select the network for balance checking:", registry)?;
            Ok(Command::CheckBalance {
                key_file: PathBuf::from(path),
                network,
            })
        }
    }
}
