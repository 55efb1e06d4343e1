//! End-to-end command runs over scripted chain and oracle collaborators.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use tempfile::TempDir;

use wallet_batch::blockchain::Wallet;
use wallet_batch::commands::TransferTarget;
use wallet_batch::ledger::{LedgerError, RUN_HEADER_PREFIX};
use wallet_batch::network::RegistryError;
use wallet_batch::{dispatch, Command, CommandError, CommandReport};

mod common;
use common::{harness, read_lines, ScriptedGateway, ScriptedOracle, KEY_0, KEY_1, KEY_2};

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

fn address_of(key: &str) -> Address {
    Wallet::from_private_key(key).unwrap().address()
}

fn summary_of(report: &CommandReport) -> (usize, usize, usize) {
    match report {
        CommandReport::Batch { summary, .. } => (summary.processed, summary.succeeded, summary.failed),
        other => panic!("expected batch report, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_appends_credentials() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path(), ScriptedGateway::default(), ScriptedOracle::fixed(1));

    let report = dispatch(Command::Generate { count: 3 }, &h.ctx).await.unwrap();
    let CommandReport::Generated { addresses, address_log } = report else {
        panic!("expected generate report");
    };

    let lines = read_lines(&address_log);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| !l.is_empty()));
    assert_eq!(lines.iter().collect::<HashSet<_>>().len(), 3);
    assert_eq!(
        lines,
        addresses.iter().map(|a| a.to_string()).collect::<Vec<_>>()
    );

    let keys = read_lines(&dir.path().join("key.txt"));
    for (key, address) in keys.iter().zip(&addresses) {
        assert_eq!(address_of(key), *address);
    }

    dispatch(Command::Generate { count: 2 }, &h.ctx).await.unwrap();
    assert_eq!(read_lines(&address_log).len(), 5);
    assert_eq!(read_lines(&dir.path().join("key.txt")).len(), 5);
}

#[tokio::test]
async fn test_balance_check_records_every_key_in_order() {
    let dir = TempDir::new().unwrap();
    let mut gateway = ScriptedGateway::default();
    gateway.balances.insert(address_of(KEY_0), U256::from(ONE_ETHER));
    gateway.balances.insert(address_of(KEY_2), U256::from(ONE_ETHER / 4));
    let h = harness(dir.path(), gateway, ScriptedOracle::fixed(1));

    let key_file = dir.path().join("key.txt");
    fs::write(&key_file, format!("{}\n{}\nnot-a-key\n{}\n", KEY_0, KEY_1, KEY_2)).unwrap();

    let report = dispatch(
        Command::CheckBalance {
            key_file: key_file.clone(),
            network: 2,
        },
        &h.ctx,
    )
    .await
    .unwrap();
    assert_eq!(summary_of(&report), (4, 2, 2));

    let report_path = dir.path().join("sisa-saldo-polygon.txt");
    let lines = read_lines(&report_path);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("{}: 1.0 Polygon", address_of(KEY_0)));
    assert_eq!(lines[1], "key #2: FAILED RPC error: node unavailable Polygon");
    assert!(lines[2].starts_with("key #3: FAILED Wallet error: Invalid private key format"));
    assert!(lines[2].ends_with(" Polygon"));
    assert_eq!(lines[3], format!("{}: 0.25 Polygon", address_of(KEY_2)));
    assert!(!lines.iter().any(|l| l.contains(&KEY_1[2..])));

    // Linear 1s unit
    assert_eq!(
        *h.sleeper.delays.lock().unwrap(),
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
            Duration::from_secs(4)
        ]
    );
    // The bad key never reached the node
    assert_eq!(h.gateway.calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_balance_report_only_holds_latest_run() {
    let dir = TempDir::new().unwrap();
    let mut gateway = ScriptedGateway::default();
    gateway.balances.insert(address_of(KEY_0), U256::from(ONE_ETHER));
    gateway.balances.insert(address_of(KEY_1), U256::from(2 * ONE_ETHER));
    let h = harness(dir.path(), gateway, ScriptedOracle::fixed(1));

    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, format!("{}\n", KEY_0)).unwrap();
    fs::write(&second, format!("{}\n", KEY_1)).unwrap();

    for key_file in [first, second] {
        dispatch(Command::CheckBalance { key_file, network: 5 }, &h.ctx)
            .await
            .unwrap();
    }

    let lines = read_lines(&dir.path().join("sisa-saldo-arbitrum.txt"));
    assert_eq!(lines, vec![format!("{}: 2.0 Arbitrum", address_of(KEY_1))]);
}

#[tokio::test]
async fn test_transfer_from_file_isolates_failures() {
    let dir = TempDir::new().unwrap();
    let rejected = address_of(KEY_2);
    let mut gateway = ScriptedGateway::default();
    gateway.reject.insert(rejected);
    let h = harness(dir.path(), gateway, ScriptedOracle::fixed(3_000_000_000));

    fs::write(dir.path().join("key-utama.txt"), format!("{}\n", KEY_0)).unwrap();
    let recipients = dir.path().join("recipients.txt");
    let good = address_of(KEY_1);
    fs::write(
        &recipients,
        format!("{}\n0xnot-an-address\n{}\n{}\n", good, rejected, good),
    )
    .unwrap();

    let report = dispatch(
        Command::Transfer {
            amount: "0.01".to_string(),
            network: 1,
            target: TransferTarget::File(recipients),
        },
        &h.ctx,
    )
    .await
    .unwrap();
    assert_eq!(summary_of(&report), (4, 2, 2));

    let lines = read_lines(&dir.path().join("transfer-binance-smart-chain-bsc.txt"));
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with(RUN_HEADER_PREFIX));
    assert!(lines[1].starts_with(&format!("{}: 0x", good)));
    assert!(lines[1].ends_with(" Binance Smart Chain (BSC)"));
    assert!(lines[2].starts_with("0xnot-an-address: FAILED Invalid address"));
    assert!(lines[3].starts_with(&format!("{}: FAILED Transaction rejected", rejected)));
    assert!(lines[4].starts_with(&format!("{}: 0x", good)));

    let calls = h.gateway.calls.lock().unwrap().clone();
    let value = U256::from(ONE_ETHER / 100);
    assert_eq!(
        calls,
        vec![
            format!("transfer {} {} 3000000000 56", good, value),
            format!("transfer {} {} 3000000000 56", rejected, value),
            format!("transfer {} {} 3000000000 56", good, value),
        ]
    );

    let delays = h.sleeper.delays.lock().unwrap().clone();
    assert_eq!(delays.len(), 4);
    assert!(delays.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(delays[0], Duration::from_secs(10));
}

#[tokio::test]
async fn test_transfer_report_keeps_every_run() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path(), ScriptedGateway::default(), ScriptedOracle::fixed(1));
    fs::write(dir.path().join("key-utama.txt"), KEY_0).unwrap();

    let recipients = [address_of(KEY_1), address_of(KEY_2)];
    for recipient in &recipients {
        dispatch(
            Command::Transfer {
                amount: "0.5".to_string(),
                network: 1,
                target: TransferTarget::Manual(recipient.to_string()),
            },
            &h.ctx,
        )
        .await
        .unwrap();
    }

    let lines = read_lines(&dir.path().join("transfer-binance-smart-chain-bsc.txt"));
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with(RUN_HEADER_PREFIX));
    assert_eq!(
        lines[1],
        format!("{}: {} Binance Smart Chain (BSC)", recipients[0], TxHash::with_last_byte(1))
    );
    assert!(lines[2].starts_with(RUN_HEADER_PREFIX));
    assert_eq!(
        lines[3],
        format!("{}: {} Binance Smart Chain (BSC)", recipients[1], TxHash::with_last_byte(2))
    );
}

#[tokio::test]
async fn test_manual_transfer_with_oracle_failure() {
    let dir = TempDir::new().unwrap();
    let mut oracle = ScriptedOracle::fixed(1);
    oracle.fail_on.insert(0);
    let h = harness(dir.path(), ScriptedGateway::default(), oracle);
    fs::write(dir.path().join("key-utama.txt"), KEY_0).unwrap();

    let recipient = address_of(KEY_1).to_string();
    let report = dispatch(
        Command::Transfer {
            amount: "1".to_string(),
            network: 3,
            target: TransferTarget::Manual(recipient.clone()),
        },
        &h.ctx,
    )
    .await
    .unwrap();

    assert_eq!(summary_of(&report), (1, 0, 1));
    let lines = read_lines(&dir.path().join("transfer-ethereum.txt"));
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(RUN_HEADER_PREFIX));
    assert_eq!(
        lines[1],
        format!(
            "{}: FAILED gas price oracle unavailable: response has no '/data/rapid' value Ethereum",
            recipient
        )
    );
    assert_eq!(*h.sleeper.delays.lock().unwrap(), vec![Duration::from_secs(10)]);
    assert!(h.gateway.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_input_errors_stop_before_any_item() {
    let dir = TempDir::new().unwrap();
    let h = harness(dir.path(), ScriptedGateway::default(), ScriptedOracle::fixed(1));
    let recipients = dir.path().join("recipients.txt");
    fs::write(&recipients, format!("{}\n", address_of(KEY_1))).unwrap();

    let transfer = |amount: &str, network: usize, target: TransferTarget| Command::Transfer {
        amount: amount.to_string(),
        network,
        target,
    };

    let err = dispatch(transfer("ten", 1, TransferTarget::File(recipients.clone())), &h.ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidInput(_)));

    let err = dispatch(transfer("1", 6, TransferTarget::File(recipients.clone())), &h.ctx)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Registry(RegistryError::IndexOutOfRange { selection: 6, len: 5 })
    ));

    let err = dispatch(transfer("1", 1, TransferTarget::Manual("  ".to_string())), &h.ctx)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Recipient address is required.");

    let err = dispatch(
        transfer("1", 1, TransferTarget::File(PathBuf::from("/no/such/file.txt"))),
        &h.ctx,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CommandError::Ledger(LedgerError::FileNotFound { .. })));

    // No funding key yet
    let err = dispatch(transfer("1", 1, TransferTarget::File(recipients)), &h.ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::Ledger(LedgerError::FileNotFound { .. })));

    let empty = dir.path().join("empty.txt");
    fs::write(&empty, "\n\n").unwrap();
    let err = dispatch(Command::CheckBalance { key_file: empty, network: 1 }, &h.ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, CommandError::Ledger(LedgerError::EmptyFile { .. })));
    assert!(err.is_input_error());

    assert!(h.sleeper.delays.lock().unwrap().is_empty());
    assert!(h.gateway.calls.lock().unwrap().is_empty());
    assert!(!dir.path().join("transfer-binance-smart-chain-bsc.txt").exists());
}
