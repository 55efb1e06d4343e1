//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use wallet_batch::blockchain::{BlockchainError, BlockchainResult, ChainGateway, TransferRequest};
use wallet_batch::config::{AppConfig, FilesConfig};
use wallet_batch::ledger::LedgerStore;
use wallet_batch::network::{Network, NetworkRegistry};
use wallet_batch::oracle::{GasPriceSource, OracleError};
use wallet_batch::sequencer::Sleeper;
use wallet_batch::Context;

// Anvil's first three dev accounts.
pub const KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_1: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const KEY_2: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";

/// Serve one fixed HTTP response to every connection; returns the bound address.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain the request head before answering
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Chain gateway driven by fixed balances and a list of rejected recipients.
#[derive(Default)]
pub struct ScriptedGateway {
    pub balances: HashMap<Address, U256>,
    pub reject: HashSet<Address>,
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl ChainGateway for ScriptedGateway {
    async fn balance_of(&self, network: &Network, address: Address) -> BlockchainResult<U256> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("balance {} {}", address, network.chain_id));
        self.balances
            .get(&address)
            .copied()
            .ok_or_else(|| BlockchainError::Rpc("node unavailable".to_string()))
    }

    async fn submit_transfer(
        &self,
        request: &TransferRequest,
        gas_price: u128,
    ) -> BlockchainResult<TxHash> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(format!(
            "transfer {} {} {} {}",
            request.recipient, request.value, gas_price, request.network.chain_id
        ));
        if self.reject.contains(&request.recipient) {
            return Err(BlockchainError::Rejected("insufficient funds for gas * price + value".to_string()));
        }
        Ok(TxHash::with_last_byte(calls.len() as u8))
    }
}

/// Oracle returning a fixed price, or failing on chosen calls (0-based).
pub struct ScriptedOracle {
    pub price: u128,
    pub fail_on: HashSet<usize>,
    pub calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn fixed(price: u128) -> Self {
        Self {
            price,
            fail_on: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GasPriceSource for ScriptedOracle {
    async fn fetch_gas_price(&self) -> Result<u128, OracleError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            return Err(OracleError::Unavailable("response has no '/data/rapid' value".to_string()));
        }
        Ok(self.price)
    }
}

/// Records requested delays without waiting.
#[derive(Default)]
pub struct RecordingSleeper {
    pub delays: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

pub struct Harness {
    pub gateway: Arc<ScriptedGateway>,
    pub oracle: Arc<ScriptedOracle>,
    pub sleeper: Arc<RecordingSleeper>,
    pub ctx: Context,
}

/// Context over default networks and delays, with files under `data_dir`.
pub fn harness(data_dir: &Path, gateway: ScriptedGateway, oracle: ScriptedOracle) -> Harness {
    let config = AppConfig {
        files: FilesConfig {
            data_dir: data_dir.to_path_buf(),
            ..FilesConfig::default()
        },
        ..AppConfig::default()
    };

    let gateway = Arc::new(gateway);
    let oracle = Arc::new(oracle);
    let sleeper = Arc::new(RecordingSleeper::default());

    let ctx = Context {
        registry: NetworkRegistry::from_config(&config.networks).unwrap(),
        store: LedgerStore::new(&config.files),
        delays: config.delays.clone(),
        gateway: gateway.clone(),
        oracle: oracle.clone(),
        sleeper: sleeper.clone(),
    };

    Harness {
        gateway,
        oracle,
        sleeper,
        ctx,
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
