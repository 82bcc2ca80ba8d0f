//! Shared utilities for integration testing.
//!
//! `FakeLedger` stands in for a node with the voting contract deployed: it
//! simulates calls, tracks nonces and mines every accepted transaction into
//! its own block.

#![allow(dead_code)]

use alloy::primitives::{address, keccak256, Address, Bytes, TxHash, U256};
use alloy::sol_types::{SolInterface, SolValue};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use voting_gateway::blockchain::wallet::DecodedTransaction;
use voting_gateway::blockchain::{
    BlockchainError, BlockchainResult, CallRequest, ContractBinding, ContractRevert, FeeMarketEstimate, Inclusion,
    LedgerGateway, Voting,
};
use voting_gateway::config::GatewayConfig;
use voting_gateway::{HttpServer, Shutdown};

// Anvil's first two accounts.
pub const OWNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const VOTER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const VOTER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

pub const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const CHAIN_ID: u64 = 31337;
pub const GAS_ESTIMATE: u64 = 90_000;

#[derive(Default)]
struct ContractState {
    candidates: Vec<(Voting::Candidate, U256)>,
    voted: HashSet<Address>,
}

impl ContractState {
    /// Run a call against the contract, mutating state only when `commit`.
    fn execute(&mut self, from: Address, data: &[u8], commit: bool) -> Result<Bytes, String> {
        let call = Voting::VotingCalls::abi_decode(data).map_err(|_| "unknown selector".to_string())?;

        let output = match call {
            Voting::VotingCalls::addCandidate(call) => {
                if from != OWNER {
                    return Err("Only owner can add candidates".into());
                }
                if commit {
                    self.candidates.push((call.candidate, U256::ZERO));
                }
                Vec::new()
            }
            Voting::VotingCalls::vote(call) => {
                if self.voted.contains(&from) {
                    return Err("Already voted".into());
                }
                if call.candidateId >= U256::from(self.candidates.len()) {
                    return Err("Invalid candidate".into());
                }
                let index = call.candidateId.to::<usize>();
                if commit {
                    self.candidates[index].1 += U256::from(1);
                    self.voted.insert(from);
                }
                Vec::new()
            }
            Voting::VotingCalls::getCandidates(_) => self
                .candidates
                .iter()
                .map(|(candidate, votes)| Voting::CandidateWithVotes {
                    candidate: candidate.clone(),
                    voteCount: *votes,
                })
                .collect::<Vec<_>>()
                .abi_encode(),
            Voting::VotingCalls::getWinner(_) => {
                let mut winner: Option<&(Voting::Candidate, U256)> = None;
                for entry in &self.candidates {
                    if winner.map_or(true, |w| entry.1 > w.1) {
                        winner = Some(entry);
                    }
                }
                winner
                    .map(|(candidate, _)| candidate.clone())
                    .unwrap_or(Voting::Candidate {
                        name: String::new(),
                        metadata: String::new(),
                    })
                    .abi_encode()
            }
        };
        Ok(Bytes::from(output))
    }
}

#[derive(Default)]
struct ChainState {
    contract: ContractState,
    nonces: HashMap<Address, u64>,
    seen: HashSet<TxHash>,
    block: u64,
}

/// In-memory node with the voting contract at [`CONTRACT`].
pub struct FakeLedger {
    chain: Mutex<ChainState>,
    gas_price: AtomicU64,
    available: AtomicBool,
    inclusion_delay_ms: AtomicU64,
}

impl FakeLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            chain: Mutex::new(ChainState::default()),
            gas_price: AtomicU64::new(1_000_000_000),
            available: AtomicBool::new(true),
            inclusion_delay_ms: AtomicU64::new(0),
        })
    }

    pub fn set_gas_price(&self, wei: u64) {
        self.gas_price.store(wei, Ordering::SeqCst);
    }

    /// Hold every submission this long before it is mined.
    pub fn set_inclusion_delay(&self, delay: Duration) {
        self.inclusion_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make every query fail as if the node went away.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> BlockchainResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BlockchainError::GatewayUnavailable("connection refused".into()))
        }
    }

    fn simulate(&self, call: &CallRequest) -> BlockchainResult<Bytes> {
        self.ensure_available()?;
        if call.to != CONTRACT {
            return Ok(Bytes::new());
        }
        let from = call.from.unwrap_or(Address::ZERO);
        let mut chain = self.chain.lock().unwrap();
        chain
            .contract
            .execute(from, &call.data, false)
            .map_err(|reason| {
                let message = format!("execution reverted: {}", reason);
                BlockchainError::from(ContractRevert::simulated(reason, message))
            })
    }
}

#[async_trait]
impl LedgerGateway for FakeLedger {
    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.ensure_available()?;
        Ok(self.gas_price.load(Ordering::SeqCst) as u128)
    }

    async fn fee_market(&self) -> BlockchainResult<FeeMarketEstimate> {
        self.ensure_available()?;
        let base = self.gas_price.load(Ordering::SeqCst) as u128;
        Ok(FeeMarketEstimate {
            max_fee_per_gas: base * 2,
            max_priority_fee_per_gas: 1_000_000_000,
        })
    }

    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.ensure_available()?;
        Ok(*self.chain.lock().unwrap().nonces.get(&address).unwrap_or(&0))
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        self.ensure_available()?;
        Ok(CHAIN_ID)
    }

    async fn estimate_gas(&self, call: &CallRequest) -> BlockchainResult<u64> {
        self.simulate(call).map(|_| GAS_ESTIMATE)
    }

    async fn call(&self, call: &CallRequest) -> BlockchainResult<Bytes> {
        self.simulate(call)
    }

    async fn submit_raw_transaction(&self, raw: &Bytes) -> BlockchainResult<Inclusion> {
        self.ensure_available()?;
        let delay = self.inclusion_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let decoded = DecodedTransaction::decode(raw)?;
        if decoded.chain_id != Some(CHAIN_ID) {
            return Err(BlockchainError::GatewayUnavailable("invalid chain id".into()));
        }

        let transaction_hash = keccak256(raw);
        let mut chain = self.chain.lock().unwrap();
        if chain.seen.contains(&transaction_hash) {
            return Err(BlockchainError::GatewayUnavailable("already known".into()));
        }
        let expected = *chain.nonces.get(&decoded.from).unwrap_or(&0);
        if decoded.nonce != expected {
            return Err(BlockchainError::GatewayUnavailable(format!(
                "nonce too low: next nonce {}, tx nonce {}",
                expected, decoded.nonce
            )));
        }

        chain.seen.insert(transaction_hash);
        chain.nonces.insert(decoded.from, expected + 1);
        chain.block += 1;

        let success = match decoded.to {
            Some(to) if to == CONTRACT => chain.contract.execute(decoded.from, &decoded.input, true).is_ok(),
            _ => true,
        };

        Ok(Inclusion {
            transaction_hash,
            block_number: Some(chain.block),
            success,
        })
    }
}

/// A gateway server running on an ephemeral port. Shuts down on drop.
pub struct TestGateway {
    pub url: String,
    pub ledger: Arc<FakeLedger>,
    shutdown: Shutdown,
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway over a fresh `FakeLedger`.
pub async fn spawn_gateway() -> TestGateway {
    spawn_gateway_with(|_| {}).await
}

pub async fn spawn_gateway_with(configure: impl FnOnce(&mut GatewayConfig)) -> TestGateway {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.contract.address = Some(CONTRACT.to_string());
    configure(&mut config);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let ledger = FakeLedger::new();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, ledger.clone(), ContractBinding::new(CONTRACT));
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    TestGateway {
        url: format!("http://{}", addr),
        ledger,
        shutdown,
    }
}
