//! Nullable backend: thread-safe in-memory chain state for testing.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use pchain_transactions::{BaseTx, CreateSubnetTx, Owner, SignedTx, UnsignedTx, Utxo};
use pchain_types::{ChainContext, Id, PLATFORM_CHAIN_ID};
use pchain_wallet_core::{BackendError, BuilderBackend};

/// An in-memory UTXO and transaction source.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullBackend {
    context: ChainContext,
    utxos: Mutex<HashMap<Id, Vec<Utxo>>>,
    txs: Mutex<HashMap<Id, SignedTx>>,
    latency: Mutex<Option<Duration>>,
    utxo_failure: Mutex<Option<BackendError>>,
    tx_failure: Mutex<Option<BackendError>>,
    utxo_calls: AtomicUsize,
    tx_calls: AtomicUsize,
}

impl NullBackend {
    pub fn new(context: ChainContext) -> Self {
        Self {
            context,
            utxos: Mutex::new(HashMap::new()),
            txs: Mutex::new(HashMap::new()),
            latency: Mutex::new(None),
            utxo_failure: Mutex::new(None),
            tx_failure: Mutex::new(None),
            utxo_calls: AtomicUsize::new(0),
            tx_calls: AtomicUsize::new(0),
        }
    }

    /// Append a UTXO to `chain_id`'s set. Order of insertion is the order
    /// the builder will see.
    pub fn add_utxo(&self, chain_id: Id, utxo: Utxo) {
        self.utxos
            .lock()
            .unwrap()
            .entry(chain_id)
            .or_default()
            .push(utxo);
    }

    pub fn add_tx(&self, tx_id: Id, tx: SignedTx) {
        self.txs.lock().unwrap().insert(tx_id, tx);
    }

    /// Record a subnet created by a transaction with id `subnet_id`.
    pub fn add_subnet(&self, subnet_id: Id, owner: impl Into<Owner>) {
        let tx = UnsignedTx::CreateSubnet(CreateSubnetTx {
            base: BaseTx {
                network_id: self.context.network_id,
                blockchain_id: PLATFORM_CHAIN_ID,
                inputs: Vec::new(),
                outputs: Vec::new(),
                memo: Vec::new(),
            },
            owner: owner.into(),
        });
        self.add_tx(subnet_id, SignedTx::new(tx));
    }

    /// Delay every subsequent call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// Make every subsequent `utxos` call fail with `err`.
    pub fn fail_utxos(&self, err: BackendError) {
        *self.utxo_failure.lock().unwrap() = Some(err);
    }

    /// Make every subsequent `get_tx` call fail with `err`.
    pub fn fail_get_tx(&self, err: BackendError) {
        *self.tx_failure.lock().unwrap() = Some(err);
    }

    pub fn utxo_calls(&self) -> usize {
        self.utxo_calls.load(Ordering::SeqCst)
    }

    pub fn tx_calls(&self) -> usize {
        self.tx_calls.load(Ordering::SeqCst)
    }

    fn latency(&self) -> Option<Duration> {
        *self.latency.lock().unwrap()
    }
}

async fn respond<T>(
    latency: Option<Duration>,
    result: Result<T, BackendError>,
) -> Result<T, BackendError> {
    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
    result
}

impl BuilderBackend for NullBackend {
    fn context(&self) -> &ChainContext {
        &self.context
    }

    fn utxos(&self, chain_id: Id) -> impl Future<Output = Result<Vec<Utxo>, BackendError>> + Send {
        self.utxo_calls.fetch_add(1, Ordering::SeqCst);
        let result = match self.utxo_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self
                .utxos
                .lock()
                .unwrap()
                .get(&chain_id)
                .cloned()
                .unwrap_or_default()),
        };
        respond(self.latency(), result)
    }

    fn get_tx(&self, tx_id: Id) -> impl Future<Output = Result<SignedTx, BackendError>> + Send {
        self.tx_calls.fetch_add(1, Ordering::SeqCst);
        let result = match self.tx_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => self
                .txs
                .lock()
                .unwrap()
                .get(&tx_id)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(format!("tx {tx_id}"))),
        };
        respond(self.latency(), result)
    }
}
