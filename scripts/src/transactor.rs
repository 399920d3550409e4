//! Submission and confirmation of contract calls

use std::{future::Future, time::Duration};

use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use tracing::debug;

use crate::{errors::ScriptError, types::Identity};

/// A state-changing call to a contract method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// The contract being called
    pub to: Address,
    /// The identity signing the transaction
    pub signer: Identity,
    /// The name of the method being called
    pub method: &'static str,
    /// The ABI-encoded calldata
    pub calldata: Bytes,
    /// The gas limit of the transaction
    pub gas_limit: u64,
}

/// Submits calls to the network and waits on their receipts
pub trait Transactor {
    /// Sign and submit a call, returning the hash of its transaction
    fn send(&self, call: ContractCall) -> impl Future<Output = Result<TxHash, ScriptError>> + Send;

    /// Wait until the transaction is mined, erroring if it reverted
    fn confirm(
        &self,
        signer: Identity,
        tx_hash: TxHash,
    ) -> impl Future<Output = Result<(), ScriptError>> + Send;
}

/// A transactor submitting calls over JSON-RPC, holding one wallet-backed
/// provider per identity
#[derive(Clone)]
pub struct RpcTransactor {
    /// The provider signing as the deployer
    deployer: DynProvider,
    /// The provider signing as the test charity
    test_charity: DynProvider,
    /// The interval between receipt polls
    poll_interval: Duration,
    /// How long to wait for a receipt before giving up, if at all
    timeout: Option<Duration>,
}

impl RpcTransactor {
    /// Create a transactor from the providers of both identities
    pub fn new(
        deployer: DynProvider,
        test_charity: DynProvider,
        poll_interval: Duration,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            deployer,
            test_charity,
            poll_interval,
            timeout,
        }
    }

    /// The provider signing as the given identity
    fn provider(&self, signer: Identity) -> &DynProvider {
        match signer {
            Identity::Deployer => &self.deployer,
            Identity::TestCharity => &self.test_charity,
        }
    }

    /// Poll for the transaction's receipt until one is available
    async fn poll_receipt(&self, signer: Identity, tx_hash: TxHash) -> Result<(), ScriptError> {
        let provider = self.provider(signer);
        loop {
            let receipt = provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

            match receipt {
                Some(receipt) if receipt.status() => {
                    debug!(
                        "Transaction {tx_hash:#x} mined in block {:?}, gas used {}",
                        receipt.block_number(),
                        receipt.gas_used()
                    );
                    return Ok(());
                }
                Some(_) => {
                    return Err(ScriptError::TransactionReverted(format!("{tx_hash:#x}")));
                }
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}

impl Transactor for RpcTransactor {
    async fn send(&self, call: ContractCall) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default()
            .with_to(call.to)
            .with_input(call.calldata)
            .with_gas_limit(call.gas_limit);

        let pending_tx = self
            .provider(call.signer)
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(format!("{}: {}", call.method, e)))?;

        Ok(*pending_tx.tx_hash())
    }

    async fn confirm(&self, signer: Identity, tx_hash: TxHash) -> Result<(), ScriptError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.poll_receipt(signer, tx_hash))
                .await
                .map_err(|_| ScriptError::ConfirmationTimeout(format!("{tx_hash:#x}")))?,
            None => self.poll_receipt(signer, tx_hash).await,
        }
    }
}
