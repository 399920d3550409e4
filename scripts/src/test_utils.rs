//! Fixtures shared by the unit tests

use std::{collections::HashSet, fs, path::Path, sync::Mutex};

use alloy::{
    json_abi::JsonAbi,
    primitives::{address, TxHash},
};

use crate::{
    artifacts::artifact_paths,
    deployments::DeployedAddresses,
    errors::ScriptError,
    transactor::{ContractCall, Transactor},
    types::{ContractName, Identity},
};

/// The addresses the contracts are deployed at on the testnet
pub fn test_addresses() -> DeployedAddresses {
    DeployedAddresses {
        request_charities: address!("D9ec112662041b5bb456c96A0a4B89246217449E"),
        fund_token: address!("2708a27129CA654881fb51660494d27cBc7aF82A"),
        charity_registry: address!("8ffb91036A4EB8250691631c025C297836EEdEf1"),
        aa_factory: None,
    }
}

/// A minimal ABI for each contract, covering the methods the setup calls
pub fn test_abi(contract: ContractName) -> JsonAbi {
    let signatures: &[&str] = match contract {
        ContractName::RequestCharities => &[
            "function setCharityRegistry(address registry)",
            "function initCharity(address charity, string name, bool verified, string cid)",
            "function vote(uint256 index, bool approve)",
            "function resolveCharity(uint256 index)",
            "function addTokenToWhitelist(address token)",
        ],
        ContractName::FundToken => &[
            "function setRegistry(address registry)",
            "function balanceOf(address account) view returns (uint256)",
        ],
        ContractName::CharityRegistry => &[
            "function getIntoFeePool(uint256 index, uint256 amount)",
            "function addTokenToWhitelist(address token)",
        ],
        ContractName::AaFactory => &["function deployAccount(bytes32 salt, address owner)"],
    };

    JsonAbi::parse(signatures.iter().copied()).unwrap()
}

/// Write a Hardhat-style artifact for the contract into the artifacts directory
pub fn write_artifact(artifacts_dir: &Path, contract: ContractName) {
    let name = contract.artifact_names()[0];
    let [path, _] = artifact_paths(artifacts_dir, name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let artifact = serde_json::json!({
        "_format": "hh-zksolc-artifact-1",
        "contractName": name,
        "sourceName": format!("contracts/{name}.sol"),
        "abi": test_abi(contract),
        "bytecode": "0x",
    });
    fs::write(path, artifact.to_string()).unwrap();
}

/// Write the artifacts of the request, token and registry contracts
pub fn write_all_artifacts(artifacts_dir: &Path) {
    for contract in [
        ContractName::RequestCharities,
        ContractName::FundToken,
        ContractName::CharityRegistry,
    ] {
        write_artifact(artifacts_dir, contract);
    }
}

/// An in-memory transactor recording every call it is handed
#[derive(Default)]
pub struct RecordingTransactor {
    /// Calls sent so far
    sent: Mutex<Vec<ContractCall>>,
    /// Transactions confirmed so far
    confirmed: Mutex<Vec<TxHash>>,
    /// Transactions whose receipt reports a revert
    reverted: Mutex<HashSet<TxHash>>,
    /// Methods whose submission fails
    failing: HashSet<&'static str>,
    /// Methods whose transaction reverts once mined
    reverting: HashSet<&'static str>,
}

impl RecordingTransactor {
    /// Fail the submission of every call to the given method
    pub fn failing_on(mut self, method: &'static str) -> Self {
        self.failing.insert(method);
        self
    }

    /// Revert every transaction calling the given method
    pub fn reverting_on(mut self, method: &'static str) -> Self {
        self.reverting.insert(method);
        self
    }

    /// The calls sent so far, in order
    pub fn sent(&self) -> Vec<ContractCall> {
        self.sent.lock().unwrap().clone()
    }

    /// The methods called so far, in order
    pub fn sent_methods(&self) -> Vec<&'static str> {
        self.sent().iter().map(|call| call.method).collect()
    }

    /// The transactions confirmed so far, in order
    pub fn confirmed(&self) -> Vec<TxHash> {
        self.confirmed.lock().unwrap().clone()
    }
}

impl Transactor for RecordingTransactor {
    async fn send(&self, call: ContractCall) -> Result<TxHash, ScriptError> {
        if self.failing.contains(call.method) {
            return Err(ScriptError::ContractInteraction(format!(
                "execution reverted: {}",
                call.method
            )));
        }

        let mut sent = self.sent.lock().unwrap();
        let tx_hash = TxHash::with_last_byte(sent.len() as u8 + 1);
        if self.reverting.contains(call.method) {
            self.reverted.lock().unwrap().insert(tx_hash);
        }
        sent.push(call);

        Ok(tx_hash)
    }

    async fn confirm(&self, _signer: Identity, tx_hash: TxHash) -> Result<(), ScriptError> {
        self.confirmed.lock().unwrap().push(tx_hash);
        if self.reverted.lock().unwrap().contains(&tx_hash) {
            return Err(ScriptError::TransactionReverted(format!("{tx_hash}")));
        }

        Ok(())
    }
}
