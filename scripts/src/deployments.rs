//! Reading and writing the contract addresses file

use std::{fs, path::Path, str::FromStr};

use alloy::primitives::Address;
use serde_json::{Map, Value};

use crate::{
    constants::{AA_FACTORY_KEY, CHARITY_REGISTRY_KEY, FUND_TOKEN_KEY, REQUEST_CHARITIES_KEY},
    errors::ScriptError,
};

/// The addresses of the contracts the scripts operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedAddresses {
    /// The `RequestCharities` contract
    pub request_charities: Address,
    /// The `FundToken` contract
    pub fund_token: Address,
    /// The `CharityRegistry` contract
    pub charity_registry: Address,
    /// The account abstraction factory, if one is deployed
    pub aa_factory: Option<Address>,
}

impl DeployedAddresses {
    /// The `(key, address)` entries recorded in the contract addresses file
    pub fn entries(&self) -> Vec<(&'static str, Address)> {
        let mut entries = vec![
            (REQUEST_CHARITIES_KEY, self.request_charities),
            (CHARITY_REGISTRY_KEY, self.charity_registry),
            (FUND_TOKEN_KEY, self.fund_token),
        ];
        if let Some(aa_factory) = self.aa_factory {
            entries.push((AA_FACTORY_KEY, aa_factory));
        }

        entries
    }
}

/// Read and parse the contract addresses file as a JSON object
fn read_deployments_object(file_path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", file_path.display(), e)))?;

    match serde_json::from_str(&contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ScriptError::ReadDeployments(format!(
            "{} does not contain a JSON object",
            file_path.display()
        ))),
        Err(e) => Err(ScriptError::ReadDeployments(e.to_string())),
    }
}

/// Record the given addresses in the contract addresses file.
///
/// A missing file is created. An existing file has its known keys overwritten
/// and any other keys left untouched.
pub fn write_deployments(
    file_path: &Path,
    addresses: &DeployedAddresses,
) -> Result<(), ScriptError> {
    let mut deployments = if file_path.exists() {
        read_deployments_object(file_path)?
    } else {
        Map::new()
    };

    for (key, address) in addresses.entries() {
        deployments.insert(key.to_string(), Value::String(address.to_checksum(None)));
    }

    let contents = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(file_path, contents)
        .map_err(|e| ScriptError::WriteDeployments(format!("{}: {}", file_path.display(), e)))
}

/// Read the address recorded under the given key
pub fn read_deployment(file_path: &Path, key: &str) -> Result<Address, ScriptError> {
    let deployments = read_deployments_object(file_path)?;
    let addr_str = deployments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ScriptError::ReadDeployments(format!("key {key} not found")))?;

    Address::from_str(addr_str)
        .map_err(|e| ScriptError::ReadDeployments(format!("{addr_str}: {e}")))
}
