//! Loading of contract build artifacts
//!
//! Artifacts are the JSON files emitted by the Hardhat build of the contracts,
//! of which only the ABI is used here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACTS_CONTRACTS_SEGMENT, ARTIFACT_EXTENSION, SOLIDITY_EXTENSION},
    errors::ScriptError,
    types::ContractName,
};

/// The subset of a Hardhat build artifact needed to call a contract
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The name of the contract, if recorded in the artifact
    #[serde(default)]
    pub contract_name: Option<String>,
    /// The contract's ABI
    pub abi: JsonAbi,
}

/// Parse an artifact from its JSON contents
pub fn parse_artifact(contents: &str) -> Result<Artifact, ScriptError> {
    serde_json::from_str(contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
}

/// The paths an artifact with the given name may be found at, in lookup order.
///
/// Hardhat nests artifacts as `contracts/<Name>.sol/<Name>.json`, flat
/// exports place them directly in the artifacts directory.
pub fn artifact_paths(artifacts_dir: &Path, artifact_name: &str) -> [PathBuf; 2] {
    let file_name = format!("{artifact_name}.{ARTIFACT_EXTENSION}");
    [
        artifacts_dir
            .join(ARTIFACTS_CONTRACTS_SEGMENT)
            .join(format!("{artifact_name}.{SOLIDITY_EXTENSION}"))
            .join(&file_name),
        artifacts_dir.join(file_name),
    ]
}

/// Load the artifact of the given contract from the artifacts directory
pub fn load_artifact(
    artifacts_dir: &Path,
    contract: ContractName,
) -> Result<Artifact, ScriptError> {
    let path = contract
        .artifact_names()
        .iter()
        .flat_map(|name| artifact_paths(artifacts_dir, name))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            ScriptError::ArtifactParsing(format!(
                "no artifact for {} in {}",
                contract,
                artifacts_dir.display()
            ))
        })?;

    debug!("Loading {} artifact from {}", contract, path.display());
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    parse_artifact(&contents)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{
        errors::ScriptError,
        test_utils::{test_abi, write_artifact},
        types::ContractName,
    };

    use super::{artifact_paths, load_artifact, parse_artifact};

    #[test]
    fn test_load_nested_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), ContractName::CharityRegistry);

        let artifact = load_artifact(dir.path(), ContractName::CharityRegistry).unwrap();
        assert_eq!(artifact.contract_name.as_deref(), Some("CharityRegistry"));
        assert!(artifact.abi.function("getIntoFeePool").is_some());
    }

    #[test]
    fn test_load_flat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let [_, flat] = artifact_paths(dir.path(), "FundToken");
        let contents = serde_json::json!({ "abi": test_abi(ContractName::FundToken) });
        fs::write(flat, contents.to_string()).unwrap();

        let artifact = load_artifact(dir.path(), ContractName::FundToken).unwrap();
        assert!(artifact.contract_name.is_none());
        assert!(artifact.abi.function("setRegistry").is_some());
    }

    #[test]
    fn test_load_legacy_request_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let [nested, _] = artifact_paths(dir.path(), "ValidateCharities");
        fs::create_dir_all(nested.parent().unwrap()).unwrap();
        let contents = serde_json::json!({
            "contractName": "ValidateCharities",
            "abi": test_abi(ContractName::RequestCharities),
        });
        fs::write(nested, contents.to_string()).unwrap();

        let artifact = load_artifact(dir.path(), ContractName::RequestCharities).unwrap();
        assert!(artifact.abi.function("vote").is_some());
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact(dir.path(), ContractName::FundToken).unwrap_err();
        assert!(matches!(err, ScriptError::ArtifactParsing(_)));
    }

    #[test]
    fn test_malformed_artifact() {
        assert!(matches!(
            parse_artifact(r#"{"contractName": "FundToken"}"#),
            Err(ScriptError::ArtifactParsing(_))
        ));
        assert!(matches!(
            parse_artifact("not json"),
            Err(ScriptError::ArtifactParsing(_))
        ));
    }
}
