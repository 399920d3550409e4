//! Definitions of errors that can occur during the execution of the setup scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the setup scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error reading the contract addresses file
    ReadDeployments(String),
    /// Error writing the contract addresses file
    WriteDeployments(String),
    /// Error reading or parsing a contract build artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client or a signer
    ClientInitialization(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error submitting a transaction to a contract
    ContractInteraction(String),
    /// A transaction was mined but reverted
    TransactionReverted(String),
    /// Timed out waiting for a transaction receipt
    ConfirmationTimeout(String),
    /// A step that halts the sequence on failure failed
    StepFailed {
        /// The name of the failed step
        step: String,
        /// The underlying failure
        reason: String,
    },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::ConfirmationTimeout(s) => {
                write!(f, "timed out waiting for receipt: {}", s)
            }
            ScriptError::StepFailed { step, reason } => {
                write!(f, "step `{}` failed: {}", step, reason)
            }
        }
    }
}

impl Error for ScriptError {}
