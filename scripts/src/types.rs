//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use clap::ValueEnum;

use crate::constants::{
    AA_FACTORY_KEY, CHARITY_REGISTRY_KEY, FUND_TOKEN_KEY, LEGACY_REQUEST_CHARITIES_ARTIFACT,
    REQUEST_CHARITIES_KEY,
};

/// The contracts the scripts interact with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractName {
    /// The charity request & voting contract
    RequestCharities,
    /// The fungible token contract
    FundToken,
    /// The charity registry contract
    CharityRegistry,
    /// The account abstraction factory contract
    AaFactory,
}

impl ContractName {
    /// The key under which the contract's address is recorded
    pub fn deployments_key(&self) -> &'static str {
        match self {
            ContractName::RequestCharities => REQUEST_CHARITIES_KEY,
            ContractName::FundToken => FUND_TOKEN_KEY,
            ContractName::CharityRegistry => CHARITY_REGISTRY_KEY,
            ContractName::AaFactory => AA_FACTORY_KEY,
        }
    }

    /// The artifact names the contract may be found under, in lookup order
    pub fn artifact_names(&self) -> &'static [&'static str] {
        match self {
            ContractName::RequestCharities => {
                &[REQUEST_CHARITIES_KEY, LEGACY_REQUEST_CHARITIES_ARTIFACT]
            }
            ContractName::FundToken => &[FUND_TOKEN_KEY],
            ContractName::CharityRegistry => &[CHARITY_REGISTRY_KEY],
            ContractName::AaFactory => &[AA_FACTORY_KEY],
        }
    }
}

impl Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.deployments_key())
    }
}

/// The signing identities used by the scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// The deployer, which administers the contracts
    Deployer,
    /// The test charity, which enters the fee pool
    TestCharity,
}

impl Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Deployer => write!(f, "deployer"),
            Identity::TestCharity => write!(f, "test-charity"),
        }
    }
}

/// Which transactions to wait on before moving to the next step
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationPolicy {
    /// Wait for a successful receipt of every transaction
    #[default]
    All,
    /// Only wait for the first linking transaction, dispatch the rest without waiting
    Legacy,
}

impl Display for ConfirmationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfirmationPolicy::All => write!(f, "all"),
            ConfirmationPolicy::Legacy => write!(f, "legacy"),
        }
    }
}
