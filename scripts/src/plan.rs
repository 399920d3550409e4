//! The ordered sequence of calls that links the contracts and seeds test state

use std::fmt::{self, Display};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};

use crate::{
    deployments::DeployedAddresses,
    types::{ConfirmationPolicy, ContractName, Identity},
};

/// The steps of the setup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    /// Point the request contract at the registry
    LinkRequestRegistry,
    /// Point the token contract at the registry
    LinkTokenRegistry,
    /// Register the test charity
    InitCharity,
    /// Vote for the test charity
    Vote,
    /// Resolve the test charity into the registry
    ResolveCharity,
    /// Whitelist the native asset as a payment token
    WhitelistNativeToken,
    /// Enter the test charity into the fee pool
    EnterFeePool,
}

impl Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepId::LinkRequestRegistry => write!(f, "link-request-registry"),
            StepId::LinkTokenRegistry => write!(f, "link-token-registry"),
            StepId::InitCharity => write!(f, "init-charity"),
            StepId::Vote => write!(f, "vote"),
            StepId::ResolveCharity => write!(f, "resolve-charity"),
            StepId::WhitelistNativeToken => write!(f, "whitelist-native-token"),
            StepId::EnterFeePool => write!(f, "enter-fee-pool"),
        }
    }
}

/// What a step's failure does to the rest of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and move on to the next step
    Isolated,
    /// Stop the sequence
    Halt,
}

/// A single call in the setup sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// The step's name
    pub id: StepId,
    /// A human readable description, logged when the step runs
    pub description: String,
    /// The contract called
    pub contract: ContractName,
    /// The identity signing the call
    pub signer: Identity,
    /// The method called
    pub method: &'static str,
    /// The method's arguments
    pub args: Vec<DynSolValue>,
    /// What a failure of this step does to the sequence
    pub failure: FailurePolicy,
    /// The earlier step whose effect this step relies on
    pub depends_on: Option<StepId>,
}

impl Step {
    /// Whether the step's transaction is waited on before the next step
    pub fn awaits_confirmation(&self, policy: ConfirmationPolicy) -> bool {
        match policy {
            ConfirmationPolicy::All => true,
            ConfirmationPolicy::Legacy => self.id == StepId::LinkRequestRegistry,
        }
    }
}

/// The parameters of the test state seeded by the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedParams {
    /// The address registered as the test charity
    pub charity_address: Address,
    /// The display name of the test charity
    pub charity_name: String,
    /// Whether the charity is registered as verified
    pub charity_verified: bool,
    /// The content identifier of the charity's metadata
    pub metadata_cid: String,
    /// The index the request contract assigns the charity
    pub charity_index: U256,
    /// The amount committed to the fee pool, in wei
    pub fee_pool_amount: U256,
}

/// Build the setup sequence.
///
/// Steps are returned in execution order; a step only ever depends on an
/// earlier one.
pub fn seeding_plan(addresses: &DeployedAddresses, params: &SeedParams) -> Vec<Step> {
    let registry = addresses.charity_registry;
    let index = DynSolValue::Uint(params.charity_index, 256);

    vec![
        Step {
            id: StepId::LinkRequestRegistry,
            description: format!("Connecting RequestCharities to CharityRegistry at {registry}"),
            contract: ContractName::RequestCharities,
            signer: Identity::Deployer,
            method: "setCharityRegistry",
            args: vec![DynSolValue::Address(registry)],
            failure: FailurePolicy::Isolated,
            depends_on: None,
        },
        Step {
            id: StepId::LinkTokenRegistry,
            description: format!("Connecting FundToken to CharityRegistry at {registry}"),
            contract: ContractName::FundToken,
            signer: Identity::Deployer,
            method: "setRegistry",
            args: vec![DynSolValue::Address(registry)],
            failure: FailurePolicy::Isolated,
            depends_on: None,
        },
        Step {
            id: StepId::InitCharity,
            description: format!(
                "Adding test charity {} ({})",
                params.charity_name, params.charity_address
            ),
            contract: ContractName::RequestCharities,
            signer: Identity::Deployer,
            method: "initCharity",
            args: vec![
                DynSolValue::Address(params.charity_address),
                DynSolValue::String(params.charity_name.clone()),
                DynSolValue::Bool(params.charity_verified),
                DynSolValue::String(params.metadata_cid.clone()),
            ],
            failure: FailurePolicy::Isolated,
            depends_on: Some(StepId::LinkRequestRegistry),
        },
        Step {
            id: StepId::Vote,
            description: format!("Voting for charity #{}", params.charity_index),
            contract: ContractName::RequestCharities,
            signer: Identity::Deployer,
            method: "vote",
            args: vec![index.clone(), DynSolValue::Bool(true)],
            failure: FailurePolicy::Halt,
            depends_on: Some(StepId::InitCharity),
        },
        Step {
            id: StepId::ResolveCharity,
            description: format!(
                "Resolving charity #{} into CharityRegistry",
                params.charity_index
            ),
            contract: ContractName::RequestCharities,
            signer: Identity::Deployer,
            method: "resolveCharity",
            args: vec![index.clone()],
            failure: FailurePolicy::Halt,
            depends_on: Some(StepId::Vote),
        },
        Step {
            id: StepId::WhitelistNativeToken,
            description: "Whitelisting the native token".to_string(),
            contract: ContractName::RequestCharities,
            signer: Identity::Deployer,
            method: "addTokenToWhitelist",
            args: vec![DynSolValue::Address(Address::ZERO)],
            failure: FailurePolicy::Isolated,
            depends_on: Some(StepId::LinkRequestRegistry),
        },
        Step {
            id: StepId::EnterFeePool,
            description: format!(
                "Entering charity #{} into the fee pool with {} wei",
                params.charity_index, params.fee_pool_amount
            ),
            contract: ContractName::CharityRegistry,
            signer: Identity::TestCharity,
            method: "getIntoFeePool",
            args: vec![index, DynSolValue::Uint(params.fee_pool_amount, 256)],
            failure: FailurePolicy::Isolated,
            depends_on: Some(StepId::ResolveCharity),
        },
    ]
}
