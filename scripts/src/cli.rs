//! Definitions of CLI arguments and commands for the setup scripts

use std::path::PathBuf;

use alloy::primitives::{utils::parse_ether, Address, U256};
use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{plan, record, setup},
    constants::{
        CHARITY_REGISTRY_ADDRESS, DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH,
        DEFAULT_GAS_LIMIT, DEFAULT_RPC_URL, DEPLOYER_KEY_ENV_VAR, FEE_POOL_AMOUNT_ETHER,
        FUND_TOKEN_ADDRESS, REQUEST_CHARITIES_ADDRESS, TEST_CHARITY_ADDRESS, TEST_CHARITY_INDEX,
        TEST_CHARITY_KEY_ENV_VAR, TEST_CHARITY_METADATA_CID, TEST_CHARITY_NAME,
    },
    deployments::DeployedAddresses,
    errors::ScriptError,
    plan::SeedParams,
    types::ConfirmationPolicy,
};

/// Links the charity contracts together, seeds them with a test charity and
/// records their addresses
#[derive(Parser)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the contract build artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Path to the file the contract addresses are recorded in
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// The addresses of the deployed contracts
    #[command(flatten)]
    pub contracts: ContractArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The addresses of the deployed contracts
#[derive(Args)]
pub struct ContractArgs {
    /// `RequestCharities` contract address
    #[arg(long, default_value = REQUEST_CHARITIES_ADDRESS)]
    pub request_charities: Address,

    /// `FundToken` contract address
    #[arg(long, default_value = FUND_TOKEN_ADDRESS)]
    pub fund_token: Address,

    /// `CharityRegistry` contract address
    #[arg(long, default_value = CHARITY_REGISTRY_ADDRESS)]
    pub charity_registry: Address,

    /// Account abstraction factory address, recorded if given
    #[arg(long)]
    pub aa_factory: Option<Address>,
}

impl From<ContractArgs> for DeployedAddresses {
    fn from(args: ContractArgs) -> Self {
        DeployedAddresses {
            request_charities: args.request_charities,
            fund_token: args.fund_token,
            charity_registry: args.charity_registry,
            aa_factory: args.aa_factory,
        }
    }
}

/// The options shared by every command
pub struct ScriptContext {
    /// Network RPC URL
    pub rpc_url: String,
    /// Directory containing the contract build artifacts
    pub artifacts_dir: PathBuf,
    /// Path to the contract addresses file
    pub deployments_path: PathBuf,
    /// The addresses of the deployed contracts
    pub addresses: DeployedAddresses,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Link the contracts, seed the test charity and record the addresses
    Setup(SetupArgs),
    /// Print the setup sequence without sending anything
    Plan(PlanArgs),
    /// Record the contract addresses without sending anything
    Record(RecordArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self, ctx: &ScriptContext) -> Result<(), ScriptError> {
        match self {
            Command::Setup(args) => setup(args, ctx).await,
            Command::Plan(args) => plan(args, ctx),
            Command::Record(args) => record(args, ctx),
        }
    }
}

/// Link the contracts, seed the test charity and record the addresses
#[derive(Args)]
pub struct SetupArgs {
    /// Private key of the deployer, which administers the contracts
    #[arg(long, env = DEPLOYER_KEY_ENV_VAR, hide_env_values = true)]
    pub deployer_key: String,

    /// Private key of the test charity, which enters the fee pool
    #[arg(long, env = TEST_CHARITY_KEY_ENV_VAR, hide_env_values = true)]
    pub test_charity_key: String,

    /// The test state to seed
    #[command(flatten)]
    pub seed: SeedArgs,

    /// Gas limit attached to every transaction
    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Which transactions to wait on before moving to the next step
    #[arg(long, value_enum, default_value_t = ConfirmationPolicy::All)]
    pub confirmations: ConfirmationPolicy,

    /// Seconds to wait for a transaction receipt before failing the step.
    /// Waits indefinitely if unset
    #[arg(long)]
    pub confirmation_timeout_secs: Option<u64>,
}

/// Print the setup sequence and its calldata without sending anything
#[derive(Args)]
pub struct PlanArgs {
    /// The test state to seed
    #[command(flatten)]
    pub seed: SeedArgs,
}

/// Record the contract addresses without sending anything
#[derive(Args)]
pub struct RecordArgs {
    /// Resolve the contract artifacts before recording
    #[arg(long)]
    pub check_artifacts: bool,
}

/// The test state seeded into the contracts
#[derive(Args)]
pub struct SeedArgs {
    /// Address registered as the test charity
    #[arg(long, default_value = TEST_CHARITY_ADDRESS)]
    pub charity_address: Address,

    /// Display name of the test charity
    #[arg(long, default_value = TEST_CHARITY_NAME)]
    pub charity_name: String,

    /// Content identifier of the test charity's metadata
    #[arg(long, default_value = TEST_CHARITY_METADATA_CID)]
    pub charity_cid: String,

    /// Index the request contract assigns the test charity
    #[arg(long, default_value_t = TEST_CHARITY_INDEX)]
    pub charity_index: u64,

    /// Amount, in ether, the test charity commits to the fee pool
    #[arg(long, default_value = FEE_POOL_AMOUNT_ETHER)]
    pub fee_pool_amount: String,
}

impl SeedArgs {
    /// Convert the arguments into the seed parameters of the sequence
    pub fn to_params(&self) -> Result<SeedParams, ScriptError> {
        let fee_pool_amount = parse_ether(&self.fee_pool_amount)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

        Ok(SeedParams {
            charity_address: self.charity_address,
            charity_name: self.charity_name.clone(),
            charity_verified: true,
            metadata_cid: self.charity_cid.clone(),
            charity_index: U256::from(self.charity_index),
            fee_pool_amount,
        })
    }
}
