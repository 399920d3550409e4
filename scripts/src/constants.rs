//! Constants used in the setup scripts

/// The default RPC endpoint of the rollup testnet
pub const DEFAULT_RPC_URL: &str = "https://zksync2-testnet.zksync.dev";

/// The default directory containing the contract build artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts-zk";

/// The default path of the contract addresses file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "ContractAddresses.json";

/// The environment variable holding the deployer's private key
pub const DEPLOYER_KEY_ENV_VAR: &str = "DEPLOYER_PRIVATE_KEY";

/// The environment variable holding the test charity's private key
pub const TEST_CHARITY_KEY_ENV_VAR: &str = "TEST_CHARITY_PRIVATE_KEY";

// -------------
// | Addresses |
// -------------

/// The address of the deployed `RequestCharities` contract
pub const REQUEST_CHARITIES_ADDRESS: &str = "0xD9ec112662041b5bb456c96A0a4B89246217449E";

/// The address of the deployed `FundToken` contract
pub const FUND_TOKEN_ADDRESS: &str = "0x2708a27129CA654881fb51660494d27cBc7aF82A";

/// The address of the deployed `CharityRegistry` contract
pub const CHARITY_REGISTRY_ADDRESS: &str = "0x8ffb91036A4EB8250691631c025C297836EEdEf1";

/// The address registered as the test charity
pub const TEST_CHARITY_ADDRESS: &str = "0x330deD2987a65d0B24d7A9379b0F8a66c8302D01";

// ---------------
// | Seed values |
// ---------------

/// The display name of the test charity
pub const TEST_CHARITY_NAME: &str = "Test Charity";

/// The content identifier of the test charity's metadata
pub const TEST_CHARITY_METADATA_CID: &str =
    "bafybeiamgpe4aad4qz4hyad26owkayoh3df7hl6sjlhjzbpjw6hzllxtja";

/// The index the test charity is assigned by the request contract
pub const TEST_CHARITY_INDEX: u64 = 1;

/// The amount, in ether, the test charity commits when entering the fee pool
pub const FEE_POOL_AMOUNT_ETHER: &str = "0.03";

/// The gas limit attached to every transaction
pub const DEFAULT_GAS_LIMIT: u64 = 10_000_000;

/// The interval, in milliseconds, between transaction receipt polls
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 500;

// ---------------------
// | Deployments file  |
// ---------------------

/// The `RequestCharities` contract key in the contract addresses file
pub const REQUEST_CHARITIES_KEY: &str = "RequestCharities";

/// The `CharityRegistry` contract key in the contract addresses file
pub const CHARITY_REGISTRY_KEY: &str = "CharityRegistry";

/// The `FundToken` contract key in the contract addresses file
pub const FUND_TOKEN_KEY: &str = "FundToken";

/// The account abstraction factory key in the contract addresses file
pub const AA_FACTORY_KEY: &str = "AAFactory";

// -------------
// | Artifacts |
// -------------

/// The subdirectory of the artifacts directory holding compiled sources
pub const ARTIFACTS_CONTRACTS_SEGMENT: &str = "contracts";

/// The extension of Solidity source directories in the artifacts tree
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of artifact files
pub const ARTIFACT_EXTENSION: &str = "json";

/// The name the request contract's artifact was published under before it was renamed
pub const LEGACY_REQUEST_CHARITIES_ARTIFACT: &str = "ValidateCharities";
