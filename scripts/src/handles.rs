//! Contract handles, binding a fixed address and an artifact's interface to a signer

use std::path::Path;

use alloy::{
    contract::Interface,
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes},
};
use tracing::info;

use crate::{
    artifacts::{load_artifact, Artifact},
    deployments::DeployedAddresses,
    errors::ScriptError,
    types::{ContractName, Identity},
};

/// A callable handle on a deployed contract.
///
/// The address is fixed at construction, only the signer may differ between
/// handles on the same contract.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    /// The contract the handle refers to
    name: ContractName,
    /// The on-chain address of the contract
    address: Address,
    /// The contract's interface, taken from its artifact
    interface: Interface,
    /// The identity transactions through this handle are signed by
    identity: Identity,
}

impl ContractHandle {
    /// Bind an artifact's interface to an address and a signer
    pub fn new(
        name: ContractName,
        address: Address,
        artifact: Artifact,
        identity: Identity,
    ) -> Self {
        Self {
            name,
            address,
            interface: Interface::new(artifact.abi),
            identity,
        }
    }

    /// A handle on the same contract signed by a different identity
    pub fn rebind(&self, identity: Identity) -> Self {
        Self {
            identity,
            ..self.clone()
        }
    }

    /// The address of the contract
    pub fn address(&self) -> Address {
        self.address
    }

    /// The identity bound to this handle
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// ABI-encode a call to the given method
    pub fn encode_call(&self, method: &str, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        self.interface
            .encode_input(method, args)
            .map(Bytes::from)
            .map_err(|e| {
                ScriptError::CalldataConstruction(format!("{}.{}: {}", self.name, method, e))
            })
    }
}

/// The handles used by the setup sequence
#[derive(Debug, Clone)]
pub struct ResolvedContracts {
    /// All resolved handles
    handles: Vec<ContractHandle>,
}

impl ResolvedContracts {
    /// Collect a set of handles
    pub fn new(handles: Vec<ContractHandle>) -> Self {
        Self { handles }
    }

    /// Find the handle on the given contract bound to the given identity
    pub fn handle(
        &self,
        contract: ContractName,
        identity: Identity,
    ) -> Result<&ContractHandle, ScriptError> {
        self.handles
            .iter()
            .find(|h| h.name == contract && h.identity == identity)
            .ok_or_else(|| {
                ScriptError::CalldataConstruction(format!(
                    "no handle on {contract} bound to the {identity}"
                ))
            })
    }

    /// All resolved handles, in resolution order
    pub fn handles(&self) -> &[ContractHandle] {
        &self.handles
    }
}

/// Resolve the handles for the request, token and registry contracts.
///
/// All three are bound to the deployer; the registry is additionally bound to
/// the test charity, which enters the fee pool.
pub fn resolve_handles(
    artifacts_dir: &Path,
    addresses: &DeployedAddresses,
) -> Result<ResolvedContracts, ScriptError> {
    let bind = |contract: ContractName, address: Address| {
        let artifact = load_artifact(artifacts_dir, contract)?;
        info!("{} contract handle at {}", contract, address);
        Ok::<_, ScriptError>(ContractHandle::new(
            contract,
            address,
            artifact,
            Identity::Deployer,
        ))
    };

    let request = bind(ContractName::RequestCharities, addresses.request_charities)?;
    let token = bind(ContractName::FundToken, addresses.fund_token)?;
    let registry = bind(ContractName::CharityRegistry, addresses.charity_registry)?;
    let registry_for_fees = registry.rebind(Identity::TestCharity);

    Ok(ResolvedContracts::new(vec![
        request,
        token,
        registry,
        registry_for_fees,
    ]))
}
