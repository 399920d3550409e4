//! Implementations of the setup scripts

use std::{path::Path, time::Duration};

use alloy::primitives::TxHash;
use tracing::{error, info, warn};

use crate::{
    cli::{PlanArgs, RecordArgs, ScriptContext, SetupArgs},
    constants::RECEIPT_POLL_INTERVAL_MS,
    deployments::{read_deployment, write_deployments, DeployedAddresses},
    errors::ScriptError,
    handles::{resolve_handles, ResolvedContracts},
    plan::{seeding_plan, FailurePolicy, Step, StepId},
    transactor::{ContractCall, RpcTransactor, Transactor},
    types::ConfirmationPolicy,
    utils::{parse_signer, setup_client},
};

/// The result of a single step of the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The transaction was mined successfully
    Confirmed(TxHash),
    /// The transaction was submitted but not waited on
    Dispatched(TxHash),
    /// The step failed
    Failed(String),
}

/// The outcome of a step of the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The step
    pub step: StepId,
    /// What happened
    pub status: StepStatus,
}

/// The outcome of running the setup sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanReport {
    /// The outcomes of the steps that ran, in order
    pub outcomes: Vec<StepOutcome>,
    /// The failure that stopped the sequence, if any
    pub halted: Option<ScriptError>,
}

impl PlanReport {
    /// The status of the given step, if it ran
    pub fn status(&self, step: StepId) -> Option<&StepStatus> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.step == step)
            .map(|outcome| &outcome.status)
    }

    /// The dependency of the given step, if it has one that has not been
    /// confirmed
    pub fn unconfirmed_dependency(&self, step: &Step) -> Option<StepId> {
        step.depends_on
            .filter(|dep| !matches!(self.status(*dep), Some(StepStatus::Confirmed(_))))
    }
}

/// Link the contracts, seed the test state and record the contract addresses
pub async fn setup(args: SetupArgs, ctx: &ScriptContext) -> Result<(), ScriptError> {
    // Connections and handles are resolved up front, any failure here is fatal
    let deployer = parse_signer(&args.deployer_key)?;
    let test_charity = parse_signer(&args.test_charity_key)?;
    let params = args.seed.to_params()?;

    if test_charity.address() != params.charity_address {
        warn!(
            "Test charity signer {} is not the registered charity {}",
            test_charity.address(),
            params.charity_address
        );
    }

    let deployer_client = setup_client(deployer, &ctx.rpc_url).await?;
    let test_charity_client = setup_client(test_charity, &ctx.rpc_url).await?;
    let transactor = RpcTransactor::new(
        deployer_client,
        test_charity_client,
        Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
        args.confirmation_timeout_secs.map(Duration::from_secs),
    );

    let contracts = resolve_handles(&ctx.artifacts_dir, &ctx.addresses)?;
    let plan = seeding_plan(&ctx.addresses, &params);

    run_setup(
        &plan,
        &contracts,
        &transactor,
        args.confirmations,
        args.gas_limit,
        &ctx.addresses,
        &ctx.deployments_path,
    )
    .await
}

/// Run the sequence against the given transactor, then record the addresses.
///
/// The addresses are recorded even when the sequence halts, since all of them
/// were resolved before the first call was made.
pub async fn run_setup<T: Transactor>(
    plan: &[Step],
    contracts: &ResolvedContracts,
    transactor: &T,
    policy: ConfirmationPolicy,
    gas_limit: u64,
    addresses: &DeployedAddresses,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    info!("Running setup with confirmation policy `{}`", policy);
    let report = execute_plan(plan, contracts, transactor, policy, gas_limit).await;

    log_summary(&report, addresses);
    record_addresses(deployments_path, addresses);

    match report.halted {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Execute the steps in order.
///
/// An isolated step's failure is logged and the sequence continues, a halting
/// step's failure ends the sequence.
pub async fn execute_plan<T: Transactor>(
    plan: &[Step],
    contracts: &ResolvedContracts,
    transactor: &T,
    policy: ConfirmationPolicy,
    gas_limit: u64,
) -> PlanReport {
    let mut report = PlanReport::default();

    for step in plan {
        info!("==============================");
        info!("{}", step.description);

        if let Some(dep) = report.unconfirmed_dependency(step) {
            warn!("`{}` relies on `{}`, which is not confirmed", step.id, dep);
        }

        let status = match run_step(step, contracts, transactor, policy, gas_limit).await {
            Ok(status) => status,
            Err(e) => {
                error!("Step `{}` failed: {}", step.id, e);
                report.outcomes.push(StepOutcome {
                    step: step.id,
                    status: StepStatus::Failed(e.to_string()),
                });

                match step.failure {
                    FailurePolicy::Isolated => continue,
                    FailurePolicy::Halt => {
                        report.halted = Some(ScriptError::StepFailed {
                            step: step.id.to_string(),
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }
        };

        match &status {
            StepStatus::Confirmed(tx_hash) => info!("`{}` confirmed in {tx_hash:#x}", step.id),
            StepStatus::Dispatched(tx_hash) => info!("`{}` dispatched as {tx_hash:#x}", step.id),
            StepStatus::Failed(_) => {}
        }
        report.outcomes.push(StepOutcome {
            step: step.id,
            status,
        });
    }

    report
}

/// Encode, send and, if the policy calls for it, confirm a single step
async fn run_step<T: Transactor>(
    step: &Step,
    contracts: &ResolvedContracts,
    transactor: &T,
    policy: ConfirmationPolicy,
    gas_limit: u64,
) -> Result<StepStatus, ScriptError> {
    let handle = contracts.handle(step.contract, step.signer)?;
    let calldata = handle.encode_call(step.method, &step.args)?;

    let call = ContractCall {
        to: handle.address(),
        signer: step.signer,
        method: step.method,
        calldata,
        gas_limit,
    };
    let tx_hash = transactor.send(call).await?;

    if step.awaits_confirmation(policy) {
        transactor.confirm(step.signer, tx_hash).await?;
        Ok(StepStatus::Confirmed(tx_hash))
    } else {
        Ok(StepStatus::Dispatched(tx_hash))
    }
}

/// Log the outcome of every step and the addresses in use
fn log_summary(report: &PlanReport, addresses: &DeployedAddresses) {
    info!("==============================");
    let failed = report
        .outcomes
        .iter()
        .filter(|outcome| matches!(outcome.status, StepStatus::Failed(_)))
        .count();
    info!(
        "Setup complete: {} step(s) ran, {} failed",
        report.outcomes.len(),
        failed
    );

    for (key, address) in addresses.entries() {
        info!("{key} address: {address}");
    }
}

/// Write the addresses to the deployments file, logging rather than
/// propagating any failure
fn record_addresses(deployments_path: &Path, addresses: &DeployedAddresses) {
    match write_deployments(deployments_path, addresses) {
        Ok(()) => info!("Addresses written to {}", deployments_path.display()),
        Err(e) => error!("Could not record addresses: {}", e),
    }
}

/// Print the setup sequence and its calldata without touching the network
pub fn plan(args: PlanArgs, ctx: &ScriptContext) -> Result<(), ScriptError> {
    let params = args.seed.to_params()?;
    let contracts = resolve_handles(&ctx.artifacts_dir, &ctx.addresses)?;

    for (i, step) in seeding_plan(&ctx.addresses, &params).iter().enumerate() {
        let handle = contracts.handle(step.contract, step.signer)?;
        let calldata = handle.encode_call(step.method, &step.args)?;
        let depends_on = step
            .depends_on
            .map(|dep| dep.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{}. {} [{:?}, depends on {}]\n   {}.{} as {}\n   to {}\n   calldata {}",
            i + 1,
            step.id,
            step.failure,
            depends_on,
            step.contract,
            step.method,
            step.signer,
            handle.address(),
            calldata,
        );
    }

    Ok(())
}

/// Record the contract addresses without running the sequence, then read
/// every recorded address back from the file
pub fn record(args: RecordArgs, ctx: &ScriptContext) -> Result<(), ScriptError> {
    if args.check_artifacts {
        resolve_handles(&ctx.artifacts_dir, &ctx.addresses)?;
    }

    write_deployments(&ctx.deployments_path, &ctx.addresses)?;
    for (key, address) in ctx.addresses.entries() {
        let recorded = read_deployment(&ctx.deployments_path, key)?;
        if recorded != address {
            return Err(ScriptError::WriteDeployments(format!(
                "{key} recorded as {recorded}, expected {address}"
            )));
        }
    }
    info!("Addresses written to {}", ctx.deployments_path.display());

    Ok(())
}
