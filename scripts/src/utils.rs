//! Utilities for the setup scripts.

use std::str::FromStr;

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::errors::ScriptError;

/// Parse a hex-encoded private key into a signer
pub fn parse_signer(priv_key: &str) -> Result<PrivateKeySigner, ScriptError> {
    PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(format!("malformed private key: {e}")))
}

/// Sets up an RPC client signing with the given key.
///
/// The chain ID is fetched once so that an unreachable endpoint fails here
/// rather than on the first transaction.
pub async fn setup_client(
    signer: PrivateKeySigner,
    rpc_url: &str,
) -> Result<DynProvider, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let address = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(signer)
        .with_simple_nonce_management()
        .connect_http(url);

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!("Connected {} to chain {} at {}", address, chain_id, rpc_url);

    Ok(DynProvider::new(provider))
}
