//! Wallet collaborator interfaces
//!
//! The actual cryptography lives in wallet SDKs outside this crate; the
//! router and dispatcher only see these traits, injected at construction so
//! tests can substitute recording doubles. Signing is interactive (it may
//! prompt a human); callers must not run two signatures against the same
//! wallet handle concurrently.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cosmos_tx::{
    AminoMsg, AminoSignResponse, AnyMessage, BroadcastMode, BroadcastSource, DirectSignResponse,
};
use graviton_core::SupportedChain;

/// Errors surfaced by wallet collaborators
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No wallet connection for {chain}")]
    NotConnected { chain: SupportedChain },

    #[error("Wallet signing failed: {0}")]
    Sign(String),

    #[error("Broadcast failed: {0}")]
    Broadcast(String),
}

/// Capability probing, signing, and broadcast surface of a Cosmos wallet
#[async_trait]
pub trait CosmosWalletManager: Send + Sync {
    async fn can_sign_direct(&self, chain: SupportedChain) -> bool;

    async fn can_sign_amino(&self, chain: SupportedChain) -> bool;

    /// Sign the binary sign doc over `messages`
    async fn sign_direct(
        &self,
        chain: SupportedChain,
        messages: &[AnyMessage],
        fee_amount: &str,
        gas_limit: u64,
        memo: &str,
    ) -> Result<DirectSignResponse, WalletError>;

    /// Sign the canonical JSON doc over `messages`
    async fn sign_amino(
        &self,
        chain: SupportedChain,
        messages: &[AminoMsg],
        fee_amount: &str,
        gas_limit: u64,
        memo: &str,
    ) -> Result<AminoSignResponse, WalletError>;

    /// Submit raw transaction bytes, returning the transaction hash
    async fn broadcast(
        &self,
        chain: SupportedChain,
        tx_bytes: Vec<u8>,
        mode: BroadcastMode,
        source: BroadcastSource,
    ) -> Result<String, WalletError>;
}

/// Receipt of an Ethereum-side bridge lock call. The hash is optional
/// because some providers resolve with a receipt that lacks one; the router
/// treats that as a failed broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendToCosmosResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// A connected web3 handle on a specific Ethereum-side chain
#[async_trait]
pub trait EthProvider: Send + Sync {
    /// Approve the bridge contract's allowance on an ERC-20
    async fn approve(
        &self,
        owner: &str,
        token_address: &str,
        spender: &str,
        amount: &str,
    ) -> Result<(), WalletError>;

    /// Call the bridge contract's lock entry point
    async fn send_to_cosmos(
        &self,
        contract: &str,
        from: &str,
        token_address: &str,
        to: &str,
        amount: &str,
    ) -> Result<SendToCosmosResponse, WalletError>;
}

/// Ethereum-side wallet: hands out a provider when one is connected
#[async_trait]
pub trait EthWalletManager: Send + Sync {
    type Provider: EthProvider;

    async fn web3(&self, chain: SupportedChain) -> Option<Self::Provider>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_to_cosmos_response_camel_case() {
        let response: SendToCosmosResponse =
            serde_json::from_str(r#"{"transactionHash": "0xabc"}"#).unwrap();
        assert_eq!(response.transaction_hash.as_deref(), Some("0xabc"));

        // A receipt without a hash still parses; the router rejects it later
        let response: SendToCosmosResponse = serde_json::from_str("{}").unwrap();
        assert!(response.transaction_hash.is_none());
    }
}
