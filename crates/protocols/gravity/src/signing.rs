//! Capability-driven signing dispatch
//!
//! One-shot per transfer: wallet capability is probed at call time and the
//! matching sign+assemble+broadcast path runs to completion. Direct signing
//! wins whenever both modes are available. Both paths broadcast in
//! synchronous mode (mempool acceptance, not block inclusion); callers
//! needing finality poll separately.

use thiserror::Error;

use cosmos_tx::{
    create_amino_tx_raw_bytes, create_tx_raw_bytes, BroadcastMode, BroadcastSource, TxError,
};
use graviton_core::{SupportedChain, Transfer};

use crate::constants::SEND_TO_ETH_GAS_LIMIT;
use crate::msg::{self, MsgError};
use crate::wallet::{CosmosWalletManager, WalletError};

/// Errors from the signing dispatcher
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Wallet supports neither direct nor amino signing")]
    WalletCapability,

    #[error("Message build failed: {0}")]
    Msg(#[from] MsgError),

    #[error("Transaction assembly failed: {0}")]
    Tx(#[from] TxError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}

/// Which signing path a wallet gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    Direct,
    Amino,
}

/// Probe wallet capability for a chain. The priority is fixed: direct
/// signing is preferred whenever both modes are available.
pub async fn detect_signing_mode<W: CosmosWalletManager>(
    wallet: &W,
    chain: SupportedChain,
) -> Result<SigningMode, SigningError> {
    if wallet.can_sign_direct(chain).await {
        Ok(SigningMode::Direct)
    } else if wallet.can_sign_amino(chain).await {
        Ok(SigningMode::Amino)
    } else {
        Err(SigningError::WalletCapability)
    }
}

/// Sign a hub-departing transfer with whichever mode the wallet supports
/// and broadcast it, returning the transaction hash.
pub async fn sign_and_broadcast<W: CosmosWalletManager>(
    wallet: &W,
    transfer: &Transfer,
) -> Result<String, SigningError> {
    match detect_signing_mode(wallet, transfer.from_chain).await? {
        SigningMode::Direct => broadcast_with_direct_sign(wallet, transfer).await,
        SigningMode::Amino => broadcast_with_amino_sign(wallet, transfer).await,
    }
}

async fn broadcast_with_direct_sign<W: CosmosWalletManager>(
    wallet: &W,
    transfer: &Transfer,
) -> Result<String, SigningError> {
    let fee_amount = transfer.fee_amount.as_deref().unwrap_or("0");
    let memo = transfer.memo.as_deref().unwrap_or("");

    let message = msg::build_send_to_eth(transfer)?.to_any();
    let signed = wallet
        .sign_direct(
            transfer.from_chain,
            std::slice::from_ref(&message),
            fee_amount,
            SEND_TO_ETH_GAS_LIMIT,
            memo,
        )
        .await?;

    let tx_bytes = create_tx_raw_bytes(&signed);
    let tx_hash = wallet
        .broadcast(
            transfer.from_chain,
            tx_bytes,
            BroadcastMode::Sync,
            BroadcastSource::Lcd,
        )
        .await?;

    tracing::info!(tx_hash = %tx_hash, "Broadcast direct-signed transfer");
    Ok(tx_hash)
}

async fn broadcast_with_amino_sign<W: CosmosWalletManager>(
    wallet: &W,
    transfer: &Transfer,
) -> Result<String, SigningError> {
    let fee_amount = transfer.fee_amount.as_deref().unwrap_or("0");
    let memo = transfer.memo.as_deref().unwrap_or("");

    // The user signs the JSON form, but the broadcast body must carry the
    // binary message: both renditions are built from the same value.
    let message = msg::build_send_to_eth(transfer)?;
    let amino_message = message.to_amino();
    let proto_message = message.to_any();

    let signed = wallet
        .sign_amino(
            transfer.from_chain,
            std::slice::from_ref(&amino_message),
            fee_amount,
            SEND_TO_ETH_GAS_LIMIT,
            memo,
        )
        .await?;

    let tx_bytes = create_amino_tx_raw_bytes(&signed, std::slice::from_ref(&proto_message))?;
    let tx_hash = wallet
        .broadcast(
            transfer.from_chain,
            tx_bytes,
            BroadcastMode::Sync,
            BroadcastSource::Wallet,
        )
        .await?;

    tracing::info!(tx_hash = %tx_hash, "Broadcast amino-signed transfer");
    Ok(tx_hash)
}
