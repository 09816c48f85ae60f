//! Transfer routing
//!
//! Top-level entry point: validates that a (source, destination) pair is a
//! supported bridge route and runs the directional handler. Routing is a
//! match over a closed set of chain pairs, so an unknown third direction
//! cannot fall through to a default handler.
//!
//! Validation happens before any network call; wallet and broadcast
//! failures propagate unmodified. A rejected broadcast after a successful
//! sign is still a total failure of the transfer attempt.

use thiserror::Error;

use graviton_core::{amount, AmountError, Rounding, SupportedChain, Token, Transfer};

use crate::config::BridgeConfig;
use crate::signing::{self, SigningError};
use crate::wallet::{CosmosWalletManager, EthProvider, EthWalletManager, WalletError};

/// Errors from transfer routing
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Transferring from {from} to {to} is not supported on Gravity Bridge")]
    UnsupportedRoute {
        from: SupportedChain,
        to: SupportedChain,
    },

    #[error("{chain} is not a supported source chain for this direction")]
    UnsupportedChain { chain: SupportedChain },

    #[error("Gravity Bridge lock transfers allow only ERC-20 tokens")]
    WrongTokenType,

    #[error("Broadcast response carried no transaction hash")]
    Broadcast,

    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Signing failed: {0}")]
    Signing(#[from] SigningError),
}

/// Routes transfers to the directional handler matching their chain pair
pub struct TransferRouter<C, E> {
    cosmos: C,
    eth: E,
    config: BridgeConfig,
}

impl<C: CosmosWalletManager, E: EthWalletManager> TransferRouter<C, E> {
    pub fn new(cosmos: C, eth: E, config: BridgeConfig) -> Self {
        Self {
            cosmos,
            eth,
            config,
        }
    }

    /// Whether a (source, destination) pair has a registered handler
    pub fn is_supported_route(from: SupportedChain, to: SupportedChain) -> bool {
        matches!(
            (from, to),
            (SupportedChain::Ethereum, SupportedChain::GravityBridge)
                | (SupportedChain::GravityBridge, SupportedChain::Ethereum)
        )
    }

    /// Route a transfer and return its transaction hash
    pub async fn route(&self, transfer: &Transfer) -> Result<String, TransferError> {
        tracing::info!(
            from = %transfer.from_chain,
            to = %transfer.to_chain,
            amount = %transfer.amount,
            "Routing transfer"
        );

        match (transfer.from_chain, transfer.to_chain) {
            (SupportedChain::Ethereum, SupportedChain::GravityBridge) => {
                self.transfer_to_gravity_bridge(transfer).await
            }
            (SupportedChain::GravityBridge, SupportedChain::Ethereum) => {
                self.transfer_from_gravity_bridge(transfer).await
            }
            (from, to) => Err(TransferError::UnsupportedRoute { from, to }),
        }
    }

    /// Ethereum -> hub: approve the bridge contract's allowance on the
    /// ERC-20, then submit the lock call and extract its transaction hash.
    async fn transfer_to_gravity_bridge(&self, transfer: &Transfer) -> Result<String, TransferError> {
        let erc20 = match &transfer.token {
            Token::Erc20(t) => t,
            Token::Native(_) => return Err(TransferError::WrongTokenType),
        };
        if !transfer.from_chain.is_ethereum() {
            return Err(TransferError::UnsupportedChain {
                chain: transfer.from_chain,
            });
        }

        let web3 = self
            .eth
            .web3(transfer.from_chain)
            .await
            .ok_or(WalletError::NotConnected {
                chain: transfer.from_chain,
            })?;

        let scaled = amount::to_base_units(&transfer.amount, erc20.decimals, Rounding::Down)?;
        let contract =
            self.config
                .contract_for(transfer.from_chain)
                .ok_or(TransferError::UnsupportedChain {
                    chain: transfer.from_chain,
                })?;

        web3.approve(&transfer.from_address, &erc20.address, contract, &scaled)
            .await?;
        let response = web3
            .send_to_cosmos(
                contract,
                &transfer.from_address,
                &erc20.address,
                &transfer.to_address,
                &scaled,
            )
            .await?;

        let tx_hash = response.transaction_hash.ok_or(TransferError::Broadcast)?;
        tracing::info!(tx_hash = %tx_hash, "Lock transfer submitted");
        Ok(tx_hash)
    }

    /// Hub -> Ethereum: a signed bridge send, dispatched by wallet
    /// capability.
    async fn transfer_from_gravity_bridge(
        &self,
        transfer: &Transfer,
    ) -> Result<String, TransferError> {
        if !transfer.from_chain.is_cosmos() {
            return Err(TransferError::UnsupportedChain {
                chain: transfer.from_chain,
            });
        }
        Ok(signing::sign_and_broadcast(&self.cosmos, transfer).await?)
    }
}
