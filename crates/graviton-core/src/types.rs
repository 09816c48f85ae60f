//! Core type definitions for Graviton

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::TokenError;

/// Chains the bridge UI can present. Only the GravityBridge<->Ethereum pair
/// actually routes; the other ledgers exist for chain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportedChain {
    GravityBridge,
    Ethereum,
    Osmosis,
    CosmosHub,
}

impl SupportedChain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GravityBridge => "gravity-bridge",
            Self::Ethereum => "ethereum",
            Self::Osmosis => "osmosis",
            Self::CosmosHub => "cosmos-hub",
        }
    }

    /// Whether the chain is a Cosmos-SDK ledger (signable via direct/amino)
    pub fn is_cosmos(&self) -> bool {
        matches!(self, Self::GravityBridge | Self::Osmosis | Self::CosmosHub)
    }

    /// Whether the chain is an Ethereum-style chain (web3 wallet territory)
    pub fn is_ethereum(&self) -> bool {
        matches!(self, Self::Ethereum)
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ERC-20 token on the Ethereum side of the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc20Token {
    /// Contract address (0x-prefixed hex)
    pub address: String,
    pub decimals: u32,
    pub symbol: String,
}

/// A native Cosmos-ledger token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeToken {
    /// On-chain denom (e.g. "ugraviton" or an ibc/... voucher denom)
    pub denom: String,
    pub decimals: u32,
    pub symbol: String,
}

/// A bridgeable token. Exactly one variant, enforced by construction; the
/// "neither" state only exists in [`TokenInfo`] registry entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Token {
    Erc20(Erc20Token),
    Native(NativeToken),
}

impl Token {
    pub fn decimals(&self) -> u32 {
        match self {
            Self::Erc20(t) => t.decimals,
            Self::Native(t) => t.decimals,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Self::Erc20(t) => &t.symbol,
            Self::Native(t) => &t.symbol,
        }
    }
}

/// Raw token registry entry: the static token tables ship both slots as
/// optional, so a malformed entry can have neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc20: Option<Erc20Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosmos: Option<NativeToken>,
}

impl TryFrom<TokenInfo> for Token {
    type Error = TokenError;

    /// The ERC-20 slot wins when an entry carries both.
    fn try_from(info: TokenInfo) -> Result<Self, Self::Error> {
        if let Some(erc20) = info.erc20 {
            Ok(Token::Erc20(erc20))
        } else if let Some(native) = info.cosmos {
            Ok(Token::Native(native))
        } else {
            Err(TokenError::MissingInfo)
        }
    }
}

/// A three-tier bridge fee quote entry (slow=1, fast=2, instant=3)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeFee {
    pub id: u8,
    pub label: String,
    /// Token symbol the fee is denominated in
    pub denom: String,
    /// Fee in token units (decimal string)
    pub amount: String,
    /// Fee in the quote currency (decimal string)
    pub amount_in_currency: String,
}

/// A single transfer request. Created once per user action and consumed
/// exactly once by the router; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from_chain: SupportedChain,
    pub to_chain: SupportedChain,
    pub from_address: String,
    pub to_address: String,
    /// Amount in human units (decimal string)
    pub amount: String,
    pub token: Token,
    /// Selected bridge fee tier, scaled into the message alongside the amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_fee: Option<BridgeFee>,
    /// Hub chain fee in human units (decimal string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_fee: Option<String>,
    /// Network fee amount handed to the wallet at signing time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}
