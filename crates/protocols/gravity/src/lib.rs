//! Gravity Bridge Cross-Chain Transfer Orchestration
//!
//! Routes asset transfers between the hub chain and Ethereum: builds the
//! bridge send message in both wire encodings, quotes congestion-based fee
//! tiers from the relay, and signs/broadcasts through whichever mode the
//! connected wallet supports.
//!
//! Broadcasts are submitted exactly once and carry no idempotency key;
//! callers must treat a failed broadcast as a failed transfer rather than
//! retrying blindly.

pub mod config;
pub mod constants;
pub mod fee;
pub mod msg;
pub mod signing;
pub mod transfer;
pub mod wallet;

pub use config::BridgeConfig;
pub use fee::{FeeEstimator, FeeError, GravityBridgeInfo, PendingBatch, PendingTransaction};
pub use msg::{
    build_send_to_eth, convert_token_to_chain_fee, convert_token_to_coin, MsgError, MsgSendToEth,
};
pub use signing::{detect_signing_mode, sign_and_broadcast, SigningError, SigningMode};
pub use transfer::{TransferError, TransferRouter};
pub use wallet::{
    CosmosWalletManager, EthProvider, EthWalletManager, SendToCosmosResponse, WalletError,
};
