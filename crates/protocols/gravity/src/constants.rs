//! Gravity Bridge protocol constants

/// Relay endpoint reporting pending-batch congestion
pub const RELAY_INFO_URL: &str = "https://info.gravitychain.io:9000/gravity_bridge_info";

/// Gravity bridge contract on Ethereum mainnet
pub const GRAVITY_CONTRACT_ETH: &str = "0xa4108aA1Ec4967F8b52220a4f7e94A8201F2D906";

/// Fixed gas limit for hub send transactions
pub const SEND_TO_ETH_GAS_LIMIT: u64 = 200_000;

/// Protobuf type URL of the bridge send message
pub const MSG_SEND_TO_ETH_TYPE_URL: &str = "/gravity.v1.MsgSendToEth";

/// Legacy amino type tag of the bridge send message
pub const MSG_SEND_TO_ETH_AMINO_TYPE: &str = "gravity/MsgSendToEth";

/// Prefix turning an ERC-20 contract address into a hub denom
pub const ERC20_DENOM_PREFIX: &str = "gravity";

/// Fractional digits kept in fee quotes
pub const FEE_QUOTE_DECIMALS: u32 = 6;
