//! cosmos-tx: Transaction wire encoding for Cosmos-SDK ledgers
//!
//! Provides a minimal protobuf writer, the legacy amino sign-doc structures,
//! and raw-transaction assembly for both signing modes. The relay accepts
//! only the binary body, so even amino-signed transactions are assembled
//! around the protobuf payload.

pub mod amino;
pub mod tx;
pub mod wire;

pub use amino::{AminoMsg, AminoSignResponse, StdFee, StdSignDoc};
pub use tx::{
    create_amino_tx_raw_bytes, create_tx_raw_bytes, encode_any, encode_coin, encode_tx_body,
    encode_tx_raw, AnyMessage, BroadcastMode, BroadcastSource, Coin, DirectSignResponse, SignMode,
    TxError,
};
pub use wire::ProtoWriter;
