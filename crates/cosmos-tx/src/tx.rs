//! Raw transaction assembly
//!
//! Encodes `cosmos.tx.v1beta1` transaction envelopes around already-signed
//! payloads. Two entry points mirror the two signing modes:
//!
//! - [`create_tx_raw_bytes`] re-wraps a direct signature's body/auth-info
//!   bytes untouched.
//! - [`create_amino_tx_raw_bytes`] rebuilds body and auth-info from the
//!   signed amino document and the binary messages, because the ledger only
//!   accepts the protobuf body even when the user signed the JSON form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amino::AminoSignResponse;
use crate::wire::ProtoWriter;

/// Type URL of a compressed secp256k1 public key
const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

/// A denom/amount pair in smallest units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Integer string in the denom's smallest unit
    pub amount: String,
}

/// A protobuf `google.protobuf.Any`: type URL plus encoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyMessage {
    pub type_url: String,
    pub value: Vec<u8>,
}

/// Signing mode, by `cosmos.tx.signing.v1beta1.SignMode` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignMode {
    Direct,
    LegacyAminoJson,
}

impl SignMode {
    pub fn proto_value(&self) -> u64 {
        match self {
            Self::Direct => 1,
            Self::LegacyAminoJson => 127,
        }
    }
}

/// Broadcast mode, by `cosmos.tx.v1beta1.BroadcastMode` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastMode {
    /// Wait for block inclusion (deprecated upstream)
    Block,
    /// Wait for mempool acceptance only
    Sync,
    /// Return immediately
    Async,
}

impl BroadcastMode {
    pub fn proto_value(&self) -> u64 {
        match self {
            Self::Block => 1,
            Self::Sync => 2,
            Self::Async => 3,
        }
    }
}

/// Which submission path carries the broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastSource {
    /// The ledger's LCD/REST endpoint
    Lcd,
    /// The wallet's own submission path
    Wallet,
}

/// What a direct-capable wallet hands back: the exact bytes it signed over
/// plus the signature.
#[derive(Debug, Clone)]
pub struct DirectSignResponse {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub signature: Vec<u8>,
}

/// Errors from raw-transaction assembly
#[derive(Debug, Error)]
pub enum TxError {
    #[error("Invalid {field} in sign doc: {value:?}")]
    InvalidSignDoc {
        field: &'static str,
        value: String,
    },
}

/// Encode a `cosmos.base.v1beta1.Coin` (denom=1, amount=2)
pub fn encode_coin(coin: &Coin) -> Vec<u8> {
    let mut w = ProtoWriter::new();
    w.string(1, &coin.denom);
    w.string(2, &coin.amount);
    w.into_bytes()
}

/// Encode a `google.protobuf.Any` (type_url=1, value=2)
pub fn encode_any(msg: &AnyMessage) -> Vec<u8> {
    let mut w = ProtoWriter::new();
    w.string(1, &msg.type_url);
    w.bytes(2, &msg.value);
    w.into_bytes()
}

/// Wrap a compressed secp256k1 public key in its Any envelope.
///
/// ```text
/// PubKey { key: bytes = 1 }
/// ```
fn encode_pubkey_any(key: &[u8]) -> Vec<u8> {
    let mut inner = ProtoWriter::new();
    inner.bytes(1, key);
    encode_any(&AnyMessage {
        type_url: SECP256K1_PUBKEY_TYPE_URL.to_string(),
        value: inner.into_bytes(),
    })
}

/// Encode `ModeInfo { single: Single { mode } }`
fn encode_mode_info(mode: SignMode) -> Vec<u8> {
    let mut single = ProtoWriter::new();
    single.uint64(1, mode.proto_value());
    let mut w = ProtoWriter::new();
    w.bytes(1, &single.into_bytes());
    w.into_bytes()
}

/// Encode `SignerInfo { public_key=1, mode_info=2, sequence=3 }`
fn encode_signer_info(pub_key: &[u8], mode: SignMode, sequence: u64) -> Vec<u8> {
    let mut w = ProtoWriter::new();
    w.bytes(1, &encode_pubkey_any(pub_key));
    w.bytes(2, &encode_mode_info(mode));
    w.uint64(3, sequence);
    w.into_bytes()
}

/// Encode `Fee { amount=1 (repeated), gas_limit=2 }`
fn encode_fee(amount: &[Coin], gas_limit: u64) -> Vec<u8> {
    let mut w = ProtoWriter::new();
    for coin in amount {
        w.bytes(1, &encode_coin(coin));
    }
    w.uint64(2, gas_limit);
    w.into_bytes()
}

/// Encode `TxBody { messages=1 (repeated), memo=2 }`
pub fn encode_tx_body(messages: &[AnyMessage], memo: &str) -> Vec<u8> {
    let mut w = ProtoWriter::new();
    for msg in messages {
        w.bytes(1, &encode_any(msg));
    }
    w.string(2, memo);
    w.into_bytes()
}

/// Encode `TxRaw { body_bytes=1, auth_info_bytes=2, signatures=3 (repeated) }`
pub fn encode_tx_raw(body: &[u8], auth_info: &[u8], signatures: &[Vec<u8>]) -> Vec<u8> {
    let mut w = ProtoWriter::new();
    w.bytes(1, body);
    w.bytes(2, auth_info);
    for sig in signatures {
        w.bytes(3, sig);
    }
    w.into_bytes()
}

/// Assemble broadcastable bytes from a direct signature.
///
/// The wallet signed over exactly these body/auth-info bytes, so they are
/// re-wrapped untouched.
pub fn create_tx_raw_bytes(signed: &DirectSignResponse) -> Vec<u8> {
    encode_tx_raw(
        &signed.body_bytes,
        &signed.auth_info_bytes,
        std::slice::from_ref(&signed.signature),
    )
}

/// Assemble broadcastable bytes from an amino signature.
///
/// The signature covers the canonical JSON doc, but the ledger only accepts
/// the protobuf body: the body is rebuilt from `messages` (the binary
/// renditions of the signed doc's msgs) and the auth info from the doc's
/// fee, sequence, and the signer's public key, with the legacy-amino sign
/// mode recorded so verifiers re-derive the JSON form.
pub fn create_amino_tx_raw_bytes(
    signed: &AminoSignResponse,
    messages: &[AnyMessage],
) -> Result<Vec<u8>, TxError> {
    let sequence: u64 =
        signed
            .signed
            .sequence
            .parse()
            .map_err(|_| TxError::InvalidSignDoc {
                field: "sequence",
                value: signed.signed.sequence.clone(),
            })?;
    let gas_limit: u64 = signed
        .signed
        .fee
        .gas
        .parse()
        .map_err(|_| TxError::InvalidSignDoc {
            field: "gas",
            value: signed.signed.fee.gas.clone(),
        })?;

    let body = encode_tx_body(messages, &signed.signed.memo);

    let mut auth = ProtoWriter::new();
    auth.bytes(
        1,
        &encode_signer_info(&signed.pub_key, SignMode::LegacyAminoJson, sequence),
    );
    auth.bytes(2, &encode_fee(&signed.signed.fee.amount, gas_limit));

    Ok(encode_tx_raw(
        &body,
        &auth.into_bytes(),
        std::slice::from_ref(&signed.signature),
    ))
}
