//! Legacy amino sign-doc structures
//!
//! Amino signing covers a canonical JSON document with snake_case keys; the
//! wallet signs the JSON form while the broadcast payload still carries the
//! binary body (see [`crate::tx::create_amino_tx_raw_bytes`]).

use serde::{Deserialize, Serialize};

use crate::tx::Coin;

/// A legacy amino message: a type tag plus an arbitrary JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: serde_json::Value,
}

/// Fee section of an amino sign doc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    /// Gas limit as a decimal string (amino JSON quotes all integers)
    pub gas: String,
}

/// The canonical JSON document an amino-capable wallet signs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub fee: StdFee,
    pub msgs: Vec<AminoMsg>,
    pub memo: String,
}

/// What an amino-capable wallet hands back: the document it actually signed
/// plus the signature and the signer's compressed secp256k1 public key.
#[derive(Debug, Clone)]
pub struct AminoSignResponse {
    pub signed: StdSignDoc,
    pub pub_key: Vec<u8>,
    pub signature: Vec<u8>,
}
