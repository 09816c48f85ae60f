//! Bridge send message construction
//!
//! A hub-departing transfer is one `MsgSendToEth` message, built once as a
//! structured value and rendered into whichever encoding the signing path
//! needs: the binary protobuf form for direct signing and the broadcast
//! body, or the legacy JSON form for amino signing. Both renditions carry
//! identical addresses and scaled amounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cosmos_tx::{encode_coin, AminoMsg, AnyMessage, Coin, ProtoWriter};
use graviton_core::{amount, AmountError, Rounding, Token, Transfer};

use crate::constants::{ERC20_DENOM_PREFIX, MSG_SEND_TO_ETH_AMINO_TYPE, MSG_SEND_TO_ETH_TYPE_URL};

/// Errors from message construction
#[derive(Debug, Error)]
pub enum MsgError {
    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),
}

/// The structured bridge send: sender on the hub, destination on Ethereum,
/// and three coins in smallest units (amount, selected bridge fee, hub
/// chain fee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgSendToEth {
    pub sender: String,
    pub eth_dest: String,
    pub amount: Coin,
    pub bridge_fee: Coin,
    pub chain_fee: Coin,
}

/// Build the bridge send message for a transfer.
///
/// The transfer amount and the selected bridge fee scale by the token's
/// decimals and truncate; the chain fee scales through
/// [`convert_token_to_chain_fee`], which rounds up instead. A transfer
/// without a selected bridge fee sends `0`.
pub fn build_send_to_eth(transfer: &Transfer) -> Result<MsgSendToEth, MsgError> {
    let decimals = transfer.token.decimals();

    let amount = amount::to_base_units(&transfer.amount, decimals, Rounding::Down)?;
    let fee_amount = match &transfer.bridge_fee {
        Some(fee) => amount::to_base_units(&fee.amount, decimals, Rounding::Down)?,
        None => "0".to_string(),
    };
    let chain_fee =
        convert_token_to_chain_fee(&transfer.token, transfer.chain_fee.as_deref().unwrap_or("0"))?;

    let message = MsgSendToEth {
        sender: transfer.from_address.clone(),
        eth_dest: transfer.to_address.clone(),
        amount: convert_token_to_coin(&transfer.token, amount),
        bridge_fee: convert_token_to_coin(&transfer.token, fee_amount),
        chain_fee,
    };

    tracing::debug!(
        sender = %message.sender,
        eth_dest = %message.eth_dest,
        amount = %message.amount.amount,
        "Built MsgSendToEth"
    );
    Ok(message)
}

/// Convert a token and a smallest-unit amount into a hub coin.
///
/// ERC-20 tokens are represented on the hub as `"gravity" + contract
/// address`; native tokens keep their on-chain denom unchanged.
pub fn convert_token_to_coin(token: &Token, amount: impl Into<String>) -> Coin {
    match token {
        Token::Erc20(t) => Coin {
            denom: format!("{}{}", ERC20_DENOM_PREFIX, t.address),
            amount: amount.into(),
        },
        Token::Native(t) => Coin {
            denom: t.denom.clone(),
            amount: amount.into(),
        },
    }
}

/// Scale a human-unit chain fee into a coin, rounding up.
///
/// Underpaying the chain fee strands the transfer, so fractional dust bumps
/// the fee to the next smallest unit while the transfer amount itself
/// truncates.
pub fn convert_token_to_chain_fee(token: &Token, fee: &str) -> Result<Coin, MsgError> {
    let scaled = amount::to_base_units(fee, token.decimals(), Rounding::Up)?;
    Ok(convert_token_to_coin(token, scaled))
}

impl MsgSendToEth {
    /// Binary rendition.
    ///
    /// ```text
    /// MsgSendToEth {
    ///   sender     = 1 (string)
    ///   eth_dest   = 2 (string)
    ///   amount     = 3 (Coin)
    ///   bridge_fee = 4 (Coin)
    ///   chain_fee  = 5 (Coin)
    /// }
    /// ```
    pub fn to_any(&self) -> AnyMessage {
        let mut w = ProtoWriter::new();
        w.string(1, &self.sender);
        w.string(2, &self.eth_dest);
        w.bytes(3, &encode_coin(&self.amount));
        w.bytes(4, &encode_coin(&self.bridge_fee));
        w.bytes(5, &encode_coin(&self.chain_fee));
        AnyMessage {
            type_url: MSG_SEND_TO_ETH_TYPE_URL.to_string(),
            value: w.into_bytes(),
        }
    }

    /// Legacy JSON rendition with snake_case value keys
    pub fn to_amino(&self) -> AminoMsg {
        AminoMsg {
            msg_type: MSG_SEND_TO_ETH_AMINO_TYPE.to_string(),
            value: serde_json::json!({
                "sender": self.sender,
                "eth_dest": self.eth_dest,
                "amount": self.amount,
                "bridge_fee": self.bridge_fee,
                "chain_fee": self.chain_fee,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graviton_core::{Erc20Token, NativeToken, SupportedChain};

    fn erc20_token() -> Token {
        Token::Erc20(Erc20Token {
            address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
            decimals: 6,
            symbol: "USDC".to_string(),
        })
    }

    fn transfer(token: Token, amount: &str) -> Transfer {
        Transfer {
            from_chain: SupportedChain::GravityBridge,
            to_chain: SupportedChain::Ethereum,
            from_address: "gravity1sender".to_string(),
            to_address: "0xdest".to_string(),
            amount: amount.to_string(),
            token,
            bridge_fee: None,
            chain_fee: None,
            fee_amount: None,
            memo: None,
        }
    }

    #[test]
    fn test_erc20_amount_scaling() {
        let message = build_send_to_eth(&transfer(erc20_token(), "100")).unwrap();
        assert_eq!(message.amount.amount, "100000000");
        assert_eq!(
            message.amount.denom,
            "gravity0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
        );
    }

    #[test]
    fn test_native_denom_unchanged() {
        let token = Token::Native(NativeToken {
            denom: "ugraviton".to_string(),
            decimals: 6,
            symbol: "GRAVITON".to_string(),
        });
        let message = build_send_to_eth(&transfer(token, "2.5")).unwrap();
        assert_eq!(message.amount.denom, "ugraviton");
        assert_eq!(message.amount.amount, "2500000");
    }

    #[test]
    fn test_bridge_fee_scaled_or_zero() {
        let mut t = transfer(erc20_token(), "100");
        let message = build_send_to_eth(&t).unwrap();
        assert_eq!(message.bridge_fee.amount, "0");

        t.bridge_fee = Some(graviton_core::BridgeFee {
            id: 1,
            label: "Slow".to_string(),
            denom: "USDC".to_string(),
            amount: "3.333333".to_string(),
            amount_in_currency: "10".to_string(),
        });
        let message = build_send_to_eth(&t).unwrap();
        assert_eq!(message.bridge_fee.amount, "3333333");
    }

    #[test]
    fn test_chain_fee_rounds_up_amount_truncates() {
        // Same fractional-dust input: the transfer amount truncates, the
        // chain fee is bumped to the next smallest unit.
        let mut t = transfer(erc20_token(), "0.0000015");
        t.chain_fee = Some("0.0000015".to_string());
        let message = build_send_to_eth(&t).unwrap();
        assert_eq!(message.amount.amount, "1");
        assert_eq!(message.chain_fee.amount, "2");
    }

    #[test]
    fn test_missing_chain_fee_is_zero() {
        let message = build_send_to_eth(&transfer(erc20_token(), "1")).unwrap();
        assert_eq!(message.chain_fee.amount, "0");
    }

    #[test]
    fn test_encodings_carry_identical_values() {
        let mut t = transfer(erc20_token(), "100");
        t.chain_fee = Some("0.25".to_string());
        let message = build_send_to_eth(&t).unwrap();

        let any = message.to_any();
        assert_eq!(any.type_url, "/gravity.v1.MsgSendToEth");

        let amino = message.to_amino();
        assert_eq!(amino.msg_type, "gravity/MsgSendToEth");
        let value = &amino.value;
        assert_eq!(value["sender"], message.sender.as_str());
        assert_eq!(value["eth_dest"], message.eth_dest.as_str());
        assert_eq!(value["amount"]["amount"], message.amount.amount.as_str());
        assert_eq!(value["amount"]["denom"], message.amount.denom.as_str());
        assert_eq!(
            value["bridge_fee"]["amount"],
            message.bridge_fee.amount.as_str()
        );
        assert_eq!(
            value["chain_fee"]["amount"],
            message.chain_fee.amount.as_str()
        );
    }

    #[test]
    fn test_proto_encoding_byte_exact() {
        let token = Token::Native(NativeToken {
            denom: "ua".to_string(),
            decimals: 0,
            symbol: "UA".to_string(),
        });
        let mut t = transfer(token, "5");
        t.from_address = "g1".to_string();
        t.to_address = "0xE".to_string();
        let any = build_send_to_eth(&t).unwrap().to_any();

        // sender "g1", eth_dest "0xE", amount 5ua, bridge/chain fees 0ua
        let expected = "0a0267311203307845\
                        1a070a027561120135\
                        22070a027561120130\
                        2a070a027561120130";
        assert_eq!(hex::encode(&any.value), expected);
    }

    #[test]
    fn test_rejects_malformed_amount() {
        let result = build_send_to_eth(&transfer(erc20_token(), "not-a-number"));
        assert!(matches!(result, Err(MsgError::Amount(_))));
    }
}
