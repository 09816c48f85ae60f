//! Congestion-based bridge fee estimation
//!
//! The relay tracks batches of outbound transactions awaiting Ethereum
//! inclusion; the fees attached to pending transactions for a given ERC-20
//! contract are the live congestion signal. Tiers price relative to that
//! signal: matching it keeps a transfer slow, doubling it buys the fast
//! lane, quadrupling it buys instant batching.
//!
//! Every estimate re-fetches the snapshot; quotes are never cached, and a
//! failed fetch is fatal to fee display rather than served stale.

use serde::Deserialize;
use thiserror::Error;

use graviton_core::{amount, AmountError, BridgeFee, Erc20Token, SupportedChain, Token};

use crate::config::BridgeConfig;
use crate::constants::FEE_QUOTE_DECIMALS;

/// Errors from fee estimation
#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No pending batches to price against")]
    NoPendingBatches,

    #[error("Failed to fetch pending batches: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountError),
}

/// Relay snapshot: the slice of `gravity_bridge_info` the estimator reads
#[derive(Debug, Clone, Deserialize)]
pub struct GravityBridgeInfo {
    pub pending_tx: PendingTx,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PendingTx {
    pub pending_batches: Vec<PendingBatch>,
}

/// A relay-tracked group of outbound transactions awaiting inclusion
#[derive(Debug, Clone, Deserialize)]
pub struct PendingBatch {
    pub transactions: Vec<PendingTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PendingTransaction {
    pub erc20_fee: Erc20Fee,
}

/// Fee attached to a pending transaction, in quote currency
#[derive(Debug, Clone, Deserialize)]
pub struct Erc20Fee {
    pub contract: String,
    pub amount: f64,
}

/// Three-tier fee quoting against live relay congestion
pub struct FeeEstimator {
    client: reqwest::Client,
    info_url: String,
}

impl FeeEstimator {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            info_url: config.relay_info_url.clone(),
        }
    }

    /// Quote slow/fast/instant bridge fees for a token departing the hub.
    ///
    /// `token_price` is the quote-currency price of one token unit. All
    /// input validation happens before the relay is contacted.
    pub async fn estimate(
        &self,
        from_chain: SupportedChain,
        token: &Token,
        token_price: &str,
    ) -> Result<Vec<BridgeFee>, FeeError> {
        if !amount::is_positive(token_price) {
            return Err(FeeError::InvalidInput(format!(
                "token price must be a positive decimal, got {:?}",
                token_price
            )));
        }
        if from_chain != SupportedChain::GravityBridge {
            return Err(FeeError::InvalidInput(format!(
                "bridge fees are only defined departing the hub, not {}",
                from_chain
            )));
        }
        let erc20 = match token {
            Token::Erc20(t) => t,
            Token::Native(t) => {
                return Err(FeeError::InvalidInput(format!(
                    "congestion fees are keyed by ERC-20 contract; {} has none",
                    t.denom
                )));
            }
        };

        let info: GravityBridgeInfo = self
            .client
            .get(&self.info_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!(
            batches = info.pending_tx.pending_batches.len(),
            contract = %erc20.address,
            "Fetched pending batch snapshot"
        );

        derive_fees(&info, erc20, token_price)
    }
}

/// Sum the pending fees attached to a contract across all batches.
fn pending_fee_total(info: &GravityBridgeInfo, contract: &str) -> f64 {
    info.pending_tx
        .pending_batches
        .iter()
        .flat_map(|batch| &batch.transactions)
        .filter(|tx| tx.erc20_fee.contract.eq_ignore_ascii_case(contract))
        .map(|tx| tx.erc20_fee.amount)
        .sum()
}

/// Derive the three fee tiers from a relay snapshot.
///
/// The congestion sum is pinned to 6 decimal places (relay amounts arrive
/// as JSON numbers), then everything downstream is exact: tiers multiply by
/// 1/2/4 in the quote currency and convert to token units by dividing
/// through the price, rounded down to 6 decimal places so the quoted cost
/// is never overstated.
fn derive_fees(
    info: &GravityBridgeInfo,
    token: &Erc20Token,
    token_price: &str,
) -> Result<Vec<BridgeFee>, FeeError> {
    if info.pending_tx.pending_batches.is_empty() {
        return Err(FeeError::NoPendingBatches);
    }

    let total = pending_fee_total(info, &token.address);
    let congestion = amount::normalize(&format!("{:.6}", total))?;

    let tiers = [(1u8, "Slow", 1u32), (2, "Fast", 2), (3, "Instant", 4)];
    let mut fees = Vec::with_capacity(tiers.len());
    for (id, label, factor) in tiers {
        let in_currency = amount::mul_small(&congestion, factor)?;
        let in_tokens = amount::div_floor(&in_currency, token_price, FEE_QUOTE_DECIMALS)?;
        fees.push(BridgeFee {
            id,
            label: label.to_string(),
            denom: token.symbol.clone(),
            amount: in_tokens,
            amount_in_currency: in_currency,
        });
    }

    Ok(fees)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    fn usdc() -> Erc20Token {
        Erc20Token {
            address: CONTRACT.to_string(),
            decimals: 6,
            symbol: "USDC".to_string(),
        }
    }

    fn tx(contract: &str, amount: f64) -> PendingTransaction {
        PendingTransaction {
            erc20_fee: Erc20Fee {
                contract: contract.to_string(),
                amount,
            },
        }
    }

    fn info(batches: Vec<Vec<PendingTransaction>>) -> GravityBridgeInfo {
        GravityBridgeInfo {
            pending_tx: PendingTx {
                pending_batches: batches
                    .into_iter()
                    .map(|transactions| PendingBatch { transactions })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_tier_ratios() {
        let snapshot = info(vec![vec![tx(CONTRACT, 4.0)], vec![tx(CONTRACT, 6.0)]]);
        let fees = derive_fees(&snapshot, &usdc(), "1").unwrap();

        assert_eq!(fees.len(), 3);
        assert_eq!(fees[0].amount_in_currency, "10");
        assert_eq!(fees[1].amount_in_currency, "20");
        assert_eq!(fees[2].amount_in_currency, "40");
        assert_eq!(fees[0].label, "Slow");
        assert_eq!(fees[1].label, "Fast");
        assert_eq!(fees[2].label, "Instant");
        assert_eq!(fees[0].id, 1);
        assert_eq!(fees[2].id, 3);
        // At price 1 the token amounts match the currency amounts
        assert_eq!(fees[0].amount, "10");
        assert_eq!(fees[2].amount, "40");
    }

    #[test]
    fn test_token_amount_rounds_down() {
        let snapshot = info(vec![vec![tx(CONTRACT, 10.0)]]);
        let fees = derive_fees(&snapshot, &usdc(), "3").unwrap();
        assert_eq!(fees[0].amount, "3.333333");
        assert_eq!(fees[1].amount, "6.666666");
        assert_eq!(fees[2].amount, "13.333333");
    }

    #[test]
    fn test_other_contracts_ignored() {
        let snapshot = info(vec![vec![
            tx(CONTRACT, 4.0),
            tx("0x0000000000000000000000000000000000000001", 100.0),
        ]]);
        let fees = derive_fees(&snapshot, &usdc(), "1").unwrap();
        assert_eq!(fees[0].amount_in_currency, "4");
    }

    #[test]
    fn test_contract_match_is_case_insensitive() {
        let snapshot = info(vec![vec![tx(&CONTRACT.to_lowercase(), 5.0)]]);
        let fees = derive_fees(&snapshot, &usdc(), "1").unwrap();
        assert_eq!(fees[0].amount_in_currency, "5");
    }

    #[test]
    fn test_zero_batches_is_an_error() {
        let snapshot = info(vec![]);
        assert!(matches!(
            derive_fees(&snapshot, &usdc(), "1"),
            Err(FeeError::NoPendingBatches)
        ));
    }

    #[test]
    fn test_snapshot_deserializes_relay_json() {
        let json = format!(
            r#"{{
              "pending_tx": {{
                "pending_batches": [
                  {{
                    "batch_nonce": 4879,
                    "transactions": [
                      {{"id": 1, "erc20_fee": {{"contract": "{CONTRACT}", "amount": 2.5}}}},
                      {{"id": 2, "erc20_fee": {{"contract": "{CONTRACT}", "amount": 1.25}}}}
                    ]
                  }}
                ]
              }}
            }}"#
        );
        let snapshot: GravityBridgeInfo = serde_json::from_str(&json).unwrap();
        let fees = derive_fees(&snapshot, &usdc(), "1").unwrap();
        assert_eq!(fees[0].amount_in_currency, "3.75");
    }

    #[tokio::test]
    async fn test_estimate_rejects_bad_price_before_fetch() {
        let estimator = FeeEstimator::new(&BridgeConfig::default());
        for price in ["", "-1", "0", "abc"] {
            let err = estimator
                .estimate(SupportedChain::GravityBridge, &Token::Erc20(usdc()), price)
                .await
                .unwrap_err();
            assert!(matches!(err, FeeError::InvalidInput(_)), "price {:?}", price);
        }
    }

    #[tokio::test]
    async fn test_estimate_rejects_non_hub_source() {
        let estimator = FeeEstimator::new(&BridgeConfig::default());
        let err = estimator
            .estimate(SupportedChain::Ethereum, &Token::Erc20(usdc()), "1")
            .await
            .unwrap_err();
        assert!(matches!(err, FeeError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_estimate_rejects_native_token() {
        let estimator = FeeEstimator::new(&BridgeConfig::default());
        let token = Token::Native(graviton_core::NativeToken {
            denom: "ugraviton".to_string(),
            decimals: 6,
            symbol: "GRAVITON".to_string(),
        });
        let err = estimator
            .estimate(SupportedChain::GravityBridge, &token, "1")
            .await
            .unwrap_err();
        assert!(matches!(err, FeeError::InvalidInput(_)));
    }
}
