//! Bridge configuration

use serde::{Deserialize, Serialize};

use graviton_core::SupportedChain;

use crate::constants;

/// Endpoints and contract addresses the bridge talks to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Relay endpoint reporting pending-batch congestion
    #[serde(default = "default_relay_info_url")]
    pub relay_info_url: String,

    /// Gravity bridge contract address on Ethereum
    #[serde(default = "default_gravity_contract")]
    pub gravity_contract: String,
}

fn default_relay_info_url() -> String {
    constants::RELAY_INFO_URL.to_string()
}

fn default_gravity_contract() -> String {
    constants::GRAVITY_CONTRACT_ETH.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            relay_info_url: default_relay_info_url(),
            gravity_contract: default_gravity_contract(),
        }
    }
}

impl BridgeConfig {
    /// Bridge contract for an Ethereum-side source chain
    pub fn contract_for(&self, chain: SupportedChain) -> Option<&str> {
        match chain {
            SupportedChain::Ethereum => Some(&self.gravity_contract),
            _ => None,
        }
    }
}
