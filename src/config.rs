// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use std::time::Duration;

use alloy_primitives::{address, Address, B256, U256};
use serde::Deserialize;

/// Address the collection contract is deployed at.
pub const CONTRACT_ADDRESS: Address = address!("da68ab92507e2048ee50d6c6e11810008a4e7215");
/// Goerli.
pub const EXPECTED_CHAIN_ID: u64 = 0x5;
/// Cap shown next to the live counter.
pub const TOTAL_MINT_COUNT: u64 = 50;

/// Everything the controller and the view need to know about the collection.
///
/// Every field has a default, so a settings file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MintConfig {
    /// Deployed contract address.
    pub contract_address: Address,
    /// Chain the contract lives on.
    pub expected_chain_id: u64,
    /// Name of that chain, used in the wrong-network alert.
    pub network_name: String,
    /// Title line of the view.
    pub collection_name: String,
    /// Second line of the view.
    pub tagline: String,
    /// Marketplace page for the whole collection.
    pub collection_link: String,
    /// Marketplace prefix for single assets.
    pub asset_link_base: String,
    /// Block explorer prefix for transactions.
    pub explorer_tx_base: String,
    /// Footer attribution handle.
    pub twitter_handle: String,
    /// Supply cap displayed by the counter.
    pub total_mint_count: u64,
    /// Delay between receipt and event polls, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            contract_address: CONTRACT_ADDRESS,
            expected_chain_id: EXPECTED_CHAIN_ID,
            network_name: "Goerli Test Network".to_string(),
            collection_name: "My NFT Collection".to_string(),
            tagline: "Each unique. Each beautiful. Discover your NFT today.".to_string(),
            collection_link: "https://testnets.opensea.io/collection/animalsnft-3".to_string(),
            asset_link_base: "https://testnets.opensea.io/assets".to_string(),
            explorer_tx_base: "https://goerli.etherscan.io/tx".to_string(),
            twitter_handle: "bruno_fialho".to_string(),
            total_mint_count: TOTAL_MINT_COUNT,
            poll_interval_ms: 4_000,
        }
    }
}

impl MintConfig {
    /// Profile link behind the footer.
    #[must_use]
    pub fn twitter_link(&self) -> String {
        format!("https://twitter.com/{}", self.twitter_handle)
    }

    /// Marketplace link of a single minted token.
    #[must_use]
    pub fn asset_link(&self, token_id: U256) -> String {
        format!(
            "{}/{}/{token_id}",
            self.asset_link_base.trim_end_matches('/'),
            self.contract_address
        )
    }

    /// Block explorer link of a transaction.
    #[must_use]
    pub fn transaction_link(&self, hash: B256) -> String {
        format!("{}/{hash}", self.explorer_tx_base.trim_end_matches('/'))
    }

    /// Polling period as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let config: MintConfig = toml::from_str(
            r#"
            total_mint_count = 100
            twitter_handle = "someone"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.total_mint_count, 100);
        assert_eq!(config.twitter_link(), "https://twitter.com/someone");
        assert_eq!(config.contract_address, CONTRACT_ADDRESS);
        assert_eq!(config.expected_chain_id, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = toml::from_str::<MintConfig>("supply = 3");
        assert!(parsed.is_err());
    }

    #[test]
    fn asset_link_points_at_contract_and_token() {
        let config = MintConfig::default();
        let link = config.asset_link(U256::from(7u64));

        assert!(link.starts_with("https://testnets.opensea.io/assets/0x"));
        assert!(link
            .to_lowercase()
            .contains("da68ab92507e2048ee50d6c6e11810008a4e7215"));
        assert!(link.ends_with("/7"));
    }

    #[test]
    fn transaction_link_uses_explorer_base() {
        let config = MintConfig {
            explorer_tx_base: "https://explorer.test/tx/".to_string(),
            ..MintConfig::default()
        };

        let link = config.transaction_link(B256::ZERO);
        assert_eq!(link, format!("https://explorer.test/tx/{}", B256::ZERO));
    }
}
