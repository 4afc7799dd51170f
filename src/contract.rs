// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use std::{thread, time::Duration};

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    provider::{decode_hex, encode_hex, Log, ProviderExt, TransactionReceipt},
};

mod abi {
    #![allow(missing_docs)]

    alloy_sol_types::sol! {
        interface IEpicNft {
            function getTotalNFTsMintedSoFar() external view returns (uint256);
            function makeAnEpicNFT() external;
            event NewEpicNFTMinted(address sender, uint256 tokenId);
        }
    }
}

use abi::IEpicNft;

/// Handle on the deployed collection contract, bound to one provider.
#[derive(Debug)]
pub struct EpicNft<'p, P: ?Sized> {
    provider: &'p P,
    address: Address,
    poll_interval: Duration,
}

/// A submitted mint transaction that has not been confirmed yet.
#[derive(Debug)]
pub struct PendingTransaction<'p, P: ?Sized> {
    provider: &'p P,
    hash: B256,
    poll_interval: Duration,
}

/// Provider-side log filter on `NewEpicNFTMinted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintSubscription {
    filter_id: String,
}

/// A decoded `NewEpicNFTMinted` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintedEvent {
    /// Account the token was minted to.
    pub recipient: Address,
    /// Identifier of the new token.
    pub token_id: U256,
}

impl<'p, P: ProviderExt + ?Sized> EpicNft<'p, P> {
    /// Binds the contract at `address` to `provider`.
    pub fn new(provider: &'p P, address: Address) -> Self {
        Self {
            provider,
            address,
            poll_interval: Duration::from_secs(4),
        }
    }

    /// Sets how often pending transactions poll for their receipt.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Total number of tokens minted so far.
    ///
    /// # Errors
    /// Fails when the call fails or the return data is not a `uint256`.
    pub fn total_minted(&self) -> Result<U256> {
        let data = IEpicNft::getTotalNFTsMintedSoFarCall {}.abi_encode();
        let output = self.provider.call(self.address, &data)?;
        Ok(IEpicNft::getTotalNFTsMintedSoFarCall::abi_decode_returns(
            &output,
        )?)
    }

    /// Sends `makeAnEpicNFT()` from `from`; the wallet signs and pays gas.
    ///
    /// # Errors
    /// Fails when the wallet refuses or cannot submit the transaction.
    pub fn mint(&self, from: Address) -> Result<PendingTransaction<'p, P>> {
        let data = IEpicNft::makeAnEpicNFTCall {}.abi_encode();
        let hash = self.provider.send_transaction(from, self.address, &data)?;

        Ok(PendingTransaction {
            provider: self.provider,
            hash,
            poll_interval: self.poll_interval,
        })
    }

    /// Installs a log filter for mint notifications.
    ///
    /// # Errors
    /// Fails when the provider cannot install the filter.
    pub fn subscribe_minted(&self) -> Result<MintSubscription> {
        let filter_id = self
            .provider
            .new_filter(self.address, IEpicNft::NewEpicNFTMinted::SIGNATURE_HASH)?;
        Ok(MintSubscription { filter_id })
    }

    /// Notifications delivered since the last poll of `subscription`.
    ///
    /// Logs that are not mint notifications are skipped, and so are mint
    /// logs that fail to decode; the rest of the batch is still returned.
    ///
    /// # Errors
    /// Fails only when the filter itself cannot be polled.
    pub fn minted_events(&self, subscription: &MintSubscription) -> Result<Vec<MintedEvent>> {
        let logs = self.provider.filter_changes(&subscription.filter_id)?;

        let mut events = Vec::with_capacity(logs.len());
        for log in &logs {
            match MintedEvent::decode(log) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => warn!(%err, data = %log.data, "skipping undecodable mint log"),
            }
        }
        Ok(events)
    }
}

impl<P: ProviderExt + ?Sized> PendingTransaction<'_, P> {
    /// Transaction hash.
    #[must_use]
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Blocks until the transaction is mined.
    ///
    /// There is no local timeout.
    ///
    /// # Errors
    /// Returns [`Error::Reverted`] for a failed transaction, or the first
    /// error hit while fetching the receipt.
    pub fn wait(self) -> Result<TransactionReceipt> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(self.hash)? {
                if !receipt.success {
                    return Err(Error::Reverted { hash: self.hash });
                }
                return Ok(receipt);
            }

            debug!(hash = %self.hash, "transaction pending");
            thread::sleep(self.poll_interval);
        }
    }
}

impl MintSubscription {
    /// Provider-assigned filter identifier.
    #[must_use]
    pub fn filter_id(&self) -> &str {
        &self.filter_id
    }
}

impl MintedEvent {
    /// Decodes `log`, or `None` when it carries another event.
    ///
    /// # Errors
    /// Fails when a mint log carries malformed data.
    pub fn decode(log: &Log) -> Result<Option<Self>> {
        if log.topics.first() != Some(&IEpicNft::NewEpicNFTMinted::SIGNATURE_HASH) {
            return Ok(None);
        }

        let data = decode_hex(&log.data)?;
        let event =
            IEpicNft::NewEpicNFTMinted::decode_raw_log(log.topics.iter().copied(), &data)?;

        Ok(Some(Self {
            recipient: event.sender,
            token_id: event.tokenId,
        }))
    }

    /// Encodes the notification the way the contract emits it.
    #[must_use]
    pub fn to_log(&self) -> Log {
        let event = IEpicNft::NewEpicNFTMinted {
            sender: self.recipient,
            tokenId: self.token_id,
        };

        Log {
            topics: vec![IEpicNft::NewEpicNFTMinted::SIGNATURE_HASH],
            data: encode_hex(&event.encode_data()),
        }
    }
}

/// ABI encoding of the `getTotalNFTsMintedSoFar()` return value.
#[must_use]
pub fn encode_total_minted(total: U256) -> Vec<u8> {
    total.to_be_bytes::<32>().to_vec()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mock::MockProvider;

    fn contract(provider: &MockProvider) -> EpicNft<'_, MockProvider> {
        EpicNft::new(provider, Address::repeat_byte(0xda)).with_poll_interval(Duration::ZERO)
    }

    #[test]
    fn total_minted_decodes_uint256() {
        let provider = MockProvider::new().with_total_minted(12);

        let total = contract(&provider).total_minted().expect("total");
        assert_eq!(total, U256::from(12u64));

        let params = provider.params_of("eth_call");
        let expected = encode_hex(&IEpicNft::getTotalNFTsMintedSoFarCall::SELECTOR);
        assert_eq!(params[0][0]["data"], json!(expected));
    }

    #[test]
    fn short_return_data_is_an_abi_error() {
        let provider = MockProvider::new().with_response("eth_call", json!("0x01"));
        let err = contract(&provider).total_minted().expect_err("truncated");
        assert!(matches!(err, Error::Abi(_)));
    }

    #[test]
    fn mint_waits_through_pending_receipts() {
        let hash = B256::repeat_byte(0x42);
        let provider = MockProvider::new()
            .with_response("eth_sendTransaction", json!(hash))
            .with_response("eth_getTransactionReceipt", json!(null))
            .with_response("eth_getTransactionReceipt", json!(null))
            .with_response(
                "eth_getTransactionReceipt",
                json!({ "transactionHash": hash, "blockNumber": "0x2a", "status": "0x1" }),
            );

        let pending = contract(&provider)
            .mint(Address::with_last_byte(1))
            .expect("submitted");
        assert_eq!(pending.hash(), hash);

        let receipt = pending.wait().expect("mined");
        assert_eq!(receipt.block_number, Some(42));
        assert_eq!(provider.count("eth_getTransactionReceipt"), 3);

        let sent = provider.params_of("eth_sendTransaction");
        let expected = encode_hex(&IEpicNft::makeAnEpicNFTCall::SELECTOR);
        assert_eq!(sent[0][0]["data"], json!(expected));
    }

    #[test]
    fn reverted_mint_is_an_error() {
        let hash = B256::repeat_byte(0x43);
        let provider = MockProvider::new()
            .with_response("eth_sendTransaction", json!(hash))
            .with_response(
                "eth_getTransactionReceipt",
                json!({ "transactionHash": hash, "blockNumber": "0x2b", "status": "0x0" }),
            );

        let err = contract(&provider)
            .mint(Address::with_last_byte(1))
            .expect("submitted")
            .wait()
            .expect_err("reverted");

        assert!(matches!(err, Error::Reverted { hash: h } if h == hash));
    }

    #[test]
    fn minted_events_skip_foreign_logs() {
        let minted = MintedEvent {
            recipient: Address::with_last_byte(0xbe),
            token_id: U256::from(3u64),
        };
        let foreign = Log {
            topics: vec![B256::repeat_byte(0x01)],
            data: "0x".to_string(),
        };
        let provider = MockProvider::new()
            .with_response("eth_newFilter", json!("0x9"))
            .with_response("eth_getFilterChanges", json!([foreign, minted.to_log()]));

        let nft = contract(&provider);
        let subscription = nft.subscribe_minted().expect("filter");
        assert_eq!(subscription.filter_id(), "0x9");

        let events = nft.minted_events(&subscription).expect("events");
        assert_eq!(events, vec![minted]);
        assert_eq!(provider.params_of("eth_getFilterChanges")[0], json!(["0x9"]));
    }

    #[test]
    fn malformed_mint_log_does_not_drop_the_batch() {
        let minted = MintedEvent {
            recipient: Address::with_last_byte(0xbf),
            token_id: U256::from(5u64),
        };
        let truncated = Log {
            topics: vec![IEpicNft::NewEpicNFTMinted::SIGNATURE_HASH],
            data: "0x00".to_string(),
        };
        let provider = MockProvider::new()
            .with_response("eth_newFilter", json!("0x3"))
            .with_response("eth_getFilterChanges", json!([minted.to_log(), truncated]));

        let nft = contract(&provider);
        let subscription = nft.subscribe_minted().expect("filter");

        let events = nft.minted_events(&subscription).expect("events");
        assert_eq!(events, vec![minted]);
    }
}
