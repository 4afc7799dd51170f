// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, Result};

/// A wallet that brokers access to accounts and signing.
///
/// Mirrors the EIP-1193 `request({ method, params })` surface: one call per
/// JSON-RPC method, parameters and result as raw JSON.
pub trait Provider {
    /// Issues a single request and returns its `result` member.
    ///
    /// # Errors
    /// Returns the provider's error object as [`Error::Rpc`], or a
    /// transport or decoding failure.
    fn request(&self, method: &str, params: Value) -> Result<Value>;
}

impl<P: Provider + ?Sized> Provider for &P {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        (**self).request(method, params)
    }
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Transaction hash.
    pub transaction_hash: B256,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// `true` unless the transaction reverted.
    pub success: bool,
}

/// Raw log entry as returned by a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Indexed topics; the first is the event signature hash.
    pub topics: Vec<B256>,
    /// ABI-encoded non-indexed fields, `0x`-prefixed hex.
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: B256,
    block_number: Option<String>,
    status: Option<String>,
}

/// Typed wrappers over the JSON-RPC methods the controller needs.
///
/// Every method fails like [`Provider::request`], or with
/// [`Error::InvalidResponse`] when the result has the wrong shape.
#[allow(clippy::missing_errors_doc)]
pub trait ProviderExt: Provider {
    /// `eth_chainId`.
    fn chain_id(&self) -> Result<u64> {
        let value = self.request("eth_chainId", json!([]))?;
        let raw = as_str("eth_chainId", &value)?;
        parse_quantity(raw).ok_or_else(|| Error::invalid("eth_chainId", raw))
    }

    /// `eth_accounts`: accounts this site is already authorized for.
    fn accounts(&self) -> Result<Vec<Address>> {
        let value = self.request("eth_accounts", json!([]))?;
        Ok(serde_json::from_value(value)?)
    }

    /// `eth_requestAccounts`: asks the user to authorize an account.
    fn request_accounts(&self) -> Result<Vec<Address>> {
        let value = self.request("eth_requestAccounts", json!([]))?;
        Ok(serde_json::from_value(value)?)
    }

    /// `eth_call` against the latest block.
    fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let value = self.request(
            "eth_call",
            json!([{ "to": to, "data": encode_hex(data) }, "latest"]),
        )?;
        decode_hex(as_str("eth_call", &value)?)
    }

    /// `eth_sendTransaction`, signed by the wallet.
    fn send_transaction(&self, from: Address, to: Address, data: &[u8]) -> Result<B256> {
        let value = self.request(
            "eth_sendTransaction",
            json!([{ "from": from, "to": to, "data": encode_hex(data) }]),
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// `eth_getTransactionReceipt`; `None` while still pending.
    fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        let value = self.request("eth_getTransactionReceipt", json!([hash]))?;
        if value.is_null() {
            return Ok(None);
        }

        let raw: RawReceipt = serde_json::from_value(value)?;
        let block_number = match raw.block_number.as_deref() {
            Some(number) => Some(
                parse_quantity(number)
                    .ok_or_else(|| Error::invalid("eth_getTransactionReceipt", number))?,
            ),
            None => None,
        };

        Ok(Some(TransactionReceipt {
            transaction_hash: raw.transaction_hash,
            block_number,
            // Pre-Byzantium receipts carry no status.
            success: raw.status.as_deref().and_then(parse_quantity) != Some(0),
        }))
    }

    /// `eth_newFilter` on one contract and one event signature.
    fn new_filter(&self, address: Address, topic: B256) -> Result<String> {
        let value = self.request(
            "eth_newFilter",
            json!([{ "address": address, "topics": [topic] }]),
        )?;
        Ok(as_str("eth_newFilter", &value)?.to_string())
    }

    /// `eth_getFilterChanges`: logs seen since the previous poll.
    fn filter_changes(&self, filter_id: &str) -> Result<Vec<Log>> {
        let value = self.request("eth_getFilterChanges", json!([filter_id]))?;
        Ok(serde_json::from_value(value)?)
    }
}

impl<P: Provider + ?Sized> ProviderExt for P {}

/// Parses a `0x`-prefixed hex quantity.
pub fn parse_quantity(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x")?;
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Encodes bytes as `0x`-prefixed hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes `0x`-prefixed (or bare) hex.
///
/// # Errors
/// Returns [`Error::Hex`] on odd length or non-hex digits.
pub fn decode_hex(raw: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(raw.strip_prefix("0x").unwrap_or(raw))?)
}

fn as_str<'a>(method: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid(method, format!("expected a string, got {value}")))
}
