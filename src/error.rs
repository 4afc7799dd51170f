// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use alloy_primitives::B256;
use thiserror::Error;

/// EIP-1193 code for a request the user declined in their wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to a wallet or the contract.
#[derive(Debug, Error)]
pub enum Error {
    /// No wallet provider is available.
    #[error("no wallet provider available")]
    ProviderMissing,

    /// The provider answered with a JSON-RPC error object.
    #[error("provider error {code}: {message}")]
    Rpc {
        /// JSON-RPC or EIP-1193 error code.
        code: i64,
        /// Human readable message supplied by the provider.
        message: String,
    },

    /// The wallet returned an empty account list.
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// The provider answered, but not with what the method promises.
    #[error("invalid response to {method}: {reason}")]
    InvalidResponse {
        /// Method that produced the response.
        method: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The mint transaction was mined but reverted.
    #[error("transaction {hash} reverted")]
    Reverted {
        /// Hash of the reverted transaction.
        hash: B256,
    },

    /// HTTP transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] attohttpc::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed hex payload.
    #[error("hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// ABI encoding or decoding failure.
    #[error("ABI error: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

impl Error {
    /// Whether the user declined the request in their wallet.
    #[must_use]
    pub fn is_user_rejected(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }

    pub(crate) fn invalid(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rejection_is_detected_by_code() {
        let rejected = Error::Rpc {
            code: USER_REJECTED_CODE,
            message: "User rejected the request.".to_string(),
        };
        let other = Error::Rpc {
            code: -32603,
            message: "internal error".to_string(),
        };

        assert!(rejected.is_user_rejected());
        assert!(!other.is_user_rejected());
        assert!(!Error::NoAccounts.is_user_rejected());
    }
}
