// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use attohttpc::{header::CONTENT_TYPE, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::{
    error::{Error, Result},
    provider::Provider,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC 2.0 provider over HTTP.
///
/// Points at a wallet's local RPC endpoint (or any node exposing unlocked
/// accounts); every [`Provider::request`] becomes one POST.
#[derive(Debug)]
pub struct HttpProvider {
    url: String,
    timeout: Duration,
    next_id: AtomicU64,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl HttpProvider {
    /// Creates a provider for `url` with a 30 second request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            next_id: AtomicU64::new(1),
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn encode(&self, method: &str, params: Value) -> Result<Vec<u8>> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        Ok(serde_json::to_vec(&request)?)
    }
}

impl Provider for HttpProvider {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        let body = self.encode(method, params)?;
        trace!(url = %self.url, method, "sending JSON-RPC request");

        let response = attohttpc::post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .bytes(body)
            .send()?;

        let status = response.status();
        decode_reply(method, status, &response.bytes()?)
    }
}

/// Wallet proxies may send a JSON-RPC error object with a 4xx status; the
/// body wins whenever it decodes.
fn decode_reply(method: &str, status: StatusCode, bytes: &[u8]) -> Result<Value> {
    match decode_response(method, bytes) {
        Err(Error::InvalidResponse { .. }) if !status.is_success() => {
            Err(Error::invalid(method, format!("HTTP status {status}")))
        }
        outcome => outcome,
    }
}

fn decode_response(method: &str, bytes: &[u8]) -> Result<Value> {
    let response: RpcResponse = serde_json::from_slice(bytes)
        .map_err(|err| Error::invalid(method, format!("malformed JSON-RPC response: {err}")))?;
    match response.error {
        Some(RpcErrorObject { code, message }) => Err(Error::Rpc { code, message }),
        None => Ok(response.result),
    }
}
