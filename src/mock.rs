// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

use alloy_primitives::U256;
use serde_json::{json, Value};

use crate::{
    contract::{encode_total_minted, MintedEvent},
    controller::Frontend,
    error::{Error, Result},
    provider::{encode_hex, Provider},
    view::View,
};

const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Clone)]
enum Reply {
    Ok(Value),
    Err { code: i64, message: String },
}

/// Provider answering from a per-method script and recording every request.
///
/// Replies queued for a method are consumed in order; the last one keeps
/// answering once the queue is down to it. Methods without a script fail
/// with JSON-RPC "method not found".
#[derive(Debug, Default)]
pub struct MockProvider {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    log: RefCell<Vec<(String, Value)>>,
}

impl MockProvider {
    /// Creates a provider with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply for `method`.
    #[must_use]
    pub fn with_response(self, method: &str, result: Value) -> Self {
        self.push(method, Reply::Ok(result));
        self
    }

    /// Queues an error reply for `method`.
    #[must_use]
    pub fn with_error(self, method: &str, code: i64, message: &str) -> Self {
        self.push(
            method,
            Reply::Err {
                code,
                message: message.to_string(),
            },
        );
        self
    }

    /// Queues an `eth_call` reply carrying the contract's minted total.
    #[must_use]
    pub fn with_total_minted(self, total: u64) -> Self {
        let encoded = encode_hex(&encode_total_minted(U256::from(total)));
        self.with_response("eth_call", json!(encoded))
    }

    /// Queues one `eth_getFilterChanges` batch of mint notifications.
    #[must_use]
    pub fn with_minted_events(self, events: &[MintedEvent]) -> Self {
        let logs: Vec<_> = events.iter().map(MintedEvent::to_log).collect();
        self.with_response("eth_getFilterChanges", json!(logs))
    }

    /// Every method requested so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    /// Parameters of every request made to `method`, in order.
    #[must_use]
    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.log
            .borrow()
            .iter()
            .filter(|(name, _)| name == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// How many times `method` was requested.
    #[must_use]
    pub fn count(&self, method: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|(name, _)| name == method)
            .count()
    }

    fn push(&self, method: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    fn next_reply(&self, method: &str) -> Option<Reply> {
        let mut replies = self.replies.borrow_mut();
        let queue = replies.get_mut(method)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Provider for MockProvider {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        self.log.borrow_mut().push((method.to_string(), params));

        match self.next_reply(method) {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Err { code, message }) => Err(Error::Rpc { code, message }),
            None => Err(Error::Rpc {
                code: METHOD_NOT_FOUND,
                message: format!("the method {method} does not exist"),
            }),
        }
    }
}

/// Front-end that keeps every alert and view it receives.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    /// Alerts, oldest first.
    pub alerts: Vec<String>,
    /// Rendered views, oldest first.
    pub views: Vec<View>,
}

impl Frontend for RecordingFrontend {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn render(&mut self, view: &View) {
        self.views.push(view.clone());
    }
}
