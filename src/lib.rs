// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

//! Wallet session and minting client for the Epic NFT collection.
//!
//! A [`MintController`] owns the session state (connected account, minted
//! count, loading flag), talks to a wallet through the [`Provider`] trait and
//! pushes a freshly rendered [`View`] to its [`Frontend`] after every state
//! change.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unused_must_use)]
#![deny(unused_extern_crates)]
#![deny(clippy::pedantic)]
#![warn(missing_debug_implementations, unreachable_pub)]

/// Minting configuration and its defaults.
pub mod config;
/// Typed handle on the Epic NFT contract.
pub mod contract;
/// Session controller.
pub mod controller;
/// Error types.
pub mod error;
/// JSON-RPC over HTTP provider.
pub mod http;
/// Scripted provider for tests and front-end development.
pub mod mock;
/// Wallet provider abstraction.
pub mod provider;
/// Pure view rendering.
pub mod view;

pub use config::MintConfig;
pub use contract::{EpicNft, MintSubscription, MintedEvent, PendingTransaction};
pub use controller::{Frontend, MintController, SessionState};
pub use error::{Error, Result};
pub use http::HttpProvider;
pub use mock::{MockProvider, RecordingFrontend};
pub use provider::{Log, Provider, ProviderExt, TransactionReceipt};
pub use view::{Action, Link, View};

pub use alloy_primitives::{Address, B256, U256};
