// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

//! The session controller.
//!
//! [`MintController`] is the only owner of [`SessionState`]. Every operation
//! is a short sequence of provider round-trips; failures are logged (or, for
//! a missing wallet and a wrong network, shown as alerts) and never leave the
//! controller unusable.

use alloy_primitives::{Address, U256};
use tracing::{debug, error, info, warn};

use crate::{
    config::MintConfig,
    contract::{EpicNft, MintSubscription, MintedEvent},
    error::{Error, Result},
    provider::{Provider, ProviderExt, TransactionReceipt},
    view::{self, View},
};

/// Transient per-session state. Reset whenever a controller is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Connected account; `None` means disconnected.
    pub current_account: Option<Address>,
    /// Last strictly positive minted total reported by the contract.
    pub minted: U256,
    /// A mint transaction is awaiting confirmation.
    pub loading: bool,
}

/// Where the controller sends user-visible output.
pub trait Frontend {
    /// Shows a message the user has to acknowledge.
    fn alert(&mut self, message: &str);

    /// Redraws the page; called after every state change.
    fn render(&mut self, view: &View);
}

/// Owns the session state and drives the wallet and the contract.
#[derive(Debug)]
pub struct MintController<P, F> {
    provider: Option<P>,
    frontend: F,
    config: MintConfig,
    state: SessionState,
    subscriptions: Vec<MintSubscription>,
}

impl<P: Provider, F: Frontend> MintController<P, F> {
    /// Creates a controller and renders the initial, disconnected view.
    ///
    /// `provider` is `None` when no wallet is available.
    pub fn new(provider: Option<P>, frontend: F, config: MintConfig) -> Self {
        let mut controller = Self {
            provider,
            frontend,
            config,
            state: SessionState::default(),
            subscriptions: Vec::new(),
        };
        controller.redraw();
        controller
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Collection configuration.
    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    /// The front-end receiving alerts and views.
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// The wallet provider, if one is available.
    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Number of armed mint subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Renders the current state.
    pub fn view(&self) -> View {
        view::render(&self.state, &self.config)
    }

    /// Page-load work: look for an authorized wallet, then read the counter.
    pub fn init(&mut self) {
        self.check_wallet();
        self.refresh_minted_count();
    }

    /// Queries the wallet, warns about a wrong network and adopts an account
    /// the user has already authorized.
    pub fn check_wallet(&mut self) {
        let Some(provider) = &self.provider else {
            info!("no wallet provider found, make sure a wallet is installed");
            return;
        };
        info!("wallet provider found");

        let chain_id = match provider.chain_id() {
            Ok(chain_id) => chain_id,
            Err(err) => {
                error!(%err, "failed to query chain id");
                return;
            }
        };
        info!(chain_id, "connected to chain");

        if chain_id != self.config.expected_chain_id {
            warn!(
                chain_id,
                expected = self.config.expected_chain_id,
                "wallet is on the wrong network"
            );
            self.frontend.alert(&format!(
                "You are not connected to the {}!",
                self.config.network_name
            ));
        }

        let accounts = match provider.accounts() {
            Ok(accounts) => accounts,
            Err(err) => {
                error!(%err, "failed to query authorized accounts");
                return;
            }
        };

        match accounts.first() {
            Some(&account) => {
                info!(%account, "found an authorized account");
                self.adopt_account(account);
            }
            None => info!("no authorized account found"),
        }
    }

    /// Asks the wallet for an account and adopts the first one returned.
    ///
    /// Without a wallet the user is alerted and the state is left alone.
    ///
    /// # Errors
    /// Returns [`Error::ProviderMissing`] without a wallet,
    /// [`Error::NoAccounts`] for an empty list, or the wallet's own error.
    pub fn connect(&mut self) -> Result<Address> {
        let Some(provider) = &self.provider else {
            self.frontend
                .alert("No wallet provider found. Install a wallet and try again.");
            return Err(Error::ProviderMissing);
        };

        let account = provider
            .request_accounts()
            .and_then(|accounts| accounts.first().copied().ok_or(Error::NoAccounts));

        match account {
            Ok(account) => {
                info!(%account, "connected");
                self.adopt_account(account);
                Ok(account)
            }
            Err(err) => {
                if err.is_user_rejected() {
                    warn!(%err, "wallet connection rejected by the user");
                } else {
                    error!(%err, "failed to connect wallet");
                }
                Err(err)
            }
        }
    }

    /// Subscribes to mint notifications of the contract.
    ///
    /// Every call arms one more subscription; none is ever removed.
    pub fn setup_event_listener(&mut self) {
        let Some(provider) = &self.provider else {
            warn!("wallet provider missing, event listener not set up");
            return;
        };

        match contract(provider, &self.config).subscribe_minted() {
            Ok(subscription) => {
                info!(filter = subscription.filter_id(), "set up event listener");
                self.subscriptions.push(subscription);
            }
            Err(err) => error!(%err, "failed to set up event listener"),
        }
    }

    /// Delivers pending mint notifications as alerts and returns them.
    pub fn poll_events(&mut self) -> Vec<MintedEvent> {
        let Some(provider) = &self.provider else {
            return Vec::new();
        };
        let nft = contract(provider, &self.config);

        let mut delivered = Vec::new();
        for subscription in &self.subscriptions {
            match nft.minted_events(subscription) {
                Ok(events) => delivered.extend(events),
                Err(err) => error!(%err, filter = subscription.filter_id(), "event poll failed"),
            }
        }

        for event in &delivered {
            info!(recipient = %event.recipient, token_id = %event.token_id, "NFT minted");
            self.frontend.alert(&format!(
                "Hey there! We've minted your NFT and sent it to {}. It may be blank \
                 right now. It can take a max of 10 min to show up on OpenSea. \
                 Here's the link: {}",
                event.recipient,
                self.config.asset_link(event.token_id)
            ));
        }

        delivered
    }

    /// Reads the minted total; only a strictly positive value is adopted.
    pub fn refresh_minted_count(&mut self) {
        let Some(provider) = &self.provider else {
            return;
        };

        let total = contract(provider, &self.config).total_minted();
        match total {
            Ok(total) if total.is_zero() => debug!("contract reports no mints yet"),
            Ok(total) => {
                debug!(%total, "minted count refreshed");
                self.update(|state| state.minted = total);
            }
            Err(err) => error!(%err, "failed to read minted count"),
        }
    }

    /// Mints one token for the connected account and waits for it.
    ///
    /// Whatever happens, the counter is re-read once and the loading flag
    /// is cleared before this returns.
    ///
    /// # Errors
    /// Any failure to submit or confirm the mint; it is logged as well.
    pub fn mint(&mut self) -> Result<TransactionReceipt> {
        self.update(|state| state.loading = true);

        let outcome = self.submit_mint();
        if let Err(err) = &outcome {
            error!(%err, "mint failed");
        }

        self.refresh_minted_count();
        self.update(|state| state.loading = false);
        outcome
    }

    fn submit_mint(&self) -> Result<TransactionReceipt> {
        let provider = self.provider.as_ref().ok_or(Error::ProviderMissing)?;
        let account = self.state.current_account.ok_or(Error::NoAccounts)?;

        info!("going to pop wallet now to pay gas");
        let pending = contract(provider, &self.config).mint(account)?;

        info!(hash = %pending.hash(), "mining, please wait");
        let receipt = pending.wait()?;

        info!(
            block = ?receipt.block_number,
            "mined, see transaction: {}",
            self.config.transaction_link(receipt.transaction_hash)
        );
        Ok(receipt)
    }

    fn adopt_account(&mut self, account: Address) {
        self.update(|state| state.current_account = Some(account));
        self.setup_event_listener();
    }

    fn update(&mut self, change: impl FnOnce(&mut SessionState)) {
        change(&mut self.state);
        self.redraw();
    }

    fn redraw(&mut self) {
        let view = view::render(&self.state, &self.config);
        self.frontend.render(&view);
    }
}

fn contract<'p, P: Provider>(provider: &'p P, config: &MintConfig) -> EpicNft<'p, P> {
    EpicNft::new(provider, config.contract_address).with_poll_interval(config.poll_interval())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;
    use serde_json::json;

    use super::*;
    use crate::{
        mock::{MockProvider, RecordingFrontend},
        view::Action,
    };

    fn config() -> MintConfig {
        MintConfig {
            poll_interval_ms: 0,
            ..MintConfig::default()
        }
    }

    fn controller(provider: MockProvider) -> MintController<MockProvider, RecordingFrontend> {
        MintController::new(Some(provider), RecordingFrontend::default(), config())
    }

    #[test]
    fn new_renders_disconnected_view() {
        let controller: MintController<MockProvider, _> =
            MintController::new(None, RecordingFrontend::default(), config());

        assert_eq!(controller.frontend().views.len(), 1);
        assert_eq!(controller.view().action, Action::Connect);
        assert_eq!(controller.state(), &SessionState::default());
    }

    #[test]
    fn wrong_network_alerts_but_continues() {
        let account = Address::with_last_byte(0x21);
        let provider = MockProvider::new()
            .with_response("eth_chainId", json!("0x1"))
            .with_response("eth_accounts", json!([account]))
            .with_response("eth_newFilter", json!("0x1"));
        let mut controller = controller(provider);

        controller.check_wallet();

        assert_eq!(
            controller.frontend().alerts,
            vec!["You are not connected to the Goerli Test Network!".to_string()]
        );
        assert_eq!(controller.state().current_account, Some(account));
        assert_eq!(controller.subscription_count(), 1);
    }

    #[test]
    fn no_authorized_account_stays_disconnected() {
        let provider = MockProvider::new()
            .with_response("eth_chainId", json!("0x5"))
            .with_response("eth_accounts", json!([]));
        let mut controller = controller(provider);

        controller.check_wallet();

        assert!(controller.frontend().alerts.is_empty());
        assert_eq!(controller.state().current_account, None);
        assert_eq!(controller.subscription_count(), 0);
    }

    #[test]
    fn chain_id_failure_is_logged_only() {
        let provider = MockProvider::new().with_error("eth_chainId", -32603, "boom");
        let mut controller = controller(provider);

        controller.check_wallet();

        assert!(controller.frontend().alerts.is_empty());
        assert_eq!(controller.provider().map(|p| p.count("eth_accounts")), Some(0));
    }

    #[test]
    fn rejected_connect_keeps_state() {
        let provider = MockProvider::new().with_error("eth_requestAccounts", 4001, "rejected");
        let mut controller = controller(provider);

        let err = controller.connect().expect_err("rejected");

        assert!(err.is_user_rejected());
        assert_eq!(controller.state().current_account, None);
        assert_eq!(controller.subscription_count(), 0);
    }

    #[test]
    fn empty_account_list_is_no_accounts() {
        let provider = MockProvider::new().with_response("eth_requestAccounts", json!([]));
        let mut controller = controller(provider);

        let err = controller.connect().expect_err("no accounts");
        assert!(matches!(err, Error::NoAccounts));
    }

    #[test]
    fn connecting_twice_arms_two_subscriptions() {
        let account = Address::with_last_byte(0x22);
        let provider = MockProvider::new()
            .with_response("eth_requestAccounts", json!([account]))
            .with_response("eth_newFilter", json!("0x1"));
        let mut controller = controller(provider);

        controller.connect().expect("first");
        controller.connect().expect("second");

        assert_eq!(controller.subscription_count(), 2);
    }

    #[test]
    fn zero_count_does_not_reset_display() {
        let provider = MockProvider::new()
            .with_total_minted(4)
            .with_total_minted(0);
        let mut controller = controller(provider);

        controller.refresh_minted_count();
        assert_eq!(controller.state().minted, U256::from(4u64));

        controller.refresh_minted_count();
        assert_eq!(controller.state().minted, U256::from(4u64));
    }

    #[test]
    fn count_failure_keeps_previous_value() {
        let provider = MockProvider::new()
            .with_total_minted(2)
            .with_error("eth_call", -32000, "execution reverted");
        let mut controller = controller(provider);

        controller.refresh_minted_count();
        controller.refresh_minted_count();

        assert_eq!(controller.state().minted, U256::from(2u64));
    }

    #[test]
    fn mint_without_account_still_clears_loading() {
        let provider = MockProvider::new().with_total_minted(1);
        let mut controller = controller(provider);

        let err = controller.mint().expect_err("no account");

        assert!(matches!(err, Error::NoAccounts));
        assert!(!controller.state().loading);
        assert_eq!(controller.provider().map(|p| p.count("eth_call")), Some(1));
    }

    #[test]
    fn events_become_alerts_with_asset_link() {
        let account = Address::with_last_byte(0x23);
        let event = MintedEvent {
            recipient: account,
            token_id: U256::from(17u64),
        };
        let provider = MockProvider::new()
            .with_response("eth_requestAccounts", json!([account]))
            .with_response("eth_newFilter", json!("0xa"))
            .with_minted_events(&[event])
            .with_response("eth_getFilterChanges", json!([]));
        let mut controller = controller(provider);
        controller.connect().expect("connected");

        assert_eq!(controller.poll_events(), vec![event]);
        assert!(controller.poll_events().is_empty());

        let alerts = &controller.frontend().alerts;
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains(&account.to_string()));
        assert!(alerts[0].ends_with(&controller.config().asset_link(U256::from(17u64))));
    }

    #[test]
    fn mint_receipt_is_returned() {
        let account = Address::with_last_byte(0x24);
        let hash = B256::repeat_byte(0x77);
        let provider = MockProvider::new()
            .with_response("eth_requestAccounts", json!([account]))
            .with_response("eth_newFilter", json!("0x1"))
            .with_response("eth_sendTransaction", json!(hash))
            .with_response(
                "eth_getTransactionReceipt",
                json!({ "transactionHash": hash, "blockNumber": "0x1", "status": "0x1" }),
            )
            .with_total_minted(5);
        let mut controller = controller(provider);
        controller.connect().expect("connected");

        let receipt = controller.mint().expect("minted");

        assert_eq!(receipt.transaction_hash, hash);
        assert_eq!(controller.state().minted, U256::from(5u64));
        let sent = controller
            .provider()
            .map(|p| p.params_of("eth_sendTransaction"))
            .unwrap_or_default();
        assert_eq!(sent[0][0]["from"], json!(account));
    }
}
