// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) Epic Mint contributors. All rights reserved.

use std::fmt;

use crate::{config::MintConfig, controller::SessionState};

/// The single call-to-action of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No account yet: ask the wallet for one.
    Connect,
    /// Account connected: mint, unless a mint is already in flight.
    Mint {
        /// A mint transaction is awaiting confirmation.
        loading: bool,
    },
}

impl Action {
    /// Button caption.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connect => "Connect to Wallet",
            Self::Mint { loading: true } => "Loading..",
            Self::Mint { loading: false } => "Mint NFT",
        }
    }

    /// Whether the button ignores presses.
    #[must_use]
    pub fn disabled(self) -> bool {
        matches!(self, Self::Mint { loading: true })
    }
}

/// A captioned hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Visible text.
    pub text: String,
    /// Target.
    pub href: String,
}

/// Everything a front-end draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Collection title.
    pub title: String,
    /// Line under the title.
    pub tagline: String,
    /// Marketplace collection page.
    pub collection: Link,
    /// Live counter, `"{minted}/{total} NFTs minted so far"`.
    pub counter: String,
    /// Connect or mint button.
    pub action: Action,
    /// Attribution link.
    pub footer: Link,
}

/// Renders `state` with the static text from `config`.
#[must_use]
pub fn render(state: &SessionState, config: &MintConfig) -> View {
    let action = if state.current_account.is_none() {
        Action::Connect
    } else {
        Action::Mint {
            loading: state.loading,
        }
    };

    View {
        title: config.collection_name.clone(),
        tagline: config.tagline.clone(),
        collection: Link {
            text: "View Collection on OpenSea!".to_string(),
            href: config.collection_link.clone(),
        },
        counter: format!(
            "{}/{} NFTs minted so far",
            state.minted, config.total_mint_count
        ),
        action,
        footer: Link {
            text: format!("built by @{}", config.twitter_handle),
            href: config.twitter_link(),
        },
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.text, self.href)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.tagline)?;
        writeln!(f, "{}", self.collection)?;
        writeln!(f, "{}", self.counter)?;
        if self.action.disabled() {
            writeln!(f, "[ {} ] (disabled)", self.action.label())?;
        } else {
            writeln!(f, "[ {} ]", self.action.label())?;
        }
        write!(f, "{}", self.footer)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};

    use super::*;

    fn state(account: Option<Address>, minted: u64, loading: bool) -> SessionState {
        SessionState {
            current_account: account,
            minted: U256::from(minted),
            loading,
        }
    }

    #[test]
    fn disconnected_shows_connect() {
        let view = render(&state(None, 0, false), &MintConfig::default());
        assert_eq!(view.action, Action::Connect);
        assert_eq!(view.action.label(), "Connect to Wallet");
        assert!(!view.action.disabled());
    }

    #[test]
    fn connected_shows_mint_and_disables_while_loading() {
        let account = Some(Address::with_last_byte(9));

        let idle = render(&state(account, 3, false), &MintConfig::default());
        assert_eq!(idle.action.label(), "Mint NFT");
        assert!(!idle.action.disabled());

        let busy = render(&state(account, 3, true), &MintConfig::default());
        assert_eq!(busy.action.label(), "Loading..");
        assert!(busy.action.disabled());
    }

    #[test]
    fn static_text_is_always_present() {
        let view = render(&state(None, 7, false), &MintConfig::default());
        assert_eq!(view.counter, "7/50 NFTs minted so far");
        assert_eq!(view.footer.text, "built by @bruno_fialho");
        assert_eq!(view.footer.href, "https://twitter.com/bruno_fialho");

        let text = view.to_string();
        assert!(text.contains("My NFT Collection"));
        assert!(text.contains("https://testnets.opensea.io/collection/animalsnft-3"));
        assert!(text.contains("[ Connect to Wallet ]"));
    }
}
