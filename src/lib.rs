//! # Oddsdesk - terminal dashboard for an odds backend
//!
//! A read-only terminal client for a sports-betting odds service: upcoming
//! matches, per-market bookmaker prices beside reference no-vig prices, and
//! the positive-EV and arbitrage feeds.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the main event loop
//! - **API**: Typed REST client behind the [`api::OddsApi`] trait
//! - **Market**: Pure aggregation of odds and fair feeds into tables
//! - **Loader**: Fetches the data behind a poll target
//! - **State**: Centralized store, navigation session, reducer
//! - **Events**: Key bindings, input handling, poll timer
//! - **UI**: Layout and rendering logic
//! - **Config**: Layered configuration

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod market;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use market::{MarketBoard, OutcomeOrder, aggregate};
