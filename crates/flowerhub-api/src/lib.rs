// flowerhub-api: Async Rust client for the Flowerhub home battery portal

//! Typed async client for the Flowerhub portal API.
//!
//! [`FlowerhubClient`] logs in with a username and password, discovers the
//! owner and asset identifiers, fetches asset status and account data, and
//! can poll the status in the background. Session tokens live in the
//! client's cookie jar; an expired session is refreshed once and the
//! request retried transparently.
//!
//! ```no_run
//! use flowerhub_api::{ClientConfig, Credentials, FlowerhubClient};
//!
//! # async fn run() -> Result<(), flowerhub_api::Error> {
//! let client = FlowerhubClient::new(&ClientConfig::default())?;
//! client.login(&Credentials::new("me@example.se", "secret")).await?;
//! let readout = client.readout_sequence(None).await?;
//! println!("asset {:?}: {:?}", readout.asset_id, client.last_status());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod transport;

mod assets;
mod owner;
mod session;
mod system;

pub use assets::ReadoutResult;
pub use auth::{Credentials, LoginResult};
pub use client::{AuthFailedHook, FlowerhubClient, RawResponse};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_ORIGIN};
pub use error::Error;
pub use models::FetchResult;
pub use poller::{MIN_POLL_INTERVAL, PollConfig, StatusCallback};
pub use session::StatusSnapshot;
pub use system::DEFAULT_NOTIFICATION_SLUG;
pub use transport::{TlsMode, TransportConfig};

// Re-exported so callers can build requests without a direct dependency.
pub use reqwest::{Method, header};
