//! Client-side authentication helper for redirect-based login flows.
//!
//! Tracks a browser session's access token in memory, minting it via a
//! silent HTTP refresh against the auth service and reacquiring it on each
//! page load, while interactive login/logout happen through full-page
//! redirects. The HTTP transport, navigation, and the persisted "seen
//! before" hint are injected collaborators, so the state machine is fully
//! testable without a browser.

mod browser;
mod client;
mod error;
mod transport;
mod types;

pub use browser::{FileFlagStore, FlagStore, MemoryFlagStore, Navigate, SystemNavigator};
pub use client::{AuthClient, AuthConfig};
pub use error::AuthError;
pub use transport::{HttpTransport, Transport};
pub use types::{TokenPayload, TransportResponse};
