//! Access-token lifecycle: grants, caching, scoping, persistence
//!
//! The [`AuthorizationBroker`] is the entry point; everything else in
//! this module serves it. See the crate docs for the flow overview.

pub mod broker;
pub mod consent;
pub mod grant;
pub mod scope;
pub mod store;
pub mod token;

pub use broker::AuthorizationBroker;
pub use consent::{CodeGrant, ConsentDriver, RedirectConsent};
pub use grant::{Grant, GrantExecutor};
pub use scope::ScopeSet;
pub use store::TokenStore;
pub use token::{TokenRecord, EXPIRY_SKEW_SECS};
