//! HSS test core: S6a Update-Location
//!
//! Turns an Update-Location-Request received from an MME into an
//! Update-Location-Answer:
//! - [`ulr`]: mandatory AVP validation
//! - [`profile`]: subscription profile resolution with default fallback
//! - [`subscription`]: Subscription-Data AVP tree
//! - [`s6a_path`]: the request handler tying them together

pub mod answer;
pub mod config;
pub mod error;
pub mod profile;
pub mod s6a_path;
pub mod store;
pub mod subscription;
pub mod ulr;


pub use config::{ConfigError, HssConfig, ServerIdentity, SubscriptionProfile};
pub use error::{FailureCode, UlaError};
pub use profile::resolve_profile;
pub use s6a_path::{HomeSubscriberServer, UlaRejection};
pub use store::{MemorySubscriberStore, StoreError, SubscriberData, SubscriberStore};
pub use ulr::{validate_ulr, UlrField};
