//! multicompute-provider — data sources for the MultiCompute dashboard.
//!
//! Every consumer talks to a [`DataProvider`]: eight async operations over
//! channels, clusters, bundle deployments, drift events, and policy
//! violations. Two implementations exist:
//!
//! ```text
//! create_data_provider(use_mock, live)
//!   ├── MockProvider  → MockStore (seeded in-memory collections)
//!   └── LiveProvider  → HttpTransport → REST backend under base_path
//! ```
//!
//! Both resolve through the same async contract, so callers never know
//! which backend answered. Neither retries, times out, or caches.

pub mod config;
pub mod error;
pub mod factory;
pub mod live;
pub mod mock;
pub mod pins;
pub mod provider;
pub mod seed;
pub mod store;
pub mod transport;

pub use config::{LiveConfig, ProviderConfig};
pub use error::{ProviderError, ProviderResult};
pub use factory::create_data_provider;
pub use live::LiveProvider;
pub use mock::MockProvider;
pub use pins::FileResolver;
pub use provider::DataProvider;
pub use store::MockStore;
pub use transport::{HttpTransport, HyperTransport};
