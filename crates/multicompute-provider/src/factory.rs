//! Provider factory: the single point that picks mock or live.

use std::sync::Arc;

use tracing::info;

use crate::config::LiveConfig;
use crate::live::LiveProvider;
use crate::mock::MockProvider;
use crate::provider::DataProvider;

/// Build a data source. `live` is ignored when `use_mock` is set.
///
/// Stateless: every call constructs a new, independent source.
pub fn create_data_provider(use_mock: bool, live: LiveConfig) -> Arc<dyn DataProvider> {
    if use_mock {
        info!("using mock data provider");
        Arc::new(MockProvider::new())
    } else {
        info!(server = %live.server, base_path = %live.base_path, "using live data provider");
        Arc::new(LiveProvider::new(live))
    }
}
