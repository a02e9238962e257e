use multicompute_model::Vendor;
use multicompute_provider::DataProvider;

use crate::output::{self, OutputFormat, VendorRow};

pub async fn clusters(provider: &dyn DataProvider, format: OutputFormat) -> anyhow::Result<()> {
    output::print(&provider.get_clusters().await?, format)
}

pub async fn bundles(
    provider: &dyn DataProvider,
    channel: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    output::print(&provider.get_bundle_deployments(channel).await?, format)
}

pub async fn drift(
    provider: &dyn DataProvider,
    channel: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    output::print(&provider.get_drift_events(channel).await?, format)
}

pub async fn violations(
    provider: &dyn DataProvider,
    cluster: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    output::print(&provider.get_policy_violations(cluster).await?, format)
}

pub fn vendors(format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<VendorRow> = Vendor::ALL
        .iter()
        .map(|vendor| VendorRow {
            vendor: *vendor,
            source: vendor.default_source(),
        })
        .collect();
    output::print(&rows, format)
}
