use multicompute_model::{Channel, Pins, ReleaseChannel, Vendor, VendorPins};
use multicompute_provider::{DataProvider, FileResolver};

use crate::output::{self, OutputFormat, PinRow, PinStatus};

/// Resolve `release`'s pins and compare them with the provider's channels.
pub async fn check(
    provider: &dyn DataProvider,
    resolver: &FileResolver,
    release: ReleaseChannel,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let pins = resolver.resolve(release)?;
    let channels = provider.get_channels().await?;
    output::print(&pin_rows(&pins, release, &channels), format)
}

/// One row per channel following `release`, in vendor order. A vendor with
/// no such channel still gets a row.
pub fn pin_rows(pins: &VendorPins, release: ReleaseChannel, channels: &[Channel]) -> Vec<PinRow> {
    let mut rows = Vec::new();
    for &vendor in Vendor::ALL {
        let vendor_pins = pins.get(vendor);
        let mut matched = channels
            .iter()
            .filter(|c| c.vendor == vendor && c.channel == release)
            .peekable();

        if matched.peek().is_none() {
            rows.push(PinRow {
                vendor,
                pins: vendor_pins.clone(),
                channel_id: None,
                observed_version: None,
                status: if vendor_pins.is_empty() {
                    PinStatus::Unpinned
                } else {
                    PinStatus::NoChannel
                },
            });
            continue;
        }

        for channel in matched {
            rows.push(PinRow {
                vendor,
                pins: vendor_pins.clone(),
                channel_id: Some(channel.id.clone()),
                observed_version: Some(channel.observed_version.clone()),
                status: status(vendor_pins, channel),
            });
        }
    }
    rows
}

fn status(pins: &Pins, channel: &Channel) -> PinStatus {
    if pins.is_empty() {
        PinStatus::Unpinned
    } else if pins.matches(&channel.observed_version) {
        PinStatus::InSync
    } else if !channel.phase.is_terminal() {
        PinStatus::RollingOut
    } else {
        PinStatus::Drifted
    }
}
