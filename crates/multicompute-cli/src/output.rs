//! Human-readable and JSON rendering of provider results.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use multicompute_model::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print `items` as pretty JSON or as a text table.
pub fn print<T: Serialize + Tabular>(items: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Text => print!("{}", render_table(items)),
    }
    Ok(())
}

/// Print a single record as pretty JSON.
pub fn print_one<T: Serialize>(item: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

/// A record that renders as one table row.
pub trait Tabular {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

/// Left-aligned columns, two spaces apart, header first.
pub fn render_table<T: Tabular>(items: &[T]) -> String {
    if items.is_empty() {
        return "No records.\n".to_string();
    }

    let rows: Vec<Vec<String>> = items.iter().map(Tabular::row).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = T::HEADERS.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&headers).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn short_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

impl Tabular for Channel {
    const HEADERS: &'static [&'static str] = &[
        "ID", "NAME", "VENDOR", "CHANNEL", "PHASE", "OPERATOR", "RUNTIME", "CLUSTERS", "UPDATED",
    ];

    fn row(&self) -> Vec<String> {
        let (operator, runtime) = match ObservedVersion::parse(&self.observed_version) {
            Ok(v) => (v.operator.to_string(), v.runtime.to_string()),
            Err(_) => (self.observed_version.clone(), "-".to_string()),
        };
        vec![
            self.id.clone(),
            self.name.clone(),
            self.vendor.to_string(),
            self.channel.to_string(),
            self.phase.to_string(),
            operator,
            runtime,
            self.cluster_count.to_string(),
            short_time(&self.last_updated),
        ]
    }
}

impl Tabular for Cluster {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "VENDOR", "GPUS", "GPU TYPE", "MIG", "STATUS"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.vendor.to_string(),
            self.gpu_count.to_string(),
            self.gpu_type.clone(),
            if self.mig_enabled { "yes" } else { "no" }.to_string(),
            self.status.to_string(),
        ]
    }
}

impl Tabular for BundleDeployment {
    const HEADERS: &'static [&'static str] =
        &["ID", "CHANNEL", "CLUSTER", "STATUS", "TRANSITIONED", "MESSAGE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.channel_id.clone(),
            self.cluster_id.clone(),
            self.status.to_string(),
            short_time(&self.last_transition_time),
            self.message.clone(),
        ]
    }
}

impl Tabular for DriftEvent {
    const HEADERS: &'static [&'static str] =
        &["ID", "CHANNEL", "CLUSTER", "TYPE", "SEVERITY", "AT", "MESSAGE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.channel_id.clone(),
            self.cluster_id.clone(),
            self.kind.to_string(),
            self.severity.to_string(),
            short_time(&self.timestamp),
            self.message.clone(),
        ]
    }
}

impl Tabular for PolicyViolation {
    const HEADERS: &'static [&'static str] =
        &["ID", "CLUSTER", "POLICY", "RESOURCE", "AT", "MESSAGE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.cluster_id.clone(),
            self.policy.clone(),
            self.resource.clone(),
            short_time(&self.timestamp),
            self.message.clone(),
        ]
    }
}

/// Vendor with its default chart source, for `mcctl vendors`.
#[derive(Debug, Serialize)]
pub struct VendorRow {
    pub vendor: Vendor,
    #[serde(flatten)]
    pub source: VendorSource,
}

impl Tabular for VendorRow {
    const HEADERS: &'static [&'static str] = &["VENDOR", "CHART", "NAMESPACE", "REPO"];

    fn row(&self) -> Vec<String> {
        vec![
            self.vendor.to_string(),
            self.source.chart.clone(),
            self.source.namespace.clone(),
            self.source.repo.clone(),
        ]
    }
}

/// How a channel's observed version relates to its release pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinStatus {
    InSync,
    /// Off its pins while the rollout is still pending or progressing.
    RollingOut,
    Drifted,
    NoChannel,
    Unpinned,
}

impl PinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinStatus::InSync => "in-sync",
            PinStatus::RollingOut => "rolling-out",
            PinStatus::Drifted => "drifted",
            PinStatus::NoChannel => "no-channel",
            PinStatus::Unpinned => "unpinned",
        }
    }
}

/// A vendor's pins next to one channel's observed version, for `mcctl pins`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRow {
    pub vendor: Vendor,
    #[serde(flatten)]
    pub pins: Pins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_version: Option<String>,
    pub status: PinStatus,
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

impl Tabular for PinRow {
    const HEADERS: &'static [&'static str] =
        &["VENDOR", "OPERATOR TAG", "RUNTIME TAG", "CHANNEL", "OBSERVED", "STATUS"];

    fn row(&self) -> Vec<String> {
        vec![
            self.vendor.to_string(),
            or_dash(Some(self.pins.operator_tag.as_str())),
            or_dash(Some(self.pins.runtime_tag.as_str())),
            or_dash(self.channel_id.as_deref()),
            or_dash(self.observed_version.as_deref()),
            self.status.as_str().to_string(),
        ]
    }
}
