//! multicompute-model — record model for the MultiCompute GPU dashboard.
//!
//! Pure data shapes shared by every data source: GPU-operator channels,
//! clusters, bundle deployments, drift events, and policy violations.
//! Records reference each other only by string id; nothing here enforces
//! referential integrity.
//!
//! # Wire format
//!
//! All records serialize to JSON with camelCase field names and the exact
//! enum spellings the dashboard backend uses (`nvidia`, `stable`,
//! `Pending`, `NotReady`, ...). Timestamps are RFC 3339 in UTC.

pub mod error;
pub mod pins;
pub mod types;
pub mod vendor;

pub use error::{ModelError, ModelResult};
pub use pins::{Pins, VendorPins};
pub use types::*;
pub use vendor::{ObservedVersion, VendorSource};
