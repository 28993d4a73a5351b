//! State synchronization and control mapping for AMBEO soundbars.
//!
//! Sits between `ambeo-api` (raw device calls) and a host that renders
//! controls and schedules work:
//!
//! - **[`Adapter`]**: one per soundbar. Owns the connection state machine
//!   (`Unconfigured → Connecting → Active | ConnectionFailed`), the periodic
//!   poll task, and the single lock that serializes device traffic.
//!   Host entry points: [`reconfigure()`](Adapter::reconfigure),
//!   [`poll_now()`](Adapter::poll_now), [`apply()`](Adapter::apply).
//!
//! - **Dialects** ([`dialect`]): the two incompatible control APIs,
//!   selected once per connection from the product name. Popcorn models
//!   (Plus, Mini) publish their input/preset lists; Espresso models get a
//!   fixed catalog.
//!
//! - **[`Catalog`]**: the ordered, filtered input and preset lists that
//!   give meaning to the small integer indices the host sees. Rebuilt
//!   wholesale on every connect and swapped atomically.
//!
//! - **[`ControlStore`]**: the host-visible control values, published
//!   through a `watch` channel.

pub mod adapter;
pub mod catalog;
pub mod command;
pub mod config;
pub mod control;
pub mod dialect;
pub mod error;
mod mapper;
pub mod store;
mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::{Adapter, AdapterState};
pub use catalog::{Catalog, CatalogList, CatalogOption, InputEntry, PresetEntry};
pub use command::{Command, CommandOutcome};
pub use config::AdapterConfig;
pub use control::{Control, ControlValue, ValueKind};
pub use dialect::{DeviceIdentity, Dialect};
pub use error::{CoreError, SkipReason};
pub use store::{ControlState, ControlStore};
pub use sync::PollReport;
