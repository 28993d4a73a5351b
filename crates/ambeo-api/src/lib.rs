// ambeo-api: Async Rust client for the AMBEO soundbar control API
//
// The soundbar exposes three GET endpoints (`getData`, `getRows`,
// `setData`) that address settings by opaque path strings. This crate
// owns URL construction, host resolution and envelope parsing; it knows
// nothing about dialects, catalogs or the host-facing controls.

pub mod client;
pub mod error;
pub mod models;
pub mod paths;
pub mod transport;

pub use client::{Endpoint, Role, SoundbarClient};
pub use error::Error;
pub use models::{DataValue, Row, TypedValue};
pub use transport::TransportConfig;
