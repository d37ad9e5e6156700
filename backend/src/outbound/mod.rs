//! Outbound adapters towards external systems.

pub mod persistence;
