//! Inbound adapters receiving traffic from the outside world.

pub mod http;
