//! Adapters: concrete implementations behind the ports.

pub mod ai;
pub mod http;
