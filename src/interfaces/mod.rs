//! Adapters that drive the application from the outside world.

pub mod csv;
pub mod http;
