//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod repository;

pub use repository::*;
