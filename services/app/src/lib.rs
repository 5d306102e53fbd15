//! services/app/src/lib.rs
//!
//! The application shell for the daykeep client: configuration, the HTTP
//! adapters behind the core's ports, the entity stores, and the composition
//! root that wires them together.

pub mod adapters;
pub mod config;
pub mod error;
pub mod state;
pub mod stores;
