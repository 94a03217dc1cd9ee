//! Vane server
//!
//! Request validation and response shaping on top of `vane-persistence`,
//! plus configuration and logging for the `vane` command line.

pub mod model;
pub mod service;
pub mod startup;

pub use service::Server;
