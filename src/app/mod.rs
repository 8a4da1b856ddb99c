//! Application layer — hexagonal core and its boundary.
//!
//! The domain logic lives in [`service::AppService`]; everything it needs
//! from the outside world comes through the port traits in [`ports`].

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
