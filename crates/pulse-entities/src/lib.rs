//! Database entities for the Pulse event store

pub mod events;
