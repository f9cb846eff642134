//! Workspace backend contracts: wire types, the service trait, and in-process adapters.

pub mod memory;
pub mod service;
pub mod types;
