//! Identity-provider configuration and capability.
//!
//! # Responsibility
//! - Resolve the provider key once at startup.
//! - Turn config plus provider session into an `AuthCapability`.
//!
//! # Invariants
//! - The habit store never depends on anything in this module.

pub mod capability;
pub mod config;
