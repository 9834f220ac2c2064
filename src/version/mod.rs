//! Package registry access and version comparison
//!
//! # Modules
//!
//! - [`registry`]: `NameResolver` trait for resolving canonical package names
//! - [`registries`]: Concrete registry implementations (PyPI)
//! - [`comparator`]: Direction and major-boundary assessment of version pairs
//! - [`error`]: Error types for registry lookups

pub mod comparator;
pub mod error;
pub mod registries;
pub mod registry;
