//! Registry implementations for resolving package names

pub mod pypi;

pub use pypi::PypiRegistry;
