pub mod config;
pub mod diff;
pub mod logging;
pub mod project;
pub mod report;
pub mod run;
pub mod version;
