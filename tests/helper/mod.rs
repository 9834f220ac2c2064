#![allow(dead_code)]

mod registry;
mod sink;

pub use registry::StaticResolver;
pub use sink::RecordingSink;
