//! Notification layer
//!
//! Aggregates package changes of all projects and delivers them to a chat channel.
//!
//! # Modules
//!
//! - [`aggregator`]: Groups identical changes across projects and filters routine bumps
//! - [`formatter`]: Lays out the threaded posts for a run and delivers them in order
//! - [`sink`]: `NotificationSink` trait and post types
//! - [`slack`]: Slack Web API sink
//! - [`console`]: stdout sink for dry runs
//! - [`error`]: Delivery errors

pub mod aggregator;
pub mod console;
pub mod error;
pub mod formatter;
pub mod sink;
pub mod slack;

pub use aggregator::{ChangeGroup, NotificationUnit, aggregate};
pub use console::ConsoleSink;
pub use error::DeliveryError;
pub use formatter::{NotificationPlan, deliver, plan};
pub use sink::{MessageId, NotificationSink, Post};
pub use slack::SlackSink;
