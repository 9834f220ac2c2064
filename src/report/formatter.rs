//! Renders notification units into an ordered plan of chat posts

use tracing::info;

use crate::report::aggregator::NotificationUnit;
use crate::report::error::DeliveryError;
use crate::report::sink::{MessageId, NotificationSink, Post};

/// Line framing the package updates of a run
pub const BORDER: &str = "---------------------------------";

pub const NO_MAJOR_UPGRADES: &str = "No major upgrades to dependencies";

/// Slack rejects messages without text, so headers carry a single space
const HEADER_TEXT: &str = " ";

/// A post together with the earlier post whose thread it replies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPost {
    pub post: Post,
    /// Index of the parent post in the plan
    pub reply_to: Option<usize>,
}

/// Ordered posts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPlan {
    posts: Vec<PlannedPost>,
}

impl NotificationPlan {
    pub fn posts(&self) -> &[PlannedPost] {
        &self.posts
    }

    fn push(&mut self, post: Post) -> usize {
        self.push_reply(post, None)
    }

    fn push_reply(&mut self, post: Post, reply_to: Option<usize>) -> usize {
        self.posts.push(PlannedPost { post, reply_to });
        self.posts.len() - 1
    }
}

/// Registry page listing the release history of a package
pub fn history_url(package: &str) -> String {
    format!("https://pypi.org/project/{}/#history", package)
}

/// Lay out the posts for the given units.
///
/// Each unit becomes a header naming the package and change, followed by two
/// replies in its thread: the affected projects, and the release history link.
pub fn plan(units: &[NotificationUnit]) -> NotificationPlan {
    let mut plan = NotificationPlan::default();

    plan.push(Post::text(BORDER));

    if units.is_empty() {
        plan.push(Post::text(NO_MAJOR_UPGRADES));
    }

    for unit in units {
        let header = plan.push(Post {
            text: HEADER_TEXT.to_string(),
            username: Some(format!("{} | {}", unit.package, unit.message)),
            icon_emoji: unit.icon_emoji().map(str::to_string),
            thread_ts: None,
        });
        plan.push_reply(Post::text(unit.projects.join("\n")), Some(header));
        plan.push_reply(Post::text(history_url(&unit.package)), Some(header));
    }

    plan.push(Post::text(BORDER));

    plan
}

/// Send the plan through `sink`, in order.
///
/// Replies are threaded under the id returned for their parent. The first
/// failure stops delivery; posts already sent stay sent.
pub async fn deliver(
    plan: &NotificationPlan,
    sink: &dyn NotificationSink,
) -> Result<Vec<MessageId>, DeliveryError> {
    let mut ids: Vec<MessageId> = Vec::with_capacity(plan.posts.len());

    for planned in &plan.posts {
        let post = Post {
            thread_ts: planned.reply_to.and_then(|i| ids.get(i).cloned()),
            ..planned.post.clone()
        };
        ids.push(sink.post(&post).await?);
    }

    info!("Delivered {} notification post(s)", ids.len());

    Ok(ids)
}
