//! GitHub event records.
//!
//! See <https://docs.github.com/en/rest/using-the-rest-api/github-event-types>
//! for the payload of each kind.

use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// The event kinds the activity summary knows how to describe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A commit comment is created.
    CommitComment,
    /// A branch, tag or repository is created. Carries `ref_type`.
    Create,
    /// A branch or tag is deleted. Carries `ref_type`.
    Delete,
    Discussion,
    Fork,
    /// Wiki pages are created or edited. Carries one action per page.
    Gollum,
    IssueComment,
    /// Issue activity: opened, closed, reopened.
    Issues,
    /// A user accepted an invitation to a repository.
    Member,
    /// A private repository is made public.
    Public,
    PullRequest,
    PullRequestReview,
    PullRequestReviewComment,
    Push,
    Release,
    /// A repository is starred.
    Watch,
    Unknown(String),
}

impl EventKind {
    pub fn from_type(raw: &str) -> Self {
        match raw {
            "CommitCommentEvent" => EventKind::CommitComment,
            "CreateEvent" => EventKind::Create,
            "DeleteEvent" => EventKind::Delete,
            "DiscussionEvent" => EventKind::Discussion,
            "ForkEvent" => EventKind::Fork,
            "GollumEvent" => EventKind::Gollum,
            "IssueCommentEvent" => EventKind::IssueComment,
            "IssuesEvent" => EventKind::Issues,
            "MemberEvent" => EventKind::Member,
            "PublicEvent" => EventKind::Public,
            "PullRequestEvent" => EventKind::PullRequest,
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            "PullRequestReviewCommentEvent" => EventKind::PullRequestReviewComment,
            "PushEvent" => EventKind::Push,
            "ReleaseEvent" => EventKind::Release,
            "WatchEvent" => EventKind::Watch,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    /// The `type` string GitHub uses for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::CommitComment => "CommitCommentEvent",
            EventKind::Create => "CreateEvent",
            EventKind::Delete => "DeleteEvent",
            EventKind::Discussion => "DiscussionEvent",
            EventKind::Fork => "ForkEvent",
            EventKind::Gollum => "GollumEvent",
            EventKind::IssueComment => "IssueCommentEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::Member => "MemberEvent",
            EventKind::Public => "PublicEvent",
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::PullRequestReview => "PullRequestReviewEvent",
            EventKind::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            EventKind::Push => "PushEvent",
            EventKind::Release => "ReleaseEvent",
            EventKind::Watch => "WatchEvent",
            EventKind::Unknown(raw) => raw,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parts of a GitHub event the summary needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEvent {
    pub kind: EventKind,
    pub repo: String,
    pub action: Option<String>,
    pub ref_type: Option<String>,
    /// Per-page actions of a wiki event, empty for every other kind.
    pub sub_actions: Vec<String>,
}

impl UserEvent {
    pub fn new(kind: EventKind, repo: impl Into<String>) -> Self {
        Self {
            kind,
            repo: repo.into(),
            action: None,
            ref_type: None,
            sub_actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_ref_type(mut self, ref_type: impl Into<String>) -> Self {
        self.ref_type = Some(ref_type.into());
        self
    }

    pub fn with_sub_actions<I, A>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.sub_actions = actions.into_iter().map(Into::into).collect();
        self
    }
}

/// An event as returned by `GET /users/{username}/events`.
#[derive(Deserialize, Debug)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: RawRepo,
    #[serde(default)]
    pub payload: RawPayload,
}

#[derive(Deserialize, Debug)]
pub struct RawRepo {
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct RawPayload {
    pub action: Option<String>,
    pub ref_type: Option<String>,
    #[serde(default)]
    pub pages: Vec<RawPage>,
}

#[derive(Deserialize, Debug)]
pub struct RawPage {
    pub action: Option<String>,
}

impl From<RawEvent> for UserEvent {
    fn from(raw: RawEvent) -> Self {
        Self {
            kind: EventKind::from_type(&raw.kind),
            repo: raw.repo.name,
            action: raw.payload.action,
            ref_type: raw.payload.ref_type,
            sub_actions: raw
                .payload
                .pages
                .into_iter()
                .filter_map(|page| page.action)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_to_kinds_and_back() {
        for raw in [
            "CommitCommentEvent",
            "CreateEvent",
            "DeleteEvent",
            "DiscussionEvent",
            "ForkEvent",
            "GollumEvent",
            "IssueCommentEvent",
            "IssuesEvent",
            "MemberEvent",
            "PublicEvent",
            "PullRequestEvent",
            "PullRequestReviewEvent",
            "PullRequestReviewCommentEvent",
            "PushEvent",
            "ReleaseEvent",
            "WatchEvent",
        ] {
            let kind = EventKind::from_type(raw);
            assert!(!matches!(kind, EventKind::Unknown(_)), "{} should be known", raw);
            assert_eq!(kind.as_str(), raw);
        }
    }

    #[test]
    fn unknown_type_keeps_the_raw_string() {
        let kind = EventKind::from_type("SponsorshipEvent");

        assert_eq!(kind, EventKind::Unknown("SponsorshipEvent".to_string()));
        assert_eq!(kind.to_string(), "SponsorshipEvent");
    }

    #[test]
    fn raw_event_extracts_payload_fields() {
        let json = r#"{
            "id": "1",
            "type": "GollumEvent",
            "actor": {"login": "octocat"},
            "repo": {"id": 1, "name": "octocat/wiki", "url": "https://api.github.com/repos/octocat/wiki"},
            "payload": {
                "pages": [
                    {"page_name": "Home", "action": "created"},
                    {"page_name": "Setup", "action": "edited"}
                ]
            },
            "public": true
        }"#;

        let event: UserEvent = serde_json::from_str::<RawEvent>(json).unwrap().into();

        assert_eq!(
            event,
            UserEvent::new(EventKind::Gollum, "octocat/wiki").with_sub_actions(["created", "edited"])
        );
    }

    #[test]
    fn raw_event_tolerates_missing_and_null_payload_fields() {
        let json = r#"[
            {"type": "CreateEvent", "repo": {"name": "a/b"}, "payload": {"ref_type": "branch", "ref": null}},
            {"type": "PushEvent", "repo": {"name": "a/b"}},
            {"type": "IssuesEvent", "repo": {"name": "a/b"}, "payload": {"action": "closed"}}
        ]"#;

        let events: Vec<UserEvent> = serde_json::from_str::<Vec<RawEvent>>(json)
            .unwrap()
            .into_iter()
            .map(UserEvent::from)
            .collect();

        assert_eq!(
            events,
            vec![
                UserEvent::new(EventKind::Create, "a/b").with_ref_type("branch"),
                UserEvent::new(EventKind::Push, "a/b"),
                UserEvent::new(EventKind::Issues, "a/b").with_action("closed"),
            ]
        );
    }
}
