use crate::event::{EventKind, UserEvent};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Renders a single event as a sentence.
pub fn describe(event: &UserEvent) -> String {
    let repo = &event.repo;
    match &event.kind {
        EventKind::CommitComment => format!("Created commit comment in {}", repo),
        EventKind::Create => format!("Created {} in {}", ref_type(event), repo),
        EventKind::Delete => format!("Deleted {} in {}", ref_type(event), repo),
        EventKind::Discussion => format!("Created discussion in {}", repo),
        EventKind::Fork => format!("Forked {}", repo),
        EventKind::Gollum => describe_wiki(event),
        EventKind::IssueComment => format!("Created comment in {}", repo),
        EventKind::Issues => format!("{} issue in {}", action(event), repo),
        EventKind::Member => format!("Accepted an invitation to a {}", repo),
        EventKind::Public => format!("Made public {}", repo),
        EventKind::PullRequest => format!("{} pull request in {}", action(event), repo),
        EventKind::PullRequestReview => {
            format!("{} pull request review in {}", action(event), repo)
        }
        EventKind::PullRequestReviewComment => {
            format!("Created pull request review comment in {}", repo)
        }
        EventKind::Push => format!("Pushed commit in {}", repo),
        EventKind::Release => format!("Made a release in {}", repo),
        EventKind::Watch => format!("Starred {}", repo),
        EventKind::Unknown(raw) => format!("Unknown event type {}", raw),
    }
}

fn action(event: &UserEvent) -> String {
    match &event.action {
        Some(action) => title_case(action),
        None => format!("Unknown {} action", event.kind),
    }
}

fn ref_type(event: &UserEvent) -> &str {
    event.ref_type.as_deref().unwrap_or("reference")
}

/// Title-cases `text`: every letter that follows a non-letter is uppercased,
/// so `ready_for_review` becomes `Ready_For_Review`.
fn title_case(text: &str) -> String {
    let mut previous_is_letter = false;
    let mut titled = String::with_capacity(text.len());
    for c in text.chars() {
        if previous_is_letter {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    titled
}

/// "1 created and 2 edited wiki pages in {repo}"
fn describe_wiki(event: &UserEvent) -> String {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for action in &event.sub_actions {
        match tally.iter_mut().find(|(seen, _)| *seen == action.as_str()) {
            Some((_, count)) => *count += 1,
            None => tally.push((action.as_str(), 1)),
        }
    }
    if tally.is_empty() {
        return format!("Edited wiki in {}", event.repo);
    }

    let counts = tally
        .iter()
        .map(|(action, count)| format!("{} {}", count, action))
        .collect::<Vec<_>>()
        .join(" and ");
    let plural = if event.sub_actions.len() > 1 { "s" } else { "" };
    format!("{} wiki page{} in {}", counts, plural, event.repo)
}

/// One line of the activity summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub message: String,
    pub count: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.count > 1 {
            write!(f, "{} ({} activities)", self.message, self.count)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Describes every event and folds identical messages together, keeping the
/// order in which each message first appeared.
pub fn summarize(events: &[UserEvent]) -> Vec<Summary> {
    let mut summaries: Vec<Summary> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for message in events.iter().map(describe) {
        match positions.get(&message) {
            Some(&position) => summaries[position].count += 1,
            None => {
                positions.insert(message.clone(), summaries.len());
                summaries.push(Summary { message, count: 1 });
            }
        }
    }
    summaries
}
