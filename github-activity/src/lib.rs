//! Summarizes the recent public activity of a GitHub user.
//!
//! [`client::GithubClient`] fetches the raw event feed, [`classify`] turns
//! each [`event::UserEvent`] into a sentence and folds repeats together,
//! and [`app::AppController`] ties fetching and printing together.

pub mod app;
pub mod classify;
pub mod client;
pub mod config;
pub mod event;
pub mod output;
