//! agentdeck — client behaviors for the agent demo page and workshop site.
//!
//! - [`query`] — validate the query form, submit it, render the outcome
//! - [`render`] — format agent results as HTML
//! - [`copy`] — copy-to-clipboard controls for code blocks
//! - [`nav`] — collapsible navigation sections with saved state

pub mod cli;
pub mod config;
pub mod copy;
pub mod logging;
pub mod nav;
pub mod query;
pub mod render;
