//! hoverprobe: hover-driven dropdown checks against a real browser
//!
//! The suite opens a fresh browser session per case, loads the target page,
//! moves the pointer over the dropdown toggle and asserts on what the DOM
//! shows: menu visibility, item texts, link targets and the hover style of
//! the first item.
//!
//! - [`cases`]: the four checks and their assertion messages
//! - [`runner`]: per-case setup/teardown and the suite loop
//! - [`session`]: browser sessions behind [`session::SessionLike`]
//! - [`surface`]: the page operations the checks need ([`surface::DropdownPage`])
//! - [`config`]: layered [`config::SuiteConfig`] and page URL resolution
//! - [`report`]: per-case outcomes, text/JSON rendering and exit codes

pub mod cases;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod report;
pub mod runner;
pub mod serve;
pub mod session;
pub mod styles;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;
