//! Gridstep Harness: session orchestration around the search engines.
//!
//! The harness owns the external command surface (`step`, `undo`, `reset`)
//! and the undo history. It does NOT implement search logic; every unit of
//! work is delegated to a [`gridstep_search::state::StrategyState`].
//!
//! - [`session`]: the driver and its reports
//! - [`history`]: the snapshot stack behind `undo`
//! - [`transcript`]: canonical, digestible record of a session's commands

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod history;
pub mod session;
pub mod transcript;
