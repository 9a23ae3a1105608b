//! Symbolic actions and perception for an avatar in a live world session.
//!
//! This crate is the layer a planner (or a tool-calling model) drives: ten
//! named commands, each settling exactly once with a [`CommandOutcome`],
//! plus a bounded perception query. It owns no world state; everything is
//! read from and requested of a [`WorldSession`] from `blockbridge-world`.
//!
//! # Modules
//!
//! - [`config`] -- Tunables for command handling ([`ActionConfig`])
//! - [`dispatcher`] -- One handler per command ([`ActionDispatcher`])
//! - [`error`] -- The failure taxonomy ([`ActionError`])
//! - [`inventory`] -- Item-name resolution against the inventory
//! - [`perception`] -- The `look_around` scan
//! - [`settle`] -- Idle / Requested / Settled phases and the navigation wait
//! - [`tools`] -- Function schemas and tool-call parsing ([`Command`])
//!
//! [`CommandOutcome`]: blockbridge_types::CommandOutcome
//! [`WorldSession`]: blockbridge_world::WorldSession

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod inventory;
pub mod perception;
pub mod settle;
pub mod tools;

// Re-export primary types at crate root for convenience.
pub use config::{ActionConfig, ConfigError};
pub use dispatcher::ActionDispatcher;
pub use error::ActionError;
pub use settle::{ActionPhase, NavigationWait};
pub use tools::{Command, parse_tool_call, tool_definitions};
