//! The world-session boundary for Blockbridge.
//!
//! The action layer never talks to a live world directly. It talks to a
//! [`WorldSession`] (avatar reads, mutation requests, navigation signals)
//! and an [`ItemCatalog`] (item-name to numeric-id lookup). Both are
//! external collaborators; this crate only fixes their shape.
//!
//! # Modules
//!
//! - [`session`] -- The [`WorldSession`] trait
//! - [`catalog`] -- The [`ItemCatalog`] trait and [`StaticItemCatalog`]
//! - [`error`] -- [`SessionError`], returned when the session rejects a request
//! - [`sim`] -- [`SimWorld`], an in-memory world session

pub mod catalog;
pub mod error;
pub mod session;
pub mod sim;

pub use catalog::{CatalogError, ItemCatalog, StaticItemCatalog};
pub use error::SessionError;
pub use session::WorldSession;
pub use sim::{NavigationScript, RejectableRequest, SimRequest, SimWorld};
