//! # Core Application Logic
//!
//! This module contains Atlas's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • derive (list views)  │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Source   │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`country`]: Records and the option types of the filter controls
//! - [`derive`]: Derived list engine (region / search filtering)
//! - [`nav`]: Filter ↔ location sync, history, scroll restoration
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: Config file, env and CLI resolution
//! - [`storage`]: Durable key/value storage
//! - [`theme`]: Light / dark color mode
//! - [`format`]: Number, list and property formatting

pub mod action;
pub mod config;
pub mod country;
pub mod derive;
pub mod format;
pub mod nav;
pub mod state;
pub mod storage;
pub mod theme;
