//! # Moviedex Architecture
//!
//! Moviedex keeps a personal movie collection in a single flat file (JSON or
//! CSV), enriches new entries from an external metadata lookup, and renders
//! read-only views: statistics, sorted and searched listings, a rating
//! histogram image and a static web page.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, prompts, printing                             │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per menu action                               │
//! │  - Operates on a fresh snapshot, returns CmdResult          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - MovieStore trait                                         │
//! │  - JsonStore, CsvStore (production), InMemoryStore (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Long-Lived State
//!
//! Every command reads the whole collection from its store when it starts,
//! and every mutation rewrites the whole file before returning. Nothing is
//! cached between commands.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each menu action
//! - [`store`]: Storage abstraction and implementations
//! - [`fetch`]: External metadata lookup
//! - [`model`]: `Movie`, `MovieInfo`, `Collection`
//! - [`config`]: Runtime configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod store;
