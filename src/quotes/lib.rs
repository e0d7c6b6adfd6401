//! # Quotes Architecture
//!
//! Quotes is a **UI-agnostic quote collection library**: it serves random and filtered
//! quotations from a single JSON file, accepts new quotes, and aggregates ratings. The
//! `quotes` binary is one client; a web server mounting [`web`] is another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients: CLI (main.rs) / web boundary (web.rs)             │
//! │  - Parse input, render output, pick status codes            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, serializes writes             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure operations over a loaded collection                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: FileStore, InMemoryStore                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Positional Ids
//!
//! Quotes carry no stored identifier. A quote's id is its index in whatever sequence the
//! caller is looking at: the stored order for ratings, the filtered order for listings.
//! Ids are valid for one snapshot only; adding a quote or changing a filter renumbers.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Quote`, `IndexedQuote`)
//! - [`web`]: Framework-agnostic web request handling
//! - [`config`]: Configuration management
//! - [`markup`]: HTML escaping for stored text
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod markup;
pub mod model;
pub mod store;
pub mod web;
