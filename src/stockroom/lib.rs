//! # Stockroom Architecture
//!
//! Stockroom is an **inventory catalog library** with two thin clients: a CLI and an
//! HTTP server. Its centerpiece is the bulk import engine, which reconciles an
//! uploaded CSV file against the stored catalog.
//!
//! ## Layers
//!
//! ```text
//! ┌───────────────────────────────┐  ┌───────────────────────────────┐
//! │  CLI (cli/, wired by main.rs) │  │  HTTP server (server/)        │
//! │  args, terminal output        │  │  routes, uploads, status codes│
//! └───────────────────────────────┘  └───────────────────────────────┘
//!                 │                                 │
//!                 └────────────────┬────────────────┘
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)  +  Import Engine (import/)  │
//! │  - Business logic on Rust types, no I/O assumptions         │
//! └─────────────────────────────────────────────────────────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, Catalog over FsBackend / MemBackend     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code never prints, never exits the process and never
//! assumes a terminal or an HTTP request.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** and the **import engine**: thorough unit tests against an
//!    in-memory catalog. Most of the testing lives here.
//! 2. **API**: dispatch checks only.
//! 3. **Server**: router tests through `tower::ServiceExt::oneshot`.
//! 4. **CLI**: end-to-end runs of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`import`]: CSV parsing, normalization, category resolution and upserts
//! - [`store`]: Storage abstraction and implementations
//! - [`server`]: axum router and handlers
//! - [`model`]: Core data types (`Product`, `Category`, `StockStatus`)
//! - [`sanitize`]: Text escaping and file name sanitizing
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod sanitize;
pub mod server;
pub mod store;
