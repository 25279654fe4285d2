//! # Salesdesk Architecture
//!
//! Salesdesk tracks clients, a product catalog and the sales made to those
//! clients, and derives a small dashboard (money received, money still owed,
//! revenue per product) from them. It is a library first: the bundled CLI is
//! one client of the API, not the place where the rules live.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, asks for confirmation, renders output  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Refuses data access without a login session              │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, valuation, user-facing messages              │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store/, valuation.rs, aggregate.rs, auth.rs)         │
//! │  - RecordStore over a StorageBackend trait                  │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records and References
//!
//! Sales point at clients and products by id. Deleting a client never touches
//! its sales; reads that join them show a placeholder instead of failing. See
//! [`aggregate`] for how each view treats a dangling id.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Persistence goes through [`store::backend::StorageBackend`],
//! so the whole core runs against [`store::mem_backend::MemBackend`] in tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Record store and storage backends
//! - [`model`]: Records, collections and payment status
//! - [`valuation`]: Sale pricing from a product and a quantity
//! - [`aggregate`]: Dashboard figures and joined sale rows
//! - [`auth`]: Login session gate
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, prompts and templated rendering for the binary (not part of the lib API)

pub mod aggregate;
pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod valuation;
