//! # Veridoc Architecture
//!
//! Veridoc is a **UI-agnostic document-verification record library**: a
//! persisted vault of uploaded-document records and verification history,
//! with a thin client for the remote verification backend. The bundled CLI
//! is just one consumer.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over the record store                │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait over string-keyed JSON values        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! │  - RecordStore: seeding, append, lookup, history rules      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The remote backend is a separate collaborator behind [`client::ApiClient`];
//! it shares nothing with the local store except the session keys.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain arguments, returns plain
//! `Result` types, never writes to stdout/stderr, and never exits the
//! process. The same core could serve a desktop shell or a web UI.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all local operations
//! - [`client`]: HTTP client for the verification backend
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction, backends, and the record store
//! - [`model`]: Core data types (`DocumentRecord`, `HistoryEntry`, enums)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
