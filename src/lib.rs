//! # Draftdesk Architecture
//!
//! Draftdesk is a **UI-agnostic document workspace library**. It is the core of a
//! rich-text editing app — autosave, multi-document management, snapshots, live
//! text metrics, export — without any assumptions about the shell that embeds it
//! (browser, desktop, tests).
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Workspace (workspace.rs)                                    │
//! │  - Entry point for the embedding shell                       │
//! │  - Routes edit events, drives debounced autosave             │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                  │
//! │  - Owns the document collection and the edit buffer          │
//! │  - Reconciliation: insert-or-update, ordering, recovery      │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                            │
//! │  - Abstract KeyValueBackend trait                            │
//! │  - MemoryBackend (tests), FileBackend (desktop shells)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Around the core sit the pure helpers: [`metrics`] (word/character/sentence
//! counts and reading time), [`title`] (auto-title inference), [`export`]
//! (plain-text and markup rendering with derived filenames) and [`shelf`]
//! (display listing for the document sidebar).
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From [`Workspace`] inward, code:
//! - Takes regular Rust function arguments (including the clock — callers pass
//!   `Instant`/`DateTime` values, so debounce timing is deterministic in tests)
//! - Returns regular Rust types
//! - **Never** writes to stdout/stderr
//! - **Never** assumes a DOM, a terminal, or a filesystem
//!
//! Persistence failures never halt the workspace: a corrupt or missing stored
//! collection loads as empty, and save failures are best-effort. Both paths are
//! reported through the `log` facade so embedders can observe them.
//!
//! ## Module Overview
//!
//! - [`workspace`]: The controller — entry point for all edit events
//! - [`repository`]: Document collection ownership and reconciliation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types ([`DocumentRecord`], [`Theme`])
//! - [`debounce`]: The delay-then-invoke primitive behind autosave coalescing
//! - [`metrics`]: Live text metrics
//! - [`title`]: Title inference from document content
//! - [`markup`]: Tag stripping and plain-text rendering shared by the above
//! - [`shelf`]: Document shelf listing with relative edit times
//! - [`export`]: Export rendering and filename derivation
//! - [`error`]: Error types
//!
//! [`Workspace`]: workspace::Workspace
//! [`DocumentRecord`]: model::DocumentRecord
//! [`Theme`]: model::Theme

pub mod debounce;
pub mod error;
pub mod export;
pub mod markup;
pub mod metrics;
pub mod model;
pub mod repository;
pub mod shelf;
pub mod store;
pub mod title;
pub mod workspace;
