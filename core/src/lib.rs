//! I/O-free core for the todo list manager.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and owns the in-memory todo
//! list state through `TodoStore`. The caller executes the actual HTTP
//! round-trip and feeds the outcome back, making the core fully
//! deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only `base_url` and the owner id.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoStore` mirrors that split: `begin_*` applies the optimistic local
//!   change and says which remote call to issue, `finish_*` reconciles the
//!   outcome against the originating item id.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, StoreError};
pub use filter::Filter;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{CommitAction, ErrorBanner, PendingUpdate, StoreSnapshot, TodoStore};
pub use types::{NewTodo, Todo, TodoItem, TodoPatch, PLACEHOLDER_ID};
