//! Async driver and terminal front end for the todo list.
//!
//! # Overview
//! `todo-core` decides what each operation does to the list and which
//! request it needs; this crate actually sends the requests and feeds the
//! outcomes back.
//!
//! # Design
//! - `TodoApi` is the seam to the remote service. `HttpTodoApi` executes
//!   core-built requests with reqwest; tests plug in scripted fakes.
//! - `TodoApp` owns the `TodoStore` behind a mutex that is only held for the
//!   synchronous begin/finish steps, never across a remote call, so
//!   concurrent completions interleave item by item.
//! - Every state change is published as a `StoreSnapshot` on a watch channel;
//!   the front end re-renders from that alone.

pub mod api;
pub mod config;
pub mod controller;
pub mod ui;

pub use api::{HttpTodoApi, TodoApi};
pub use config::AppConfig;
pub use controller::TodoApp;
