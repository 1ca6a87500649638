// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API gateway for the Passfort credential vault.
//!
//! Exposes login/logout/me and the vault item CRUD + reveal routes. Every
//! vault route is gated by the identity resolver in [`auth`]: a request
//! carries a session token (cookie or bearer header), the resolver turns
//! it into an authenticated user id, and that id alone selects the
//! per-user encryption key for anything the request touches.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState};
