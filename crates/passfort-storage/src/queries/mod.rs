// SPDX-FileCopyrightText: 2026 Passfort Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for each storage entity.

pub mod users;
pub mod vault_items;
