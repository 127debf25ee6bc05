// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database plumbing.
//!
//! Everything that cannot be expressed in backend-agnostic Diesel DSL
//! lives here: connection initialization, migration execution, and
//! `SQLite` PRAGMA configuration. Domain queries and mutations stay in
//! `queries/` and `mutations/`.

pub mod sqlite;
