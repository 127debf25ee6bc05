// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for database initialization and integrity configuration.

use crate::Persistence;

#[test]
fn test_in_memory_initialization_succeeds() {
    let persistence = Persistence::new_in_memory();

    assert!(persistence.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    persistence.verify_foreign_key_enforcement().unwrap();
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = Persistence::new_in_memory().unwrap();

    first
        .insert_voucher(&super::create_test_voucher("ISOLATED"))
        .unwrap();

    assert!(second.find_voucher_by_code("ISOLATED").unwrap().is_none());
}

#[test]
fn test_file_based_initialization_succeeds() {
    let dir = std::env::temp_dir().join(format!("voucher_persistence_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("vouchers.db");

    let persistence = Persistence::new_with_file(&path);

    assert!(persistence.is_ok());
    drop(persistence);
    let _ = std::fs::remove_dir_all(&dir);
}
