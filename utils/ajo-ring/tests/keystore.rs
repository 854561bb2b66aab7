// This file is part of Gear.

// Copyright (C) 2025 Gear Technologies Inc.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use ajo_ring::{Error, Keypair, Keyring};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;

fn write_keystore(dir: &TempDir, entries: &[(&str, String)]) -> Result<std::path::PathBuf> {
    let map: serde_json::Map<_, _> = entries
        .iter()
        .map(|(alias, key)| (alias.to_string(), serde_json::Value::String(key.clone())))
        .collect();

    let path = dir.path().join("keystore.json");
    fs::write(&path, serde_json::to_vec(&map)?)?;
    Ok(path)
}

#[test]
fn loads_every_entry() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let path = write_keystore(
        &dir,
        &[
            ("alice", alice.to_keystore_string()),
            ("bob", bob.to_keystore_string()),
        ],
    )?;

    let keyring = Keyring::new();
    assert_eq!(keyring.load_from_keystore_file(&path)?, 2);
    assert_eq!(keyring.address_of("alice")?, alice.address());
    assert_eq!(keyring.address_of("bob")?, bob.address());
    Ok(())
}

#[test]
fn bad_entry_rejects_whole_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_keystore(
        &dir,
        &[
            ("alice", Keypair::generate().to_keystore_string()),
            ("bob", "AAAA".into()),
        ],
    )?;

    let keyring = Keyring::new();
    let existing = keyring.generate("carol");

    let err = keyring.load_from_keystore_file(&path).unwrap_err();
    let Error::KeystoreLoad { path: failed, source } = err else {
        panic!("expected keystore load error");
    };
    assert_eq!(failed, path);
    assert!(matches!(*source, Error::InvalidKey(ref msg) if msg.contains("bob")));

    assert_eq!(keyring.aliases(), ["carol"]);
    assert_eq!(keyring.address_of("carol")?, existing.address());
    Ok(())
}

#[test]
fn non_string_entry_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("keystore.json");
    fs::write(&path, br#"{"alice": 42}"#)?;

    let keyring = Keyring::new();
    assert!(matches!(
        keyring.load_from_keystore_file(&path),
        Err(Error::KeystoreLoad { .. })
    ));
    assert!(keyring.is_empty());
    Ok(())
}

#[test]
fn io_and_json_failures_are_wrapped() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let keyring = Keyring::new();

    let missing = dir.path().join("missing.json");
    let err = keyring.load_from_keystore_file(&missing).unwrap_err();
    assert!(matches!(err, Error::KeystoreLoad { ref source, .. } if matches!(**source, Error::Io(_))));

    let garbage = dir.path().join("garbage.json");
    fs::write(&garbage, b"[not json")?;
    let err = keyring.load_from_keystore_file(&garbage).unwrap_err();
    assert!(matches!(err, Error::KeystoreLoad { ref source, .. } if matches!(**source, Error::Json(_))));
    Ok(())
}

#[test]
fn save_then_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("keystore.json");

    let keyring = Keyring::new();
    let alice = keyring.generate("alice");
    let bob = keyring.generate("bob");
    keyring.save_to_keystore_file(&path)?;

    let restored = Keyring::new();
    restored.load_from_keystore_file(&path)?;
    assert_eq!(restored.aliases(), ["alice", "bob"]);
    assert_eq!(restored.address_of("alice")?, alice.address());
    assert_eq!(restored.address_of("bob")?, bob.address());
    Ok(())
}
