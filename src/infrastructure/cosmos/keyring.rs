//! Credential store - resolves signing identities to addresses
//!
//! The `test` backend reads plaintext JSON key records from
//! `<home>/keyring-test/<name>.json`; `memory` starts empty. Other cosmos
//! backend names are recognized but not supported.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::shared::errors::{CredentialStoreError, IdentityResolutionError};
use crate::shared::types::KeyringBackend;

pub const TEST_KEYRING_DIR: &str = "keyring-test";
const RECORD_EXTENSION: &str = "json";

/// A stored key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub pubkey: Option<String>,
}

/// Resolved signing identity (`from` name and address)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub address: String,
}

impl From<&KeyRecord> for Identity {
    fn from(record: &KeyRecord) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
        }
    }
}

/// Read-only keyring handle
#[derive(Debug, Clone)]
pub struct Keyring {
    backend: KeyringBackend,
    location: Option<PathBuf>,
    records: BTreeMap<String, KeyRecord>,
}

impl Keyring {
    /// Open the keyring for `backend` rooted at `home`
    pub fn open(backend: KeyringBackend, home: &Path) -> Result<Self, CredentialStoreError> {
        match backend {
            KeyringBackend::Test => Self::open_test(home),
            KeyringBackend::Memory => Ok(Self::in_memory()),
            other => Err(CredentialStoreError::UnsupportedBackend(other.as_str().to_string())),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: KeyringBackend::Memory,
            location: None,
            records: BTreeMap::new(),
        }
    }

    fn open_test(home: &Path) -> Result<Self, CredentialStoreError> {
        let dir = home.join(TEST_KEYRING_DIR);
        // A keyring nobody has added keys to yet has no directory
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "test keyring directory absent, opening empty keyring");
                return Ok(Self {
                    backend: KeyringBackend::Test,
                    location: Some(dir),
                    records: BTreeMap::new(),
                });
            }
            Err(source) => {
                return Err(CredentialStoreError::Inaccessible { path: dir, source });
            }
        };

        let mut records = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| CredentialStoreError::Inaccessible {
                    path: dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            let record = read_record(&path)?;
            records.insert(record.name.clone(), record);
        }

        debug!(dir = %dir.display(), keys = records.len(), "opened test keyring");
        Ok(Self {
            backend: KeyringBackend::Test,
            location: Some(dir),
            records,
        })
    }

    /// Add a key; only meaningful for the in-memory backend
    pub fn insert(&mut self, record: KeyRecord) {
        if self.backend != KeyringBackend::Memory {
            warn!(backend = self.backend.as_str(), "inserting key into non-memory keyring");
        }
        self.records.insert(record.name.clone(), record);
    }

    pub fn backend(&self) -> KeyringBackend {
        self.backend
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn key(&self, name: &str) -> Option<&KeyRecord> {
        self.records.get(name)
    }

    pub fn key_by_address(&self, address: &str) -> Option<&KeyRecord> {
        self.records.values().find(|r| r.address == address)
    }

    /// Resolve a `from` value, which is either a key name or an address
    /// carrying `account_prefix`
    pub fn resolve(
        &self,
        from: &str,
        account_prefix: &str,
    ) -> Result<Identity, IdentityResolutionError> {
        let is_address = from
            .strip_prefix(account_prefix)
            .is_some_and(|rest| rest.starts_with('1'));

        let record = if is_address {
            self.key_by_address(from)
        } else {
            self.key(from)
        };

        record
            .map(Identity::from)
            .ok_or_else(|| IdentityResolutionError::NotFound(from.to_string()))
    }
}

fn read_record(path: &Path) -> Result<KeyRecord, CredentialStoreError> {
    let content = fs::read_to_string(path).map_err(|source| CredentialStoreError::Inaccessible {
        path: path.to_path_buf(),
        source,
    })?;
    let record: KeyRecord =
        serde_json::from_str(&content).map_err(|e| CredentialStoreError::MalformedRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    if record.name.is_empty() || record.address.is_empty() {
        return Err(CredentialStoreError::MalformedRecord {
            path: path.to_path_buf(),
            reason: "name and address are required".to_string(),
        });
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ADDRESS: &str = "osmo1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

    fn home_with_key(name: &str, address: &str) -> TempDir {
        let home = TempDir::new().unwrap();
        let dir = home.path().join(TEST_KEYRING_DIR);
        fs::create_dir_all(&dir).unwrap();
        let record = KeyRecord {
            name: name.to_string(),
            address: address.to_string(),
            pubkey: None,
        };
        fs::write(
            dir.join(format!("{}.json", name)),
            serde_json::to_string(&record).unwrap(),
        )
        .unwrap();
        // stray files are ignored
        fs::write(dir.join("README"), "not a key").unwrap();
        home
    }

    #[test]
    fn test_open_test_backend_and_resolve_by_name() {
        let home = home_with_key("default", ADDRESS);
        let keyring = Keyring::open(KeyringBackend::Test, home.path()).unwrap();

        assert_eq!(keyring.backend(), KeyringBackend::Test);
        let identity = keyring.resolve("default", "osmo").unwrap();
        assert_eq!(identity.name, "default");
        assert_eq!(identity.address, ADDRESS);
    }

    #[test]
    fn test_resolve_by_address() {
        let home = home_with_key("trader", ADDRESS);
        let keyring = Keyring::open(KeyringBackend::Test, home.path()).unwrap();

        let identity = keyring.resolve(ADDRESS, "osmo").unwrap();
        assert_eq!(identity.name, "trader");
    }

    #[test]
    fn test_missing_identity() {
        let home = home_with_key("default", ADDRESS);
        let keyring = Keyring::open(KeyringBackend::Test, home.path()).unwrap();

        let err = keyring.resolve("validator", "osmo").unwrap_err();
        assert!(matches!(err, IdentityResolutionError::NotFound(name) if name == "validator"));
    }

    #[test]
    fn test_missing_keyring_dir_opens_empty() {
        let home = TempDir::new().unwrap();
        let keyring = Keyring::open(KeyringBackend::Test, home.path()).unwrap();

        assert_eq!(keyring.backend(), KeyringBackend::Test);
        assert_eq!(keyring.location(), Some(home.path().join(TEST_KEYRING_DIR).as_path()));
        let err = keyring.resolve("default", "osmo").unwrap_err();
        assert!(matches!(err, IdentityResolutionError::NotFound(_)));
    }

    #[test]
    fn test_unreadable_keyring_dir_is_inaccessible() {
        // a regular file where the directory should be
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(TEST_KEYRING_DIR), "not a directory").unwrap();

        let err = Keyring::open(KeyringBackend::Test, home.path()).unwrap_err();
        assert!(matches!(err, CredentialStoreError::Inaccessible { .. }));
    }

    #[test]
    fn test_malformed_record() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join(TEST_KEYRING_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.json"), "{ not json").unwrap();

        let err = Keyring::open(KeyringBackend::Test, home.path()).unwrap_err();
        assert!(matches!(err, CredentialStoreError::MalformedRecord { .. }));
    }

    #[test]
    fn test_unsupported_backend() {
        let home = TempDir::new().unwrap();
        let err = Keyring::open(KeyringBackend::Os, home.path()).unwrap_err();
        assert!(matches!(err, CredentialStoreError::UnsupportedBackend(name) if name == "os"));
    }

    #[test]
    fn test_memory_backend() {
        let mut keyring = Keyring::open(KeyringBackend::Memory, Path::new("/unused")).unwrap();
        assert!(keyring.resolve("default", "osmo").is_err());

        keyring.insert(KeyRecord {
            name: "default".to_string(),
            address: ADDRESS.to_string(),
            pubkey: None,
        });
        assert!(keyring.resolve("default", "osmo").is_ok());
        assert!(keyring.location().is_none());
    }
}
