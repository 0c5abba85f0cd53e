use super::{CredentialError, CredentialRecord};
use crate::config::{token_file_path, StepEnv};
use crate::shared::fs_atomic::atomic_write_file;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

/// The job-scoped token file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_temp_dir(env: &StepEnv) -> Self {
        Self::new(token_file_path(env))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn load(&self) -> Result<CredentialRecord, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CredentialError::Missing {
                    path: self.display_path(),
                });
            }
            Err(source) => {
                return Err(CredentialError::Read {
                    path: self.display_path(),
                    source,
                });
            }
        };

        let record: CredentialRecord =
            serde_json::from_str(&raw).map_err(|e| CredentialError::Invalid {
                path: self.display_path(),
                reason: e.to_string(),
            })?;
        if record.token.trim().is_empty() {
            return Err(CredentialError::Invalid {
                path: self.display_path(),
                reason: "token not found in token file".to_string(),
            });
        }
        Ok(record)
    }

    pub fn load_token(&self) -> Result<String, CredentialError> {
        self.load().map(|record| record.token)
    }

    pub fn save(&self, record: &CredentialRecord) -> Result<(), CredentialError> {
        if record.token.trim().is_empty() {
            return Err(CredentialError::Invalid {
                path: self.display_path(),
                reason: "refusing to save an empty token".to_string(),
            });
        }
        let body = serde_json::to_vec_pretty(record).map_err(|source| CredentialError::Encode {
            path: self.display_path(),
            source,
        })?;
        atomic_write_file(&self.path, &body, true).map_err(|source| CredentialError::Write {
            path: self.display_path(),
            source,
        })
    }

    pub fn delete(&self) -> Result<DeleteOutcome, CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyAbsent),
            Err(source) => Err(CredentialError::Delete {
                path: self.display_path(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ErrorKind as ActionErrorKind;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> CredentialStore {
        CredentialStore::new(dir.join("meshstack_token.json"))
    }

    #[test]
    fn load_returns_token_and_context_fields() {
        let temp = tempdir().expect("tempdir");
        let store = store_in(temp.path());
        fs::write(
            store.path(),
            r#"{"token":"test-token-123","bbRunUuid":"uuid-456","baseUrl":"https://api.example.com"}"#,
        )
        .expect("write token file");

        let record = store.load().expect("load");
        assert_eq!(record.token, "test-token-123");
        assert_eq!(record.bb_run_uuid.as_deref(), Some("uuid-456"));
        assert_eq!(record.base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn missing_file_is_credential_missing() {
        let temp = tempdir().expect("tempdir");
        let err = store_in(temp.path()).load().expect_err("missing");
        assert_eq!(err.kind(), ActionErrorKind::CredentialMissing);
        assert!(err.to_string().contains("token file does not exist"));
    }

    #[test]
    fn file_without_token_is_invalid() {
        let temp = tempdir().expect("tempdir");
        let store = store_in(temp.path());
        fs::write(store.path(), r#"{"bbRunUuid":"uuid-456"}"#).expect("write");
        let err = store.load().expect_err("no token");
        assert_eq!(err.kind(), ActionErrorKind::InvalidCredential);
        assert!(err.to_string().contains("token not found in token file"));

        fs::write(store.path(), r#"{"token":""}"#).expect("write");
        assert_eq!(
            store.load().expect_err("empty token").kind(),
            ActionErrorKind::InvalidCredential
        );
    }

    #[test]
    fn file_with_invalid_json_is_invalid() {
        let temp = tempdir().expect("tempdir");
        let store = store_in(temp.path());
        fs::write(store.path(), "invalid json {").expect("write");
        assert_eq!(
            store.load().expect_err("invalid json").kind(),
            ActionErrorKind::InvalidCredential
        );
    }

    #[test]
    fn save_overwrites_and_preserves_unknown_fields() {
        let temp = tempdir().expect("tempdir");
        let store = store_in(temp.path());
        fs::write(store.path(), r#"{"token":"old","workspace":"ws-1"}"#).expect("write");

        let mut record = store.load().expect("load");
        record.token = "new".to_string();
        store.save(&record).expect("save");

        let reloaded = store.load().expect("reload");
        assert_eq!(reloaded.token, "new");
        assert_eq!(
            reloaded.extra.get("workspace").and_then(|v| v.as_str()),
            Some("ws-1")
        );
    }

    #[test]
    fn save_rejects_empty_token() {
        let temp = tempdir().expect("tempdir");
        let store = store_in(temp.path());
        assert!(store.save(&CredentialRecord::new(" ")).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn delete_is_idempotent() {
        let temp = tempdir().expect("tempdir");
        let store = store_in(temp.path());
        store
            .save(&CredentialRecord::new("tok"))
            .expect("save");
        assert_eq!(store.delete().expect("delete"), DeleteOutcome::Deleted);
        assert_eq!(store.delete().expect("delete again"), DeleteOutcome::AlreadyAbsent);
    }

    #[test]
    fn debug_output_hides_token() {
        let record = CredentialRecord::new("super-secret");
        assert!(!format!("{record:?}").contains("super-secret"));
    }
}
