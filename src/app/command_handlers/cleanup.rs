use crate::config::StepEnv;
use crate::credential::{CredentialStore, DeleteOutcome};
use crate::shared::logging::{log_event, LogLevel};

/// Removes the cached token. Never fails the job: a missing file is the
/// normal case for jobs that never logged in, and I/O errors are warnings.
pub fn cmd_cleanup(env: &StepEnv) -> String {
    let store = CredentialStore::in_temp_dir(env);
    let path = store.path().display().to_string();
    let outcome = match store.delete() {
        Ok(DeleteOutcome::Deleted) => {
            log_event(LogLevel::Info, "cleanup", &format!("deleted token file: {path}"));
            "deleted"
        }
        Ok(DeleteOutcome::AlreadyAbsent) => {
            log_event(
                LogLevel::Info,
                "cleanup",
                &format!("token file does not exist: {path}"),
            );
            "absent"
        }
        Err(err) => {
            log_event(LogLevel::Warning, "cleanup", &err.to_string());
            "failed"
        }
    };
    format!("cleanup={outcome}\ntoken_file={path}")
}
