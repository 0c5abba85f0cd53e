use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Replaces `path` with `content` through a sibling temp file and a rename,
/// so readers observe either the old file or the complete new one.
///
/// With `owner_only` the file is created with mode 0600 on unix before any
/// secret bytes are written to it.
pub fn atomic_write_file(path: &Path, content: &[u8], owner_only: bool) -> std::io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("path has no parent"))?;
    fs::create_dir_all(parent)?;
    let tmp_path = parent.join(format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("credential"),
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    ));

    let written = write_new_file(&tmp_path, content, owner_only)
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

fn write_new_file(path: &Path, content: &[u8], owner_only: bool) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)?;
    #[cfg(unix)]
    if owner_only {
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    #[cfg(not(unix))]
    let _ = owner_only;
    file.write_all(content)?;
    file.sync_all()
}
