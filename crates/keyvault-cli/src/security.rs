//! File handling for secret material: encrypted blobs and master keys.

use std::path::Path;

use zeroize::Zeroizing;

use crate::errors::CliError;

/// Read a file that must exist, mapping a missing file to exit code 3.
pub fn read_secret_file(path: &Path, what: &str) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    if !path.exists() {
        return Err(CliError::not_found(
            format!("{} not found: {}", what, path.display()),
            "Check the path, or create it first.",
        )
        .into());
    }
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(Zeroizing::new(bytes))
}

/// Write `bytes` to `path` with owner-only permissions.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_secret_file(path: &Path, bytes: &[u8], force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "File already exists: {} (use --force to overwrite)",
            path.display()
        ))
        .into());
    }
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
    set_file_permissions(path)?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "wrote secret file");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
        })?;
    }
    Ok(())
}

fn set_file_permissions(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }
    Ok(())
}
