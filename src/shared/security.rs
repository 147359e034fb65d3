use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a single issue document or snapshot (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a file after checking it is a regular, non-symlinked file of
/// bounded size.
///
/// # Arguments
/// * `path` - The file to read
/// * `file_description` - Description for error messages (e.g., "issue document")
/// * `max_size` - Maximum accepted size in bytes
///
/// # Errors
/// Returns an error if:
/// - The metadata cannot be read (including a missing file)
/// - The path is a symbolic link or not a regular file
/// - The file is larger than `max_size`
pub fn safe_read_file(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    // symlink_metadata so the link itself is inspected, not its target
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            file_description,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    fs::read_to_string(path).map_err(|e| {
        let name = path.display();
        anyhow::anyhow!("Failed to read {} {}: {}", file_description, name, e)
    })
}

/// Rejects output targets that already exist as symbolic links.
pub fn reject_symlink_target(path: &Path) -> Result<()> {
    if let Ok(metadata) = fs::symlink_metadata(path) {
        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
                path.display()
            );
        }
    }
    Ok(())
}
