use std::path::{Path, PathBuf};

/// Name of the directory, next to the executable, that holds program assets.
pub const RESOURCE_DIR: &str = "resource";

/// Errors from resource path lookup.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("cannot locate current executable: {0}")]
    CurrentExe(#[from] std::io::Error),
    #[error("executable path has no parent directory: {0}")]
    NoParent(PathBuf),
}

/// Resolve `file_name` inside the resource directory of the running executable.
///
/// The file is not required to exist; callers report missing files when they
/// open them.
pub fn resource_path(file_name: impl AsRef<Path>) -> Result<PathBuf, ResourceError> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| ResourceError::NoParent(exe.clone()))?;
    let path = resource_path_in(dir, file_name);
    tracing::debug!("resolved resource {}", path.display());
    Ok(path)
}

/// Join `file_name` onto the resource directory under `base_dir`.
pub fn resource_path_in(base_dir: impl AsRef<Path>, file_name: impl AsRef<Path>) -> PathBuf {
    base_dir.as_ref().join(RESOURCE_DIR).join(file_name)
}
