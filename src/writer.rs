//! Write the rendered review prompt to its configured location.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::ReviewConfig;
use crate::error::PromptError;
use crate::prompt;

/// Render the review prompt and write it to `config.output_file`.
///
/// Creates the output directory (and any missing ancestors) first. The text
/// is rendered fully in memory, written to a uniquely named temporary file
/// beside the destination and renamed into place, so the destination is
/// either the complete prompt or left as it was. A symlinked destination is
/// written through: its target is replaced and the link kept. Returns the
/// configured path.
pub fn write_prompt_file(config: &ReviewConfig) -> Result<PathBuf, PromptError> {
    if let Some(dir) = config.output_dir() {
        fs::create_dir_all(dir).map_err(|source| PromptError::CreateOutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let rendered = prompt::render_review_prompt(config)?;
    let path = config.output_file.clone();
    let target = resolve_target(&path).map_err(|source| PromptError::CreateOutputFile {
        path: path.clone(),
        source,
    })?;
    write_atomically(&path, &target, rendered.as_bytes())?;

    info!(
        path = %path.display(),
        target = %target.display(),
        bytes = rendered.len(),
        "wrote review prompt"
    );
    Ok(path)
}

/// The file that actually receives the bytes: `path` itself, or the file a
/// symlink at `path` points to (which need not exist yet).
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let link = fs::read_link(path)?;
                let base = path.parent().unwrap_or(Path::new(""));
                Ok(base.join(link))
            }
            Err(e) => Err(e),
        },
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

fn write_atomically(path: &Path, target: &Path, contents: &[u8]) -> Result<(), PromptError> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Dropping `tmp` on any early return removes it.
    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| PromptError::CreateOutputFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(tmp = %tmp.path().display(), "writing prompt to temp file");

    let write_err = |source: io::Error| PromptError::WriteOutputFile {
        path: path.to_path_buf(),
        source,
    };
    tmp.write_all(contents).map_err(write_err)?;
    set_readable(tmp.as_file()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Temp files are created 0600; later pipeline steps may run as another user.
#[cfg(unix)]
fn set_readable(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
