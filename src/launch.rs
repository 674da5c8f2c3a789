use anyhow::{ensure, Context};
use fs_extra::file::CopyOptions;
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{error::Error, info, template::DocKind, trace, warn};

/// How to treat the office application once the copy is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Open {
    /// Leave the file alone.
    No,
    /// Spawn and return immediately. Failures of the child are never seen.
    Detached,
    /// Wait for the child and report a failure status.
    Wait,
}

/// Office invocation for `destination`: `--<kind> <file>` when the kind is
/// known, just `<file>` otherwise.
#[must_use]
pub fn office_args(kind: Option<DocKind>, destination: &Path) -> Vec<std::ffi::OsString> {
    let mut args = Vec::with_capacity(2);
    if let Some(kind) = kind {
        args.push(format!("--{}", kind.keyword()).into());
    }
    args.push(destination.as_os_str().to_owned());
    args
}

/// Whether `destination` names the same file as `source`. The destination
/// may not exist yet, so its parent is resolved instead.
fn same_file(source: &Path, destination: &Path) -> bool {
    let Ok(source) = source.canonicalize() else {
        return false;
    };

    let destination = destination.canonicalize().or_else(|_| {
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        parent
            .canonicalize()
            .map(|p| p.join(destination.file_name().unwrap_or_default()))
    });

    destination.is_ok_and(|d| d == source)
}

/// Copy `source` to `destination`, replacing whatever is there.
///
/// # Errors
///
/// Any I/O error from the copy, with both paths in the context. Copying a
/// template onto itself is refused before anything is written.
pub fn materialize(source: &Path, destination: &Path) -> anyhow::Result<u64> {
    ensure!(
        !same_file(source, destination),
        "{} is the template itself, give the new document another name",
        destination.display()
    );

    let mut options = CopyOptions::new();
    options.overwrite = true;

    fs_extra::file::copy(source, destination, &options).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            destination.display()
        )
    })
}

/// Start `office` on `destination`.
///
/// # Errors
///
/// [`Error::LaunchFailed`] if the program can not be spawned, or with
/// [`Open::Wait`] if it exits unsuccessfully.
pub fn launch(
    office: &str,
    kind: Option<DocKind>,
    destination: &Path,
    open: Open,
) -> Result<(), Error> {
    let failed = |reason: String| Error::LaunchFailed {
        program: office.to_string(),
        reason,
    };

    let args = office_args(kind, destination);
    trace!("Spawning {office} {args:?}");

    let mut cmd = Command::new(office);
    cmd.args(&args).stdin(Stdio::null());

    match open {
        Open::No => Ok(()),
        Open::Detached => {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
            cmd.spawn().map(drop).map_err(|e| failed(e.to_string()))
        }
        Open::Wait => {
            let status = cmd.status().map_err(|e| failed(e.to_string()))?;
            if status.success() {
                Ok(())
            } else {
                Err(failed(status.to_string()))
            }
        }
    }
}

/// Copy the template into place and open it unless told not to.
///
/// A detached launch that can not even be spawned is only warned about, the
/// document has been created either way.
///
/// # Errors
///
/// Copy failures, and launch failures when `open` is [`Open::Wait`].
pub fn materialize_and_launch(
    source: &Path,
    destination: PathBuf,
    open: Open,
    kind: Option<DocKind>,
    office: &str,
) -> anyhow::Result<PathBuf> {
    materialize(source, &destination)?;

    if open == Open::No {
        info!("Created file {}", destination.display());
        return Ok(destination);
    }

    info!("Creating and opening file {}", destination.display());

    match launch(office, kind, &destination, open) {
        Err(e) if open == Open::Detached => warn!("{e}"),
        res => res?,
    }

    Ok(destination)
}
