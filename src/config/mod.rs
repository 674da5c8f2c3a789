use anyhow::Context;
use derive_builder::Builder;
use directories::UserDirs;
use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{error::Error, trace};

pub const DEFAULT_OFFICE: &str = "libreoffice";
pub const USER_DIR_COMMAND: &str = "xdg-user-dir";

/// Everything a run needs from its environment, resolved once up front and
/// passed along explicitly.
#[derive(Builder, Debug, Clone)]
pub struct Workspace {
    template_dir: PathBuf,
    working_dir: PathBuf,
    #[builder(default = "DEFAULT_OFFICE.to_string()", setter(into))]
    office: String,
    #[builder(default = "Self::default_user_home()")]
    user_home: Option<PathBuf>,
}

impl WorkspaceBuilder {
    fn default_user_home() -> Option<PathBuf> {
        UserDirs::new().map(|d| d.home_dir().to_owned())
    }
}

impl Workspace {
    /// Create a new [`Workspace`] builder
    #[must_use]
    pub fn builder() -> WorkspaceBuilder {
        WorkspaceBuilder::create_empty()
    }

    /// Resolve the workspace for the current process. `template_dir` wins
    /// when given, otherwise the user's templates directory is asked to
    /// `xdg-user-dir`.
    ///
    /// # Errors
    ///
    /// [`Error::DependencyMissing`] if the templates directory has to be
    /// looked up and the lookup command fails, or an I/O error if the
    /// current directory is invalid.
    pub fn resolve(template_dir: Option<PathBuf>, office: &str) -> anyhow::Result<Self> {
        let template_dir = match template_dir {
            Some(dir) => {
                trace!("Using configured template directory {}", dir.display());
                dir
            }
            None => resolve_template_directory()?,
        };

        Ok(Self {
            template_dir,
            working_dir: std::env::current_dir().context("Failed to get current dir")?,
            office: office.to_string(),
            user_home: WorkspaceBuilder::default_user_home(),
        })
    }

    /// Returns a reference to the template dir of this [`Workspace`].
    #[must_use]
    pub fn template_dir(&self) -> &Path {
        self.template_dir.as_path()
    }

    /// Returns a reference to the working dir of this [`Workspace`].
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        self.working_dir.as_path()
    }

    #[must_use]
    pub fn office(&self) -> &str {
        &self.office
    }

    /// `path` with the user home replaced by `~`, for display.
    #[must_use]
    pub fn tilde(&self, path: &Path) -> String {
        match self.user_home.as_deref().map(|h| path.strip_prefix(h)) {
            Some(Ok(rest)) if rest.as_os_str().is_empty() => "~".to_string(),
            Some(Ok(rest)) => Path::new("~").join(rest).display().to_string(),
            _ => path.display().to_string(),
        }
    }
}

/// Ask `xdg-user-dir TEMPLATES` for the user's templates directory.
///
/// # Errors
///
/// [`Error::DependencyMissing`] if the command can not be run, exits with a
/// failure status or prints nothing.
pub fn resolve_template_directory() -> Result<PathBuf, Error> {
    resolve_with(USER_DIR_COMMAND)
}

fn resolve_with(program: &str) -> Result<PathBuf, Error> {
    let missing = |reason: String| Error::DependencyMissing {
        command: program.to_string(),
        reason,
    };

    let output = Command::new(program)
        .arg("TEMPLATES")
        .output()
        .map_err(|e| missing(e.to_string()))?;

    if !output.status.success() {
        return Err(missing(output.status.to_string()));
    }

    let dir = String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\n', '\r'])
        .to_string();

    if dir.is_empty() {
        return Err(missing("no directory printed".into()));
    }

    trace!("{program} TEMPLATES -> {dir}");

    Ok(PathBuf::from(dir))
}
