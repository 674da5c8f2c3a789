use std::{path::PathBuf, process::ExitCode};

use thiserror::Error;

/// Failures that end a run with their own exit status.
///
/// Anything else (copy failures, unreadable directories) travels as a plain
/// [`anyhow::Error`] and maps to [`Error::OTHER_STATUS`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("this program requires the command `{command}` ({reason})")]
    DependencyMissing { command: String, reason: String },

    #[error("no template found for `{selector}` in folder {}", dir.display())]
    NoTemplateFound { selector: String, dir: PathBuf },

    #[error("failed to open the document with `{program}`: {reason}")]
    LaunchFailed { program: String, reason: String },
}

impl Error {
    pub const OTHER_STATUS: u8 = 4;

    #[must_use]
    pub fn status(&self) -> u8 {
        match self {
            Error::DependencyMissing { .. } => 1,
            Error::NoTemplateFound { .. } => 2,
            Error::LaunchFailed { .. } => 3,
        }
    }

    /// Exit code for any error coming out of a run.
    #[must_use]
    pub fn exit_code(err: &anyhow::Error) -> ExitCode {
        ExitCode::from(
            err.downcast_ref::<Error>()
                .map_or(Self::OTHER_STATUS, Error::status),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::path::PathBuf;

    #[test]
    fn statuses_are_distinct() {
        let missing = Error::DependencyMissing {
            command: "xdg-user-dir".into(),
            reason: "not found".into(),
        };
        let none = Error::NoTemplateFound {
            selector: "calc".into(),
            dir: PathBuf::from("/tmp/Templates"),
        };
        let launch = Error::LaunchFailed {
            program: "libreoffice".into(),
            reason: "exit status: 1".into(),
        };

        assert_eq!(missing.status(), 1);
        assert_eq!(none.status(), 2);
        assert_eq!(launch.status(), 3);
    }

    #[test]
    fn message_names_selector_and_folder() {
        let err = Error::NoTemplateFound {
            selector: "impress".into(),
            dir: PathBuf::from("/home/me/Templates"),
        };

        assert_eq!(
            err.to_string(),
            "no template found for `impress` in folder /home/me/Templates"
        );
    }

    #[test]
    fn context_keeps_status() {
        use anyhow::Context;

        let res: Result<(), Error> = Err(Error::DependencyMissing {
            command: "xdg-user-dir".into(),
            reason: "exit status: 1".into(),
        });
        let err = res.context("Failed to resolve templates").unwrap_err();

        assert_eq!(
            err.downcast_ref::<Error>().map(Error::status),
            Some(1)
        );
    }
}
