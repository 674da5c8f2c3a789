use std::path::PathBuf;

pub use clap::Parser;

use crate::{config::DEFAULT_OFFICE, launch::Open};

/// Create a new office document from a template and open it
///
/// The template is picked from the user's templates folder either by
/// document type (the first file, by name, containing `writer`, `calc` or
/// `impress`) or by its exact file name.
///
/// Exit codes: 0 success, 1 missing `xdg-user-dir`, 2 no template found,
/// 3 office program failed (with --wait), 4 any other error.
#[derive(Parser, Debug)]
#[clap(version, verbatim_doc_comment)]
pub struct Args {
    /// Document type (writer, calc, impress) or exact template file name.
    /// Asked for interactively when omitted on a terminal
    pub selector: Option<String>,

    /// Name of the new document, the template extension is added if missing
    pub name: Option<String>,

    /// Don't open the file after creating it
    #[clap(long, short)]
    pub do_not_open: bool,

    /// Wait for the office program and fail if it fails
    #[clap(long, conflicts_with = "do_not_open")]
    pub wait: bool,

    /// List the templates that can be selected by file name
    #[clap(long, short, conflicts_with_all = ["selector", "name", "do_not_open", "wait"])]
    pub list: bool,

    /// Templates folder [default: `xdg-user-dir TEMPLATES`]
    #[clap(long, env = "NEWDOC_TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Office program used to open the new document
    #[clap(long, env = "NEWDOC_OFFICE", default_value = DEFAULT_OFFICE)]
    pub office: String,
}

impl Args {
    #[must_use]
    pub fn open(&self) -> Open {
        match (self.do_not_open, self.wait) {
            (true, _) => Open::No,
            (false, true) => Open::Wait,
            (false, false) => Open::Detached,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("newdoc").chain(args.iter().copied()))
    }

    #[test]
    fn positional_and_flags() {
        let args = parse(&["calc", "My fancy spreadsheet", "-d"]).unwrap();

        assert_eq!(args.selector.as_deref(), Some("calc"));
        assert_eq!(args.name.as_deref(), Some("My fancy spreadsheet"));
        assert_eq!(args.open(), Open::No);
    }

    #[test]
    fn opens_detached_by_default() {
        let args = parse(&["writer"]).unwrap();

        assert_eq!(args.name, None);
        assert_eq!(args.open(), Open::Detached);
        assert!(parse(&["writer", "--wait"]).unwrap().open() == Open::Wait);
    }

    #[test]
    fn list_needs_no_selector() {
        assert!(parse(&["--list"]).unwrap().list);
        assert_eq!(parse(&[]).unwrap().selector, None);
        assert!(parse(&["-l", "writer", "Report"]).is_err());
        assert!(parse(&["-l", "writer"]).is_err());
        assert!(parse(&["-d", "--wait", "writer"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
