use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use clap::ValueEnum;
use walkdir::WalkDir;

use crate::{error::Error, trace};

/// Document categories understood by the office suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum DocKind {
    Writer,
    Calc,
    Impress,
}

impl DocKind {
    /// The keyword looked for in template file names, also used as the
    /// office command line switch (`--writer`).
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            DocKind::Writer => "writer",
            DocKind::Calc => "calc",
            DocKind::Impress => "impress",
        }
    }

    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            DocKind::Writer => &["odt", "ott", "fodt", "doc", "dot", "docx", "dotx", "rtf"],
            DocKind::Calc => &["ods", "ots", "fods", "xls", "xlt", "xlsx", "xltx", "csv"],
            DocKind::Impress => &["odp", "otp", "fodp", "ppt", "pot", "pptx", "potx"],
        }
    }

    #[must_use]
    pub fn from_keyword(word: &str) -> Option<DocKind> {
        <DocKind as ValueEnum>::from_str(word, false).ok()
    }

    /// Kind implied by a file extension (without the dot), case insensitive.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<DocKind> {
        let ext = ext.to_ascii_lowercase();
        Self::value_variants()
            .iter()
            .copied()
            .find(|k| k.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A file inside the template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub path: PathBuf,
    pub name: String,
}

impl Template {
    /// Extension including the leading dot, or an empty string.
    #[must_use]
    pub fn extension(&self) -> &str {
        extension_of(&self.name)
    }

    /// Kind implied by the file extension.
    #[must_use]
    pub fn kind(&self) -> Option<DocKind> {
        DocKind::from_extension(self.extension().trim_start_matches('.'))
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.kind().is_some()
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Kind(DocKind),
    File(String),
}

impl Selector {
    /// An exact file name among `candidates` wins over a type keyword.
    #[must_use]
    pub fn parse(arg: &str, candidates: &[Template]) -> Selector {
        if candidates.iter().any(|t| t.name == arg) {
            return Selector::File(arg.to_string());
        }

        DocKind::from_keyword(arg)
            .map(Selector::Kind)
            .unwrap_or_else(|| Selector::File(arg.to_string()))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Kind(kind) => fmt::Display::fmt(kind, f),
            Selector::File(name) => f.write_str(name),
        }
    }
}

/// Extension of `name` including the dot. Hidden files like `.odt` have no
/// extension, same as `Path::extension`.
#[must_use]
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => "",
        Some(i) => &name[i..],
    }
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// Dangling symlinks and names that are not valid UTF-8 are skipped.
///
/// # Errors
///
/// Returns an [`Err`] if `dir` is not a directory or can not be read.
pub fn get_templates_in_dir(dir: &Path) -> anyhow::Result<Vec<Template>> {
    ensure!(dir.is_dir(), "Path {} is not a directory", dir.display());

    let mut res = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 && is_symlink(err.path()) => {
                trace!("Skipping unreadable link: {err}");
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", dir.display()))
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            trace!("Skipping non UTF-8 name {}", entry.path().display());
            continue;
        };

        res.push(Template {
            name: name.to_string(),
            path: entry.into_path(),
        });
    }

    Ok(res)
}

fn is_symlink(path: Option<&Path>) -> bool {
    path.and_then(|p| p.symlink_metadata().ok())
        .is_some_and(|m| m.file_type().is_symlink())
}

/// Templates with one of the recognized office extensions. These are the
/// names accepted as an explicit file selector.
///
/// # Errors
///
/// Same as [`get_templates_in_dir`].
pub fn get_candidates(dir: &Path) -> anyhow::Result<Vec<Template>> {
    Ok(get_templates_in_dir(dir)?
        .into_iter()
        .filter(Template::is_recognized)
        .collect())
}

/// Pick exactly one template out of `templates`, which must be in file name
/// order. A keyword picks the first name containing it, a file name must be a
/// recognized candidate.
///
/// # Errors
///
/// [`Error::NoTemplateFound`] when nothing matches.
pub fn select_template<'a>(
    templates: &'a [Template],
    selector: &Selector,
    dir: &Path,
) -> Result<&'a Template, Error> {
    let found = match selector {
        Selector::Kind(kind) => templates.iter().find(|t| t.name.contains(kind.keyword())),
        Selector::File(name) => templates
            .iter()
            .find(|t| &t.name == name && t.is_recognized()),
    };

    found.ok_or_else(|| Error::NoTemplateFound {
        selector: selector.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// File name for the new document. Without a user supplied name the template
/// name is reused, otherwise the template extension is appended unless the
/// name already ends with it.
#[must_use]
pub fn compute_destination_name(selected: &str, user_supplied: Option<&str>) -> String {
    let Some(name) = user_supplied else {
        return selected.to_string();
    };

    let ext = extension_of(selected);

    if name.to_lowercase().ends_with(&ext.to_lowercase()) {
        name.to_string()
    } else {
        format!("{name}{ext}")
    }
}
