//! Create a new office document from a template.
//!
//! A run resolves the templates folder, picks one template by document type or
//! file name, copies it into the working directory and, unless told not to,
//! opens it with the office suite.

use anyhow::{bail, Context};
use std::io::IsTerminal;

pub mod args;
pub mod config;
pub mod error;
pub mod launch;
pub mod log;
pub mod template;

use args::Args;
use config::Workspace;
use template::{Selector, Template};

/// Print the file-name candidates of `workspace`.
///
/// # Errors
///
/// Returns an [`Err`] if the templates folder can not be listed.
pub fn display_candidates(workspace: &Workspace) -> anyhow::Result<()> {
    let candidates = template::get_candidates(workspace.template_dir())?;

    println!(
        "Available templates (def at '{}'):",
        workspace.tilde(workspace.template_dir())
    );

    for t in &candidates {
        println!(
            "    {}\t{}",
            t.name,
            t.kind().map(|k| k.keyword()).unwrap_or_default()
        );
    }

    Ok(())
}

fn prompt_selector(candidates: &[Template]) -> anyhow::Result<Selector> {
    if !std::io::stdin().is_terminal() {
        use clap::{error::ErrorKind, CommandFactory};

        return Err(Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a document type or template name is required when not run from a terminal",
            )
            .into());
    }

    if candidates.is_empty() {
        bail!("No templates to choose from");
    }

    let names: Vec<String> = candidates.iter().map(|t| t.name.clone()).collect();
    let picked = inquire::Select::new("Template:", names)
        .prompt()
        .context("No template picked")?;

    Ok(Selector::File(picked))
}

/// Run one invocation against an already resolved [`Workspace`].
///
/// Returns the path of the created document, or `None` when only listing.
///
/// # Errors
///
/// [`error::Error`] for the failures that have their own exit status, a
/// [`clap::Error`] when no selector is given outside a terminal, any other
/// error for unreadable folders or a failed copy.
pub fn run(args: &Args, workspace: &Workspace) -> anyhow::Result<Option<std::path::PathBuf>> {
    if args.list {
        display_candidates(workspace)?;
        return Ok(None);
    }

    let dir = workspace.template_dir();
    let templates = template::get_templates_in_dir(dir)?;
    let candidates = templates
        .iter()
        .filter(|t| t.is_recognized())
        .cloned()
        .collect::<Vec<_>>();

    let selector = match args.selector.as_deref() {
        Some(arg) => Selector::parse(arg, &candidates),
        None => prompt_selector(&candidates)?,
    };
    trace!("Selector: {selector:?}");

    let selected = template::select_template(&templates, &selector, dir)?;
    trace!("Selected template {}", selected.path.display());

    let destination = workspace.working_dir().join(template::compute_destination_name(
        &selected.name,
        args.name.as_deref(),
    ));

    let kind = match selector {
        Selector::Kind(kind) => Some(kind),
        Selector::File(_) => selected.kind(),
    };

    launch::materialize_and_launch(
        &selected.path,
        destination,
        args.open(),
        kind,
        workspace.office(),
    )
    .map(Some)
}
