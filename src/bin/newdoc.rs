use anyhow::Result;
use clap::Parser;
use newdoc::{args::Args, config::Workspace, error, error::Error, trace};
use std::process::ExitCode;

fn app(args: &Args) -> Result<()> {
    let workspace = Workspace::resolve(args.template_dir.clone(), &args.office)?;

    trace!("Template dir: {}", workspace.template_dir().display());
    trace!("Working dir: {}", workspace.working_dir().display());

    newdoc::run(args, &workspace).map(drop)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(usage) = e.downcast_ref::<clap::Error>() {
                usage.exit()
            }

            error!("{e:#}");
            Error::exit_code(&e)
        }
    }
}
