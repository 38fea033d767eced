//! # nodegen-cli
//!
//! Command-line tool for scaffolding Express backend projects.
//!
//! This crate provides the `nodegen` binary:
//!
//! | Invocation | Description |
//! |------------|-------------|
//! | `nodegen <project-directory>` | Create the project and install `express` |
//! | `nodegen <project-directory> --verbose` | Same, with debug logging |
//! | `nodegen --info` | Print an environment report, create nothing |
//!
//! ## Architecture
//!
//! - [`cli`] — argument model and unknown-flag filtering
//! - [`commands::new_project`] — directory layout and file generation
//! - [`commands::install`] — package manager invocation
//! - [`commands::info`] — environment report
//! - [`commands::templates`] — boilerplate contents and `package.json` model
//! - [`error`] — error taxonomy shared by all commands

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

use std::path::Path;

use colored::Colorize;

use cli::Cli;
use commands::info::EnvReport;
use commands::install::Installer;
use commands::{new_project, templates};
use error::ScaffoldError;

/// Run the mode selected by `cli`, resolving paths against `cwd`.
///
/// `--info` wins over a project name. Without either, prints the
/// missing-name message and fails with [`ScaffoldError::Usage`] before
/// touching the filesystem.
pub async fn run(cli: &Cli, cwd: &Path, installer: &Installer) -> Result<(), ScaffoldError> {
    if cli.info {
        let report = EnvReport::collect(cwd).await;
        println!("{report}");
        return Ok(());
    }

    let Some(name) = cli.project_directory.as_deref() else {
        println!("{} {}", "Err: ".red(), "please enter a project name!!!");
        return Err(ScaffoldError::Usage("please enter a project name".into()));
    };

    println!("Creating project: {}", name.green());
    tracing::debug!(verbose = cli.verbose, "options parsed");

    let spec = new_project::materialize(name, cwd)?;
    installer
        .install(&spec.resolved_root, templates::DEPENDENCIES)
        .await?;

    println!("{} {}", "Success: ".green(), "Install packages");
    Ok(())
}
