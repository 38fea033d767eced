//! Command implementations for the `nodegen` CLI.
//!
//! A run either reports the environment or creates a project and installs
//! its dependencies.

/// Environment diagnostics — `nodegen --info`.
///
/// Reports OS, CPU, Node/npm/Yarn, installed browsers, and whether
/// `express` and the global `DuyDangCode_NodeJs` package are present.
pub mod info;

/// Dependency installation.
///
/// Runs `npm install --save <deps>` inside the new project with inherited
/// standard streams.
pub mod install;

/// Project scaffolding — `nodegen <project-directory>`.
///
/// Resolves the project root, creates the `src/v1/*` layout, and writes the
/// Express boilerplate and `package.json`.
pub mod new_project;

/// Boilerplate table, generated directory list, and `package.json` model.
pub mod templates;
