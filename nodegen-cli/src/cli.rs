use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use tracing::debug;

/// Name of the installed binary.
pub const BIN_NAME: &str = "nodegen";

#[derive(Debug, Parser)]
#[command(
    name = "nodegen",
    version,
    about = "Scaffold an Express backend project",
    override_usage = "nodegen <project-directory> [options]"
)]
pub struct Cli {
    /// Directory to create the project in
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Print additional logs
    #[arg(long)]
    pub verbose: bool,

    /// Print environment debug info
    #[arg(long)]
    pub info: bool,
}

impl Cli {
    /// Parse `args` (including the program name), ignoring flags this
    /// command does not declare. Returns the ignored tokens alongside so
    /// they can be logged once tracing is up.
    pub fn parse_lenient<I, T>(args: I) -> (Cli, Vec<String>)
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let stripped = strip_unknown_flags(args);
        (Cli::parse_from(stripped.kept), stripped.ignored)
    }

    pub fn try_parse_lenient<I, T>(args: I) -> Result<(Cli, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let stripped = strip_unknown_flags(args);
        Ok((Cli::try_parse_from(stripped.kept)?, stripped.ignored))
    }
}

/// Command line split into what clap parses and what it never sees.
#[derive(Debug, Default)]
pub struct StrippedArgs {
    pub kept: Vec<OsString>,
    /// Unknown options, each with the value it swallowed, if any.
    pub ignored: Vec<String>,
}

/// Drop every `-x`/`--xyz` token that does not name a declared flag.
///
/// An unknown option written without `=` also takes the next token as its
/// value when that token does not start with `-`, so `--template ts` never
/// turns `ts` into the project directory.
///
/// The first token is the program name and is always kept, as is
/// everything after a bare `--`.
pub fn strip_unknown_flags<I, T>(args: I) -> StrippedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = Cli::command();
    cmd.build();

    let mut longs: Vec<String> = Vec::new();
    let mut shorts: Vec<char> = Vec::new();
    for arg in cmd.get_arguments() {
        if let Some(long) = arg.get_long() {
            longs.push(long.to_string());
        }
        if let Some(short) = arg.get_short() {
            shorts.push(short);
        }
    }

    let mut out = StrippedArgs::default();
    let mut passthrough = false;
    let mut args = args
        .into_iter()
        .map(Into::<OsString>::into)
        .enumerate()
        .peekable();

    while let Some((i, raw)) = args.next() {
        if i == 0 || passthrough {
            out.kept.push(raw);
            continue;
        }

        let Some(token) = raw.to_str() else {
            out.kept.push(raw);
            continue;
        };

        let known = if token == "--" {
            passthrough = true;
            true
        } else if let Some(long) = token.strip_prefix("--") {
            let name = long.split('=').next().unwrap_or(long);
            longs.iter().any(|l| l == name)
        } else if let Some(short) = token.strip_prefix('-') {
            // A lone `-` is a positional value.
            short.is_empty() || short.chars().all(|c| shorts.contains(&c))
        } else {
            true
        };

        if known {
            out.kept.push(raw);
            continue;
        }

        let mut ignored = token.to_string();
        if !token.contains('=') {
            let takes_value = args
                .peek()
                .and_then(|(_, next)| next.to_str())
                .is_some_and(|next| !next.starts_with('-'));
            if takes_value {
                if let Some((_, value)) = args.next() {
                    ignored.push(' ');
                    ignored.push_str(&value.to_string_lossy());
                }
            }
        }
        out.ignored.push(ignored);
    }
    out
}

/// Log the options dropped by [`strip_unknown_flags`].
pub fn log_ignored(ignored: &[String]) {
    for flag in ignored {
        debug!(flag = %flag, "ignoring unknown option");
    }
}
