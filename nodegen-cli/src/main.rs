use nodegen_cli::cli::{log_ignored, Cli};
use nodegen_cli::commands::install::Installer;
use nodegen_cli::error::ScaffoldError;
use nodegen_cli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let (cli, ignored) = Cli::parse_lenient(std::env::args_os());
    logging::init_tracing(cli.verbose);
    log_ignored(&ignored);

    let result = match std::env::current_dir() {
        Ok(cwd) => nodegen_cli::run(&cli, &cwd, &Installer::npm()).await,
        Err(e) => Err(ScaffoldError::filesystem(".", e)),
    };

    if let Err(e) = result {
        // The usage message has already been printed.
        if !matches!(e, ScaffoldError::Usage(_)) {
            eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        }
        std::process::exit(1);
    }
}
