use std::process::ExitCode;

use console::style;
use css_directives_cli::{command, run, Options};

fn main() -> ExitCode {
    let matches = command().get_matches();
    let options = Options::from_matches(&matches);

    tracing_subscriber::fmt()
        .with_max_level(options.log_level())
        .with_writer(std::io::stderr)
        .init();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").for_stderr().red().bold());
            ExitCode::FAILURE
        }
    }
}
