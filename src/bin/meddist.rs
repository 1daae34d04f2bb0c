#[path = "meddist/app.rs"]
mod app;
#[path = "meddist/cli.rs"]
mod cli;
#[path = "meddist/render.rs"]
mod render;

use std::error::Error as StdError;

use meddist::error::Error;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse_args();
    match app::run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            std::process::ExitCode::from(1)
        }
    }
}

fn report_error(err: &Error) {
    eprintln!("Error: {err}");
    if let Error::Validation(errors) = err {
        render::validation(errors);
        return;
    }
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
