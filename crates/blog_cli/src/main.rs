//! Demo entry point.
//!
//! Seeds the default database file with sample blog data and prints the
//! users and one author's posts. Any failure ends the process with a
//! non-zero status and the underlying error message.

use blog_core::{close_db, init_logging, open_db_with_config, run_demo, BlogConfig};
use log::{error, info};
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = BlogConfig::default();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("blog_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &BlogConfig) -> Result<(), Box<dyn Error>> {
    let log_dir = config.resolved_log_dir()?;
    init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    info!(
        "event=cli_run module=cli status=start version={}",
        blog_core::core_version()
    );

    let conn = open_db_with_config(config)?;
    run_demo(&conn, &mut io::stdout().lock())?;
    close_db(conn)?;

    info!("event=cli_run module=cli status=ok");
    Ok(())
}
