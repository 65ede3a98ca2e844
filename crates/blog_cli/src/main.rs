//! Command-line client for the blog read path.
//!
//! Opens a content database, routes one request through the view layer and
//! prints the response as JSON.

use blog_core::db::open_db;
use blog_core::{
    core_version, default_log_level, handle, init_logging, ContentQueryService, Request,
    SqliteContentRepository,
};
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "blog_cli")]
#[command(about = "Query published blog content the way the site would render it")]
#[command(version = core_version())]
struct Cli {
    /// SQLite content database (created and migrated when missing)
    #[arg(long, default_value = "blog.sqlite3", global = true)]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a site path and print the response
    Render {
        /// Request target, e.g. `/`, `/tag/rust/?page=2`, `/search/?search=rust`
        path: String,

        /// Value of the `page` query parameter (overrides the target's)
        #[arg(long)]
        page: Option<String>,

        /// Value of the `search` query parameter (overrides the target's)
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the core library version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Version => {
            println!("blog_core version={}", core_version());
            Ok(())
        }
        Command::Render { path, page, search } => {
            let mut request = Request::from_target(path);
            if let Some(page) = page {
                request = request.with_param("page", page.as_str());
            }
            if let Some(search) = search {
                request = request.with_param("search", search.as_str());
            }

            let conn = open_db(&cli.db)?;
            let service = ContentQueryService::new(SqliteContentRepository::try_new(&conn)?);
            let response = handle(&service, &request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}
