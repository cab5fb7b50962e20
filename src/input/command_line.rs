// Parsing for the command line at startup

use std::path::PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version)]
#[command(about = "Steps through search trees recorded by the engine.")]
pub struct Args {
    /// The search trace DB to open at startup.
    #[arg(short, long)]
    pub db_path: Option<PathBuf>,

    /// How many child moves are shown per row.
    #[arg(short, long, default_value_t = 10)]
    pub columns: usize,

    /// The tracing filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    pub log_filter: String,
}

#[test]
fn check_defaults() {
    let args = Args::parse_from(["tree_viewer"]);

    assert_eq!(args.db_path, None);
    assert_eq!(args.columns, 10);
    assert_eq!(args.log_filter, "warn");
}

#[test]
fn check_db_path() {
    let args = Args::parse_from(["tree_viewer", "--db-path", "trace.db", "-c", "4"]);

    assert_eq!(args.db_path, Some(PathBuf::from("trace.db")));
    assert_eq!(args.columns, 4);
}
