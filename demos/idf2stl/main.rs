//! Converts an IDF board file to an ASCII STL solid on stdout.
//!
//! Usage:
//! ```text
//! cargo run --example idf2stl -- board.emn > board.stl
//! cargo run --example idf2stl -- board.emn my_board > board.stl
//! ```

use std::io::{self, BufWriter};
use std::process::ExitCode;

use boardsolid::io::{export_stl_with, IdfData, StlOptions};

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for boardsolid.
    // Override with RUST_LOG env var (e.g. RUST_LOG=boardsolid=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("boardsolid=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: idf2stl <board.emn> [solid-name]");
        return ExitCode::FAILURE;
    };
    let options = args
        .next()
        .map_or_else(StlOptions::default, |solid_name| StlOptions { solid_name });

    match run(&path, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("idf2stl: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, options: &StlOptions) -> boardsolid::Result<()> {
    let data = IdfData::from_path(path)?;
    let geometry = data.to_geometry()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    export_stl_with(&geometry, &mut out, options)?;
    Ok(())
}
