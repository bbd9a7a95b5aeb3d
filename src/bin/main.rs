#[macro_use]
extern crate log;

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use atlas_match::prelude::*;
use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr, bail};
use serde::Serialize;

/// atlas - rank map names against partial or noisy queries
///
/// Every query is run, in order, through one searcher, so repeated and
/// incremental queries hit its cache.
#[derive(Parser, Debug)]
#[command(name = "atlas", args_override_self = true, verbatim_doc_comment, version, about)]
struct Cli {
    /// JSON catalog: an array of {"name", "tier", "type"} records
    ///
    /// When omitted, names are read from stdin, one per line
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Print one JSON object per query instead of text
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    options: SearchOptions,

    /// Queries to search for
    #[arg(required = true)]
    queries: Vec<String>,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    results: &'a [SearchResult],
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    if let Err(err) = color_eyre::install() {
        warn!("could not install error report handler: {err}");
    }

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if is_broken_pipe(&err) {
                std::process::exit(0)
            }
            eprintln!("{err:?}");
            std::process::exit(2)
        }
    }
}

/// Whether `err` comes from writing to a closed pipe, directly or through the
/// JSON serializer.
fn is_broken_pipe(err: &Report) -> bool {
    let kind = err
        .downcast_ref::<io::Error>()
        .map(io::Error::kind)
        .or_else(|| err.downcast_ref::<serde_json::Error>().and_then(serde_json::Error::io_error_kind));
    kind == Some(io::ErrorKind::BrokenPipe)
}

fn parse_args() -> Cli {
    let mut args: Vec<String> = env::args().take(1).collect();
    args.extend(
        env::var("ATLAS_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    Cli::parse_from(args)
}

fn read_catalog(cli: &Cli) -> Result<Catalog> {
    if let Some(path) = &cli.catalog {
        return Ok(Catalog::load(path)?);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("no --catalog given and nothing piped on stdin");
    }
    let lines = stdin
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("could not read names from stdin")?;
    Ok(Catalog::from_names(lines.into_iter().filter(|line| !line.trim().is_empty()))?)
}

fn real_main() -> Result<i32> {
    let cli = parse_args();
    let catalog = read_catalog(&cli)?;
    debug!("loaded {} catalog entries", catalog.len());

    let searcher = Searcher::new(catalog, cli.options.clone());
    let mut stdout = io::stdout().lock();
    let mut num_matched = 0;

    for query in &cli.queries {
        let results = searcher.search(query);
        num_matched += results.len();

        if cli.json {
            serde_json::to_writer(&mut stdout, &QueryOutput { query, results: &results })?;
            writeln!(stdout)?;
        } else {
            writeln!(stdout, "> {query}")?;
            for result in &results {
                writeln!(
                    stdout,
                    "{:8.1}  {:<4}  {}  {}",
                    result.score(),
                    result.tier(),
                    result.highlighted(),
                    result.detail.method
                )?;
            }
        }
    }

    stdout.flush()?;
    debug!("cached queries, least recent first: {:?}", searcher.cache().queries());
    Ok(if num_matched == 0 { 1 } else { 0 })
}
