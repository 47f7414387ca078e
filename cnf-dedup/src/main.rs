use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use flussab::DeferredWriter;
use log::info;
use thiserror::Error;

use cnf_dedup::{cnf, deduplicate, ParseError};

/// Removes duplicate clauses from a DIMACS CNF file and prints the result.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Input file with CNF in DIMACS format.
    #[arg(value_name = "CNF", allow_hyphen_values = true)]
    path_cnf: PathBuf,
}

#[derive(Error, Debug)]
enum Error {
    #[error("could not open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("IO error during writing: {}", .0)]
    Output(#[source] io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    if let Err(err) = main_err(&args) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn main_err(args: &Cli) -> Result<(), Error> {
    let file = File::open(&args.path_cnf).map_err(|source| Error::Open {
        path: args.path_cnf.clone(),
        source,
    })?;

    let cnf_reader = cnf::Parser::<i64>::from_read(file, cnf::Config::default());
    let deduplicated = deduplicate(cnf_reader)?;

    info!(
        "{}: {} clauses read, {} distinct",
        args.path_cnf.display(),
        deduplicated.clauses_read,
        deduplicated.header.clause_count
    );
    if deduplicated.dropped_lits != 0 {
        info!(
            "{}: discarded {} literal(s) after the last terminating zero",
            args.path_cnf.display(),
            deduplicated.dropped_lits
        );
    }

    let stdout = io::stdout();
    let mut cnf_writer = DeferredWriter::from_write(stdout.lock());

    deduplicated.write(&mut cnf_writer);

    cnf_writer.flush().map_err(Error::Output)?;
    Ok(())
}
