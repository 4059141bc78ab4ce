mod args;
mod driver_error;

use args::Args;
use clap::Parser;
use driver_error::DriverError;
use sslc::*;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

const STDOUT: &str = "<stdout>";

/// Installs a subscriber only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn tokenize(source: &str, args: &Args) -> io::Result<lexer::TokenStream> {
    let stream = lexer::lex(source);
    info!(tokens = stream.tokens.len(), "lexing done");

    if args.lex {
        let mut out = BufWriter::new(io::stdout().lock());
        for token in &stream.tokens {
            match stream.rejection(token) {
                Some(err) => writeln!(out, "{} {:?} ({err})", token.pos, token.kind)?,
                None => writeln!(out, "{} {:?} {}", token.pos, token.kind, token.aux)?,
            }
        }
        out.flush()?;
    }
    Ok(stream)
}

fn emit(listing: &codegen::Listing, args: &Args) -> Result<(), DriverError> {
    if args.stdout {
        let mut out = BufWriter::new(io::stdout().lock());
        write!(out, "{listing}")
            .and_then(|()| out.flush())
            .map_err(DriverError::io(Path::new(STDOUT)))?;
        return Ok(());
    }

    let path = args.output_path();
    let file = File::create(&path).map_err(DriverError::io(&path))?;
    let mut out = BufWriter::new(file);
    write!(out, "{listing}")
        .and_then(|()| out.flush())
        .map_err(DriverError::io(&path))?;
    info!(path = %path.display(), instructions = listing.len(), "listing written");
    Ok(())
}

fn run(args: &Args) -> Result<(), DriverError> {
    let source = fs::read_to_string(&args.input).map_err(DriverError::io(&args.input))?;
    info!(input = %args.input.display(), "compiling");

    let stream = tokenize(&source, args).map_err(DriverError::io(Path::new(STDOUT)))?;
    if args.lex {
        return Ok(());
    }

    let translation = translator::translate(&stream).map_err(DriverError::compile(&args.input))?;
    info!(
        instructions = translation.listing.len(),
        symbols = translation.symbols.len(),
        "translation done"
    );

    emit(&translation.listing, args)
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
