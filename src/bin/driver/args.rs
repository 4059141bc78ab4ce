use clap::Parser;
use std::path::PathBuf;

/// Extension of the emitted stack-machine listing.
const LISTING_EXTENSION: &str = "stk";

#[derive(Parser, Debug)]
#[command(
    name = "sslc",
    version,
    about = "Single-pass compiler for SSL, emitting a symbolic stack-machine listing",
    long_about = None
)]
pub struct Args {
    /// Dump the token stream and stop
    #[arg(long)]
    pub lex: bool,

    /// Print the listing instead of writing it to a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Listing file [default: INPUT with the .stk extension]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Source file
    pub input: PathBuf,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut path = self.input.clone();
            path.set_extension(LISTING_EXTENSION);
            path
        })
    }
}
