// fsaspell-build: Compile word lists into a binary dictionary.
//
// Writes `<output>.dict` and the matching `<output>.info` metadata file.
//
// Usage:
//   fsaspell-build -o en.dict [OPTIONS] WORDLIST...

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use fsaspell::{DictionaryBuilder, DictionaryMetadata, Encoding};
use log::info;

/// Compile word lists into a binary dictionary.
#[derive(Parser, Debug)]
#[command(name = "fsaspell-build")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct BuildArgs {
    /// Word-list files, one entry per line
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output dictionary; the metadata goes next to it as .info
    #[arg(short, long)]
    output: PathBuf,

    /// Encoding of the word lists (utf-8 or iso-8859-1)
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,

    /// Separator character recorded in the metadata
    #[arg(long, default_value_t = '+')]
    separator: char,

    /// Match words exactly instead of folding case
    #[arg(long)]
    no_convert_case: bool,

    /// Do not suggest splitting run-on words
    #[arg(long)]
    no_runon_words: bool,

    /// Largest edit distance used against this dictionary
    #[arg(long)]
    max_distance: Option<usize>,

    /// Locale recorded in the metadata, e.g. en_US
    #[arg(long)]
    locale: Option<String>,

    /// Increase log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl BuildArgs {
    fn metadata(&self) -> anyhow::Result<DictionaryMetadata> {
        let encoding = Encoding::parse(&self.encoding)?;
        let mut metadata = DictionaryMetadata::new(encoding);
        metadata.separator = self.separator;
        metadata.converts_case = !self.no_convert_case;
        metadata.runon_words = !self.no_runon_words;
        metadata.max_distance = match self.max_distance {
            Some(0) => bail!("--max-distance must be positive"),
            other => other,
        };
        metadata.locale = self.locale.clone();
        Ok(metadata)
    }
}

fn run(args: &BuildArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let metadata = args.metadata()?;
    let name = args.output.display().to_string();
    let Some(dictionary) = DictionaryBuilder::new()
        .build_files(&name, &args.inputs, metadata)
        .context("failed to build dictionary")?
    else {
        bail!("the word lists contain no words");
    };
    dictionary
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("finished in {:?}", start.elapsed());
    println!(
        "{}: {} words, {} arcs, {} bytes",
        args.output.display(),
        dictionary.words().count(),
        dictionary.fsa().arc_count(),
        dictionary.fsa().byte_size()
    );
    Ok(())
}

fn main() {
    let args = BuildArgs::parse();
    fsaspell_cli::init_logging(args.verbose, false);
    if let Err(e) = run(&args) {
        fsaspell_cli::fatal(&format!("{e:#}"));
    }
}
