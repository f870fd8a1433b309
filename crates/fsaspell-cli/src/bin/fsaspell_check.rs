// fsaspell-check: Check words and print spelling suggestions.
//
// Words come from the command line, or from stdin (one per line) when none
// are given. Correct words are printed as-is, misspelled ones with their
// suggestions.
//
// Usage:
//   fsaspell-check [-d DIR]... (--config FILE | --dict PATH) [OPTIONS] [WORD...]

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use fsaspell::{CheckOutcome, DictionaryCaches, DictionaryConfig, SpellerSetup, SuggestionPipeline};

/// Check words against fsaspell dictionaries.
#[derive(Parser, Debug)]
#[command(name = "fsaspell-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct CheckArgs {
    /// Words to check; read from stdin when omitted
    words: Vec<String>,

    /// Directory to resolve dictionary paths against (repeatable)
    #[arg(short = 'd', long = "dict-path")]
    dict_paths: Vec<PathBuf>,

    /// JSON speller configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Binary dictionary, relative to a dictionary directory
    #[arg(long)]
    dict: Option<String>,

    /// Extra word list merged into the speller (repeatable)
    #[arg(short = 'l', long = "list")]
    lists: Vec<String>,

    /// Extra accepted word (repeatable)
    #[arg(short = 'w', long = "word")]
    user_words: Vec<String>,

    /// Wrong-word list providing preferred corrections
    #[arg(long)]
    wrong_words: Option<String>,

    /// Maximum number of suggestions (0 for no limit)
    #[arg(short = 'n', long)]
    max_suggestions: Option<usize>,

    /// Increase log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl CheckArgs {
    /// The configuration file, if any, with command-line overrides applied.
    fn speller_config(&self) -> anyhow::Result<DictionaryConfig> {
        let mut config = match &self.config {
            Some(path) => fsaspell_cli::load_config(path)?,
            None => DictionaryConfig::default(),
        };
        if let Some(dict) = &self.dict {
            config.binary_dictionary = dict.clone();
        }
        if config.binary_dictionary.is_empty() {
            bail!("no dictionary given, use --dict or --config");
        }
        config.plain_text_lists.extend(self.lists.iter().cloned());
        config.user_words.extend(self.user_words.iter().cloned());
        if self.wrong_words.is_some() {
            config.wrong_words = self.wrong_words.clone();
        }
        if let Some(max) = self.max_suggestions {
            config.suggestions.max_suggestions = max;
        }
        Ok(config)
    }
}

fn report(word: &str, speller: &SuggestionPipeline, out: &mut impl Write) -> io::Result<()> {
    match speller.check(word) {
        CheckOutcome::Skipped => Ok(()),
        CheckOutcome::Correct => writeln!(out, "{word} (correct)"),
        CheckOutcome::Misspelled { suggestions, .. } if suggestions.is_empty() => {
            writeln!(out, "{word}: (no suggestions)")
        }
        CheckOutcome::Misspelled {
            suggestions,
            truncated,
        } => {
            writeln!(out, "{word}:")?;
            for s in &suggestions {
                writeln!(out, "  {s}")?;
            }
            if truncated {
                writeln!(out, "  ...")?;
            }
            Ok(())
        }
    }
}

fn run(args: &CheckArgs) -> anyhow::Result<()> {
    let config = args.speller_config()?;
    let locator = fsaspell_cli::locator(&args.dict_paths);
    let caches = DictionaryCaches::new();
    let speller =
        SpellerSetup::load(&config, &locator, &caches).context("failed to set up speller")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.words.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            report(line.trim(), &speller, &mut out)?;
        }
    } else {
        for word in &args.words {
            report(word, &speller, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args = CheckArgs::parse();
    fsaspell_cli::init_logging(args.verbose, args.quiet);
    if let Err(e) = run(&args) {
        fsaspell_cli::fatal(&format!("{e:#}"));
    }
}
