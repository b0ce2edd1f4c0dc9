//! Classify command implementation

use super::ModelArgs;
use crate::input::file_reader::STDIN_LABEL;
use crate::input::{resolve_patterns, FileReader, InputText};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use langid_core::{LanguageIdentifier, Prediction};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the classify command
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Input files or patterns (supports glob); `-` or nothing reads stdin
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Classify every line separately
    #[arg(short, long)]
    pub lines: bool,

    /// Print every active language, best first
    #[arg(short, long)]
    pub rank: bool,

    /// Print only the N best languages (implies --rank)
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Restrict to these languages (comma separated)
    #[arg(short = 'L', long, value_name = "LANGS", value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Report raw log-scores instead of probabilities
    #[arg(long)]
    pub raw_scores: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Score the texts of each input on all cores
    #[arg(short, long)]
    pub parallel: bool,
}

/// Where one batch of text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Source::Stdin => STDIN_LABEL.to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        match self {
            Source::Stdin => FileReader::read_stdin(),
            Source::File(path) => FileReader::read_bytes(path),
        }
    }
}

impl ClassifyArgs {
    /// Execute the classify command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        log::debug!("Arguments: {self:?}");

        let (model, config) = self.model.load()?;
        let mut identifier_config = config.identifier.clone();
        if let Some(languages) = &self.languages {
            identifier_config.languages = languages.clone();
        }
        if self.raw_scores {
            identifier_config.norm_probs = false;
        }
        let mut identifier =
            LanguageIdentifier::from_config(model, &identifier_config).context("Failed to configure identifier")?;
        log::info!("Active languages: {}", identifier.active_languages().join(","));

        let format = self.format.unwrap_or(config.output.format);
        let top = self.top.or(config.output.top);
        let rank = self.rank || top.is_some();

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
            )),
            None => Box::new(io::stdout()),
        };
        let mut formatter = create_formatter(format, writer);

        let sources = self.sources()?;
        let mut progress = ProgressReporter::new(quiet);
        progress.init_files(sources.len() as u64);

        for source in &sources {
            let label = source.label();
            let bytes = source.read()?;
            let texts = if self.lines {
                FileReader::split_lines(&label, &bytes)
            } else {
                vec![InputText {
                    source: label.clone(),
                    bytes,
                }]
            };

            let results = self.predict(&mut identifier, &texts, rank, top);
            for (text, predictions) in texts.iter().zip(&results) {
                formatter.write_record(&text.source, predictions)?;
            }
            progress.file_completed(&label);
        }

        progress.finish();
        formatter.finish()
    }

    fn sources(&self) -> Result<Vec<Source>> {
        let (stdin, patterns): (Vec<&String>, Vec<&String>) = self.input.iter().partition(|p| p.as_str() == "-");

        let mut sources = Vec::new();
        if !stdin.is_empty() || patterns.is_empty() {
            sources.push(Source::Stdin);
        }
        if !patterns.is_empty() {
            let patterns: Vec<String> = patterns.into_iter().cloned().collect();
            sources.extend(resolve_patterns(&patterns)?.into_iter().map(Source::File));
        }
        Ok(sources)
    }

    fn predict(
        &self,
        identifier: &mut LanguageIdentifier,
        texts: &[InputText],
        rank: bool,
        top: Option<usize>,
    ) -> Vec<Vec<Prediction>> {
        let truncate = |mut ranking: Vec<Prediction>| {
            if let Some(n) = top {
                ranking.truncate(n);
            }
            ranking
        };

        if self.parallel && texts.len() > 1 {
            let bytes: Vec<&[u8]> = texts.iter().map(|t| t.bytes.as_slice()).collect();
            return if rank {
                identifier.rank_batch(&bytes).into_iter().map(truncate).collect()
            } else {
                identifier
                    .classify_batch(&bytes)
                    .into_iter()
                    .map(|p| vec![p])
                    .collect()
            };
        }

        texts
            .iter()
            .map(|text| {
                if rank {
                    truncate(identifier.rank(&text.bytes))
                } else {
                    vec![identifier.classify(&text.bytes)]
                }
            })
            .collect()
    }
}
