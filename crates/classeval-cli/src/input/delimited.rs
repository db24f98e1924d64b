//! Observed/predicted pairs from delimited text files.

use clap::ValueEnum;
use classeval_core::Sample;
use std::io::Read;
use tracing::debug;

use super::file;

/// Field separator of a delimited input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Delimiter {
    Comma,
    Tab,
    /// Any run of whitespace (spaces and tabs mixed) separates fields.
    Space,
    Semicolon,
    Pipe,
}

impl Delimiter {
    fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Space => b' ',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DelimitedOptions {
    pub delimiter: Delimiter,
    /// 1-based column holding the 0/1 outcome.
    pub observed_column: usize,
    /// 1-based column holding the predicted probability.
    pub predicted_column: usize,
    pub has_header: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        DelimitedOptions {
            delimiter: Delimiter::Comma,
            observed_column: 1,
            predicted_column: 2,
            has_header: false,
        }
    }
}

pub fn read_samples(
    path: &str,
    options: &DelimitedOptions,
) -> Result<Vec<Sample>, Box<dyn std::error::Error>> {
    let (canonical, contents) = file::read_text(path)?;
    parse_samples(contents.as_bytes(), options)
        .map_err(|e| format!("{}: {}", canonical.display(), e).into())
}

/// Collapse every whitespace run on a line to one space.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse samples from any reader. Blank lines and rows with too few
/// columns are skipped; unparseable values are an error naming the line.
pub fn parse_samples<R: Read>(
    mut reader: R,
    options: &DelimitedOptions,
) -> Result<Vec<Sample>, Box<dyn std::error::Error>> {
    if options.observed_column == 0 || options.predicted_column == 0 {
        return Err("Column numbers are 1-based".into());
    }
    let observed_idx = options.observed_column - 1;
    let predicted_idx = options.predicted_column - 1;
    let needed = observed_idx.max(predicted_idx) + 1;

    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if options.delimiter == Delimiter::Space {
        text = normalize_whitespace(&text);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .has_headers(options.has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().collect();

        if fields.len() < needed || fields.iter().all(|f| f.is_empty()) {
            skipped += 1;
            continue;
        }

        let observed: u8 = fields[observed_idx].parse().map_err(|_| {
            format!(
                "line {}: observed value '{}' is not 0 or 1",
                line, fields[observed_idx]
            )
        })?;
        let predicted: f64 = fields[predicted_idx].parse().map_err(|_| {
            format!(
                "line {}: predicted value '{}' is not a number",
                line, fields[predicted_idx]
            )
        })?;
        samples.push(Sample::new(observed, predicted));
    }

    debug!(rows = samples.len(), skipped, "delimited input parsed");
    Ok(samples)
}
