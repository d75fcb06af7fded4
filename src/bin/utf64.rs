//! utf64 CLI
//!
//! Encode text into UTF-64 and decode it back.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use utf64::{DecodeConfig, Decoder, Encoder};

#[derive(Parser, Debug)]
#[command(name = "utf64")]
#[command(version)]
#[command(about = "UTF-64 encoding tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode text into UTF-64
    #[command(visible_alias = "e")]
    Encode {
        /// Strings to encode, one result per line (default: whole input)
        #[arg(conflicts_with = "input")]
        texts: Vec<String>,

        /// Input file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode UTF-64 back into text
    #[command(visible_alias = "d")]
    Decode {
        /// Strings to decode, one result per line (default: whole input)
        #[arg(conflicts_with = "input")]
        texts: Vec<String>,

        /// Input file (default: stdin)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Reject encodings the encoder would not produce
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { texts, input, output, verbose } => {
            let texts = collect_texts(texts, input.as_deref())?;
            let mut writer = open_output(output.as_deref())?;
            encode_texts(&texts, &mut writer, verbose)?;
        }
        Commands::Decode { texts, input, output, strict, verbose } => {
            let texts = collect_texts(texts, input.as_deref())?;
            let mut writer = open_output(output.as_deref())?;
            decode_texts(&texts, &mut writer, strict, verbose)?;
        }
    }

    Ok(())
}

/// Arguments if any were given, otherwise the whole input as one text
fn collect_texts(texts: Vec<String>, input: Option<&Path>) -> Result<Vec<String>> {
    if !texts.is_empty() {
        return Ok(texts);
    }
    Ok(vec![read_input(input)?])
}

fn read_input(input: Option<&Path>) -> Result<String> {
    let mut content = if let Some(input_path) = input {
        fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read: {}", input_path.display()))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    // Only the line terminator, newlines inside the text are data
    if content.ends_with("\r\n") {
        content.truncate(content.len() - 2);
    } else if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("Failed to write: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    })
}

fn encode_texts(texts: &[String], writer: &mut dyn Write, verbose: bool) -> Result<()> {
    let encoder = Encoder::new();

    for text in texts {
        encoder.encode_to_writer(text, &mut *writer)?;
        writeln!(writer)?;

        if verbose {
            eprintln!("Encoded: {} chars -> {} symbols", text.chars().count(), utf64::encoded_len(text));
        }
    }

    writer.flush()?;
    Ok(())
}

fn decode_texts(texts: &[String], writer: &mut dyn Write, strict: bool, verbose: bool) -> Result<()> {
    let config = DecodeConfig { canonical_only: strict };
    let decoder = Decoder::new().with_config(config).with_verbose(u8::from(verbose));

    for text in texts {
        let decoded = decoder
            .decode(text)
            .with_context(|| format!("Could not decode '{}'", text))?;
        writeln!(writer, "{}", decoded)?;

        if verbose {
            eprintln!("Decoded: {} symbols -> {} chars", text.chars().count(), decoded.chars().count());
        }
    }

    writer.flush()?;
    Ok(())
}
