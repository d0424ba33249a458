use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use twokenize::{align, format_segments, PatternCatalog, Tokenizer, TokenizerConfig};

#[derive(Parser, Debug)]
#[command(name = "twokenize")]
#[command(about = "Tokenizer and sentence segmenter for Twitter-style text")]
#[command(version)]
struct Args {
    /// Raw text file, one message per line (segmentation mode)
    #[arg(requires = "tokenized")]
    raw: Option<PathBuf>,

    /// Tokenized rendering of the same messages, line-aligned with RAW
    #[arg(requires = "raw")]
    tokenized: Option<PathBuf>,

    /// Split clitic contractions ("you're" -> "you 're") as a final pass
    #[arg(long)]
    split_contractions: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so tokens and segments on stdout stay clean.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "parsed CLI arguments");

    match (&args.raw, &args.tokenized) {
        (Some(raw), Some(tokenized)) => run_segmenter_mode(raw, tokenized).await,
        (None, None) => run_tokenizer_mode(args.split_contractions).await,
        _ => anyhow::bail!("expected either no file arguments or exactly two"),
    }
}

/// Tokenize tweet texts from stdin onto stdout, one space-joined run of
/// tokens per input line.
async fn run_tokenizer_mode(split_contractions: bool) -> Result<()> {
    let tokenizer = Tokenizer::with_config(TokenizerConfig { split_contractions })?;
    info!("tokenizing from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut line_count = 0u64;
    while let Some(line) = lines.next_line().await? {
        let tokens = tokenizer
            .tokenize_raw_tweet(&line)
            .with_context(|| format!("tokenizing input line {}", line_count + 1))?;
        stdout.write_all(tokens.join(" ").as_bytes()).await?;
        line_count += 1;
    }
    // Reference behavior: a single newline after the whole stream, not one
    // per line.
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    info!(line_count, "tokenization complete");
    Ok(())
}

/// Align a raw-text file against its tokenized rendering, line by line in
/// lockstep, printing one tagged block per line pair.
async fn run_segmenter_mode(raw_path: &PathBuf, tokenized_path: &PathBuf) -> Result<()> {
    let patterns = PatternCatalog::new()?;
    info!(
        raw = %raw_path.display(),
        tokenized = %tokenized_path.display(),
        "segmenting file pair"
    );

    let raw_file = File::open(raw_path)
        .await
        .with_context(|| format!("opening raw file {}", raw_path.display()))?;
    let tokenized_file = File::open(tokenized_path)
        .await
        .with_context(|| format!("opening tokenized file {}", tokenized_path.display()))?;
    let mut raw_lines = BufReader::new(raw_file).lines();
    let mut tokenized_lines = BufReader::new(tokenized_file).lines();

    let mut stdout = tokio::io::stdout();
    let mut pair_count = 0u64;
    loop {
        let (Some(raw_line), Some(tokenized_line)) = (
            raw_lines.next_line().await?,
            tokenized_lines.next_line().await?,
        ) else {
            break;
        };
        let segments = align(&patterns, &raw_line, &tokenized_line)
            .with_context(|| format!("aligning line pair {}", pair_count + 1))?;
        stdout
            .write_all(format_segments(&segments).as_bytes())
            .await?;
        stdout.write_all(b"\n").await?;
        pair_count += 1;
    }
    stdout.flush().await?;

    info!(pair_count, "segmentation complete");
    Ok(())
}
