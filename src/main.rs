use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use zeroize::Zeroizing;

use sharewise::cli::{Cli, Commands};
use sharewise::commands::{SplitOutcome, combine_image, combine_text, split_image, split_text};
use sharewise::pixels::{Dimensions, PixelBuffer};

/// Read a text secret securely from stdin (hidden input when TTY available)
fn read_secret() -> Result<Zeroizing<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter secret text:");
        rpassword::read_password()
            .map(Zeroizing::new)
            .context("Failed to read secret from stdin")
    } else {
        // Non-interactive mode (piped input) - first line only, line ending stripped
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        let mut secret = Zeroizing::new(String::new());
        handle
            .read_line(&mut secret)
            .context("Failed to read secret from stdin")?;
        let trimmed_len = secret.trim_end_matches(['\r', '\n']).len();
        secret.truncate(trimmed_len);
        Ok(secret)
    }
}

/// Read a share document from a file, or from stdin when no path is given
fn read_document(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read share file {}", path.display())),
        None => {
            let mut document = String::new();
            io::stdin()
                .read_to_string(&mut document)
                .context("Failed to read shares from stdin")?;
            Ok(document)
        }
    }
}

fn write_outcome(outcome: &SplitOutcome, output: Option<&Path>, json: bool) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, &outcome.document)
                .with_context(|| format!("Failed to write share file {}", path.display()))?;
            eprintln!(
                "Shares for {} units saved to {}",
                outcome.summary.units,
                path.display()
            );
        }
        None => io::stdout()
            .write_all(outcome.document.as_bytes())
            .context("Failed to write shares to stdout")?,
    }

    if json {
        let summary =
            serde_json::to_string(&outcome.summary).context("Failed to serialize summary")?;
        eprintln!("{summary}");
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::SplitText {
            scheme,
            output,
            json,
        } => {
            let scheme = scheme.params(cli.modulus).scheme()?;
            let secret = read_secret()?;

            let outcome = split_text(&secret, &scheme)?;
            write_outcome(&outcome, output.as_deref(), json)?;
        }
        Commands::CombineText {
            scheme,
            input,
            participants,
        } => {
            let scheme = scheme.params(cli.modulus).scheme()?;
            let document = read_document(input.as_deref())?;

            let secret = combine_text(&document, &scheme, &participants)?;
            println!("{}", secret.as_str());
        }
        Commands::SplitImage {
            scheme,
            width,
            height,
            layout,
            input,
            output,
            json,
        } => {
            let scheme = scheme.params(cli.modulus).scheme()?;
            let data = fs::read(&input)
                .with_context(|| format!("Failed to read pixel file {}", input.display()))?;
            let image = PixelBuffer::new(Dimensions::new(width, height), layout.into(), data)
                .context("Pixel file does not match the given dimensions and layout")?;

            let outcome = split_image(&image, &scheme)?;
            write_outcome(&outcome, output.as_deref(), json)?;
        }
        Commands::CombineImage {
            scheme,
            input,
            output,
            participants,
        } => {
            let scheme = scheme.params(cli.modulus).scheme()?;
            let document = read_document(input.as_deref())?;

            let image = combine_image(&document, &scheme, &participants)?;
            let Dimensions { width, height } = image.dimensions();
            fs::write(&output, image.data())
                .with_context(|| format!("Failed to write pixel file {}", output.display()))?;
            eprintln!("{width}x{height} grayscale RGBA image saved to {}", output.display());
        }
    }

    Ok(())
}
