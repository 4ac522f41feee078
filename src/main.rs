//! markliff - Markdown/HTML ⇄ XLIFF 2.1 converter

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use markliff::Converter;

#[derive(Parser)]
#[command(name = "markliff")]
#[command(version, about = "Convert between Markdown/HTML and XLIFF 2.1", long_about = None)]
#[command(after_help = "EXAMPLES:
    markliff md2xliff doc.md doc.xlf --source-lang en --target-lang de
    markliff html2xliff page.html page.xlf
    markliff xliff2md doc.xlf doc.md
    markliff xliff2html page.xlf page.html")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress output messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a Markdown file to XLIFF
    Md2xliff {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "en")]
        source_lang: String,
        #[arg(long, default_value = "es")]
        target_lang: String,
    },
    /// Convert an HTML file to XLIFF
    Html2xliff {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "en")]
        source_lang: String,
        #[arg(long, default_value = "es")]
        target_lang: String,
    },
    /// Convert an XLIFF file back to Markdown
    Xliff2md { input: PathBuf, output: PathBuf },
    /// Convert an XLIFF file back to HTML
    Xliff2html { input: PathBuf, output: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let converter = Converter::new();
    let (input, output, result) = match &cli.command {
        Command::Md2xliff {
            input,
            output,
            source_lang,
            target_lang,
        } => {
            let content = read_input(input)?;
            (
                input,
                output,
                converter.markdown_to_xliff(&content, source_lang, target_lang),
            )
        }
        Command::Html2xliff {
            input,
            output,
            source_lang,
            target_lang,
        } => {
            let content = read_input(input)?;
            (
                input,
                output,
                converter.html_to_xliff(&content, source_lang, target_lang),
            )
        }
        Command::Xliff2md { input, output } => {
            let content = read_input(input)?;
            (input, output, converter.xliff_to_markdown(&content))
        }
        Command::Xliff2html { input, output } => {
            let content = read_input(input)?;
            (input, output, converter.xliff_to_html(&content))
        }
    };

    // Write only after the conversion succeeded, so a failure leaves no
    // half-written output file.
    let converted = result.map_err(|e| e.to_string())?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    std::fs::write(output, converted).map_err(|e| e.to_string())?;

    if !cli.quiet {
        println!("{} -> {}", input.display(), output.display());
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String, String> {
    if !path.is_file() {
        return Err(format!("input file not found: {}", path.display()));
    }
    std::fs::read_to_string(path).map_err(|e| e.to_string())
}
