use subfmt::{parse_cues, parse_json, Format, Padding};

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use log::{info, LevelFilter};

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Srt,
    Vtt,
    Json,
}

#[derive(ClapParser)]
#[command(about = "Render timed subtitle segments as SRT, WebVTT, JSON or plain text")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the segments will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the subtitles will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "KEY",
        help = "Output format (srt, vtt, json, raw). Inferred from the output file extension if not supplied."
    )]
    format: Option<String>,
    #[arg(
        long,
        value_enum,
        help = "Input format. Inferred from the input file extension if not supplied."
    )]
    from: Option<InputFormat>,
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 0.0,
        help = "Show each subtitle this many seconds earlier."
    )]
    show_before: f64,
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 0.0,
        help = "Keep each subtitle on screen this many seconds longer."
    )]
    show_after: f64,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity.")]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn extension(path: &str) -> Option<&str> {
    Path::new(path).extension().and_then(|ext| ext.to_str())
}

fn output_format(cli: &Cli) -> Result<Format> {
    match &cli.format {
        Some(key) => Format::lookup(key).context("Invalid --format value"),
        None => Ok(extension(&cli.output)
            .and_then(Format::from_extension)
            .unwrap_or(Format::Srt)),
    }
}

fn input_format(cli: &Cli) -> InputFormat {
    cli.from.unwrap_or_else(|| match extension(&cli.input) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
        _ => InputFormat::Srt,
    })
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let format = output_format(&cli)?;
    let padding = Padding::new(cli.show_before, cli.show_after)?;

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let subs = match input_format(&cli) {
        InputFormat::Srt | InputFormat::Vtt => parse_cues(&data),
        InputFormat::Json => parse_json(&data),
    }
    .context(format!("Failed to read segments from '{}'", cli.input))?;
    info!("Loaded {} segments, writing {}", subs.len(), format);

    let rendered = format
        .generate(&subs, padding)
        .context(format!("Failed to render {} output", format))?;

    if cli.output == "-" {
        let mut dst = io::stdout();
        dst.write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
        dst.flush().context("Failed to write to stdout")?;
    } else {
        std::fs::write(&cli.output, rendered)
            .context(format!("Failed to write output file: '{}'", cli.output))?;
    }

    Ok(())
}
