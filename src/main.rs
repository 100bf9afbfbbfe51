use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lessonmark::{Config, Error};

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    /// Rendered PDF document
    Pdf,
    /// Typst markup
    Typst,
    /// Parsed block tree as JSON
    Json,
    /// Normalized lesson markup
    Markup,
}

#[derive(Parser)]
#[command(name = "lessonmark")]
#[command(about = "Render lesson markup to PDF, Typst or a JSON block tree")]
struct Cli {
    /// Input lesson file
    input: PathBuf,

    /// Output file (PDF defaults to input name with .pdf extension, other formats to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// What to produce
    #[arg(short, long, value_enum, default_value = "pdf")]
    emit: Emit,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let markup = fs::read_to_string(&cli.input)?;
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::compiled_default(),
    };

    match render(&markup, &config, cli.emit)? {
        Rendered::Pdf(bytes) => {
            let output = cli
                .output
                .clone()
                .unwrap_or_else(|| cli.input.with_extension("pdf"));
            fs::write(&output, bytes)?;
            log::info!("Created {}", output.display());
        }
        Rendered::Text(text) => match &cli.output {
            Some(output) => {
                fs::write(output, text)?;
                log::info!("Created {}", output.display());
            }
            None => print!("{text}"),
        },
    }
    Ok(())
}

/// Output of one emit mode; only PDF is binary.
#[derive(Debug)]
enum Rendered {
    Pdf(Vec<u8>),
    Text(String),
}

fn render(markup: &str, config: &Config, emit: Emit) -> Result<Rendered, Error> {
    Ok(match emit {
        Emit::Pdf => Rendered::Pdf(lessonmark::markup_to_pdf_with_config(markup, config)?),
        Emit::Typst => Rendered::Text(lessonmark::markup_to_typst_with_config(markup, config)),
        Emit::Json => Rendered::Text(lessonmark::markup_to_json(markup)?),
        Emit::Markup => Rendered::Text(lessonmark::to_markup(&lessonmark::parse(markup))),
    })
}
