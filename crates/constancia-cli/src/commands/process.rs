//! Process command - extract fields from a single confirmation image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use constancia_core::models::config::ConstanciaConfig;
use constancia_core::models::record::{TransactionRecord, CSV_HEADERS};
use constancia_core::pipeline::{BatchObserver, BatchPipeline};
use constancia_core::{InputImage, Preprocessor, VoucherParser};

use crate::tesseract::TesseractRecognizer;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Path to the tesseract binary
    #[arg(long, default_value = "tesseract")]
    tesseract: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Progress bar driven by the pipeline observer.
struct BarObserver {
    bar: ProgressBar,
}

impl BatchObserver for BarObserver {
    fn on_progress(&mut self, percent: f64) {
        self.bar.set_position(percent.round() as u64);
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        ConstanciaConfig::from_file(std::path::Path::new(path))?
    } else {
        ConstanciaConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("Recognizing...");

    let raw = fs::read(&args.input)?;
    let preprocessor = Preprocessor::new().with_grayscale(config.ocr.grayscale);
    let data = preprocessor.apply(&raw)?;

    let display_name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("imagen")
        .to_string();

    let recognizer = TesseractRecognizer::new().with_binary(&args.tesseract);
    let pipeline = BatchPipeline::new(recognizer)
        .with_parser(VoucherParser::from_config(&config.extraction))
        .with_language(&config.ocr.language);

    let images = vec![InputImage::new(data, display_name)];
    let mut observer = BarObserver { bar: pb.clone() };
    let records = pipeline.run(&images, &mut observer).await;

    pb.finish_with_message("Done");

    let record = records
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no record produced"))?;

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &TransactionRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &TransactionRecord) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADERS)?;
    wtr.write_record(record.csv_row())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &TransactionRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Fecha:               {}\n", record.date));
    output.push_str(&format!("Numero de operacion: {}\n", record.operation_number));
    output.push_str(&format!("Monto:               {}\n", record.amount));
    output.push_str(&format!("Cuenta origen:       {}\n", record.origin_account));
    output.push_str(&format!("Cuenta destino:      {}\n", record.destination_account));
    output.push_str(&format!("Destinatario:        {}\n", record.recipient));
    output.push_str(&format!("Descripcion:         {}\n", record.description));

    output
}
