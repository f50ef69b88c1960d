//! Batch processing command for multiple confirmation images.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use constancia_core::models::config::ConstanciaConfig;
use constancia_core::models::record::{TransactionRecord, CSV_HEADERS};
use constancia_core::pipeline::{BatchObserver, BatchPipeline};
use constancia_core::{InputImage, Preprocessor, VoucherParser, UNREADABLE};

use crate::tesseract::TesseractRecognizer;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output CSV path
    #[arg(short, long, default_value = "resultados.csv")]
    output: PathBuf,

    /// Path to the tesseract binary
    #[arg(long, default_value = "tesseract")]
    tesseract: String,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let config = if let Some(path) = config_path {
        ConstanciaConfig::from_file(Path::new(path))?
    } else {
        ConstanciaConfig::default()
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "webp" | "tiff" | "bmp"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} images to process",
        style("ℹ").blue(),
        files.len()
    );

    // Read and preprocess inputs, keeping input order
    let preprocessor = Preprocessor::new().with_grayscale(config.ocr.grayscale);
    let mut images = Vec::with_capacity(files.len());

    for path in &files {
        let raw = fs::read(path)?;
        let data = match preprocessor.apply(&raw) {
            Ok(data) => data,
            Err(e) => {
                // hand the bytes to the engine untouched; it will report
                // the failure for this image and the batch continues
                warn!("preprocessing failed for {}: {}", path.display(), e);
                raw
            }
        };
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("imagen")
            .to_string();
        images.push(InputImage::new(data, name));
    }

    // Single progress bar across the whole batch
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let recognizer = TesseractRecognizer::new().with_binary(&args.tesseract);
    let pipeline = BatchPipeline::new(recognizer)
        .with_parser(VoucherParser::from_config(&config.extraction))
        .with_language(&config.ocr.language);

    let mut observer = BatchBar { bar: pb.clone() };
    let records = pipeline.run(&images, &mut observer).await;

    pb.finish_with_message("Complete");

    write_table(&args.output, &records)?;

    let failed = records.iter().filter(|r| r.date == UNREADABLE).count();
    let successful = records.len() - failed;

    println!();
    println!(
        "{} Processed {} images in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} recognized, {} failed",
        style(successful).green(),
        style(failed).red()
    );
    println!(
        "{} Table written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

/// Progress bar plus incremental row rendering as records complete.
struct BatchBar {
    bar: ProgressBar,
}

impl BatchObserver for BatchBar {
    fn on_progress(&mut self, percent: f64) {
        self.bar.set_position(percent.round() as u64);
    }

    fn on_record(&mut self, _index: usize, record: &TransactionRecord) {
        self.bar.println(format!(
            "  {} | {} | {} | {}",
            record.description, record.date, record.amount, record.recipient
        ));
    }
}

fn write_table(path: &Path, records: &[TransactionRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;

    wtr.write_record(CSV_HEADERS)?;
    for record in records {
        wtr.write_record(record.csv_row())?;
    }

    wtr.flush()?;
    debug!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
