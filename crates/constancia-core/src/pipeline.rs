//! Batch pipeline driving recognition image by image.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::extract::VoucherParser;
use crate::models::record::{InputImage, TransactionRecord};
use crate::ocr::{RecognitionOutcome, Recognizer};

/// Observer for batch progress and per-item completion.
///
/// `on_progress` receives a percentage in `[0, 100]`, non-decreasing
/// over the run; `on_record` fires once per finished image, in input
/// order, before the next image starts.
pub trait BatchObserver: Send {
    fn on_progress(&mut self, _percent: f64) {}
    fn on_record(&mut self, _index: usize, _record: &TransactionRecord) {}
}

/// Observer for callers that only want the final list.
pub struct NullObserver;

impl BatchObserver for NullObserver {}

/// Cooperative cancellation handle, consulted between images only.
///
/// A cancelled run stops before starting the next image and returns the
/// records finished so far; mid-image cancellation would require
/// cooperation from the OCR engine and is not attempted.
#[derive(Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Sequential batch pipeline.
///
/// Images are recognized strictly in input order, one at a time, because
/// progress is a single scalar over the whole batch and results render
/// incrementally in that order. One image's failure never aborts the
/// batch: its record carries the failure marker and the run continues.
/// The output list always has the same length and order as the input.
pub struct BatchPipeline<R> {
    recognizer: R,
    parser: VoucherParser,
    language: String,
    cancel: CancelHandle,
}

impl<R: Recognizer> BatchPipeline<R> {
    /// Create a pipeline with default parser settings.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            parser: VoucherParser::new(),
            language: "spa".to_string(),
            cancel: CancelHandle::new(),
        }
    }

    /// Replace the field parser.
    pub fn with_parser(mut self, parser: VoucherParser) -> Self {
        self.parser = parser;
        self
    }

    /// Set the language hint handed to the recognizer.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Attach an external cancellation handle.
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle that cancels this pipeline between images.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Run recognition and extraction over the whole batch.
    ///
    /// An empty input produces an empty result and a single 100% report.
    pub async fn run(
        &self,
        images: &[InputImage],
        observer: &mut dyn BatchObserver,
    ) -> Vec<TransactionRecord> {
        let total = images.len();
        let mut records = Vec::with_capacity(total);

        if total == 0 {
            observer.on_progress(100.0);
            return records;
        }

        let mut reported = -1.0_f64;

        for (index, image) in images.iter().enumerate() {
            if self.cancel.is_cancelled() {
                debug!("batch cancelled after {} of {} images", index, total);
                break;
            }

            report(observer, &mut reported, percent(index, 0.0, total));
            debug!("recognizing {} ({}/{})", image.display_name, index + 1, total);

            let outcome = {
                let mut sink = |partial: f64| {
                    report(observer, &mut reported, percent(index, partial, total));
                };
                match self
                    .recognizer
                    .recognize(&image.data, &self.language, &mut sink)
                    .await
                {
                    Ok(text) => RecognitionOutcome::Recognized(text),
                    Err(err) => RecognitionOutcome::Failed(err.to_string()),
                }
            };

            let record = match outcome {
                RecognitionOutcome::Recognized(text) => {
                    self.parser.parse(&text, &image.display_name)
                }
                RecognitionOutcome::Failed(reason) => {
                    warn!("recognition failed for {}: {}", image.display_name, reason);
                    self.parser.unreadable(&image.display_name)
                }
            };

            report(observer, &mut reported, percent(index + 1, 0.0, total));
            observer.on_record(index, &record);
            records.push(record);
        }

        records
    }
}

/// Batch completion as a percentage: `(done + partial) / total * 100`.
fn percent(done: usize, partial: f64, total: usize) -> f64 {
    ((done as f64 + partial.clamp(0.0, 1.0)) / total as f64) * 100.0
}

/// Forward a progress value, keeping the reported sequence non-decreasing.
fn report(observer: &mut dyn BatchObserver, reported: &mut f64, value: f64) {
    if value > *reported {
        *reported = value;
        observer.on_progress(value);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::RecognitionError;
    use crate::extract::{NOT_FOUND, UNREADABLE};
    use crate::ocr::ProgressSink;

    /// Recognizer that "reads" the image bytes as UTF-8 text; the byte
    /// string `unreadable` simulates a per-image failure.
    struct EchoRecognizer;

    #[async_trait]
    impl Recognizer for EchoRecognizer {
        async fn recognize(
            &self,
            image: &[u8],
            _language: &str,
            mut progress: ProgressSink<'_>,
        ) -> Result<String, RecognitionError> {
            progress(0.5);
            if image == b"unreadable" {
                return Err(RecognitionError::Failed("no text detected".to_string()));
            }
            progress(1.0);
            Ok(String::from_utf8_lossy(image).into_owned())
        }
    }

    #[derive(Default)]
    struct Recording {
        percents: Vec<f64>,
        records: Vec<(usize, TransactionRecord)>,
    }

    impl BatchObserver for Recording {
        fn on_progress(&mut self, percent: f64) {
            self.percents.push(percent);
        }

        fn on_record(&mut self, index: usize, record: &TransactionRecord) {
            self.records.push((index, record.clone()));
        }
    }

    fn image(text: &str, name: &str) -> InputImage {
        InputImage::new(text.as_bytes().to_vec(), name)
    }

    #[tokio::test]
    async fn failed_image_never_aborts_the_batch() {
        let pipeline = BatchPipeline::new(EchoRecognizer);
        let images = vec![
            image("Monto: S/ 10.00\n", "uno.png"),
            image("unreadable", "dos.png"),
            image("Número de operación 123456\n", "tres.png"),
        ];

        let mut observer = Recording::default();
        let records = pipeline.run(&images, &mut observer).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].amount, "S/ 10.00");
        assert_eq!(records[0].description, "uno");

        assert_eq!(records[1].date, UNREADABLE);
        assert_eq!(records[1].amount, UNREADABLE);
        assert_eq!(records[1].recipient, UNREADABLE);
        assert_eq!(records[1].description, "dos");

        assert_eq!(records[2].operation_number, "123456");
        assert_eq!(records[2].amount, NOT_FOUND);
    }

    #[tokio::test]
    async fn records_are_published_in_input_order() {
        let pipeline = BatchPipeline::new(EchoRecognizer);
        let images = vec![
            image("a", "a.png"),
            image("unreadable", "b.png"),
            image("c", "c.png"),
        ];

        let mut observer = Recording::default();
        let records = pipeline.run(&images, &mut observer).await;

        let indices: Vec<usize> = observer.records.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        for (i, published) in &observer.records {
            assert_eq!(&records[*i], published);
        }
    }

    #[tokio::test]
    async fn progress_is_monotone_and_ends_at_exactly_100() {
        let pipeline = BatchPipeline::new(EchoRecognizer);
        let images: Vec<InputImage> = (0..4).map(|i| image("x", &format!("{i}.png"))).collect();

        let mut observer = Recording::default();
        pipeline.run(&images, &mut observer).await;

        let percents = &observer.percents;
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(percents.last(), Some(&100.0));

        // full-image milestones land exactly on i/N
        for milestone in [25.0, 50.0, 75.0, 100.0] {
            assert!(percents.contains(&milestone));
        }

        // 100 is only ever reported once, at the very end
        assert_eq!(percents.iter().filter(|p| **p >= 100.0).count(), 1);
    }

    #[tokio::test]
    async fn sub_progress_lands_between_milestones() {
        let pipeline = BatchPipeline::new(EchoRecognizer);
        let images = vec![image("x", "0.png"), image("y", "1.png")];

        let mut observer = Recording::default();
        pipeline.run(&images, &mut observer).await;

        // EchoRecognizer reports 0.5 per image: 25% and 75% overall
        assert!(observer.percents.contains(&25.0));
        assert!(observer.percents.contains(&75.0));
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_result_at_100() {
        let pipeline = BatchPipeline::new(EchoRecognizer);

        let mut observer = Recording::default();
        let records = pipeline.run(&[], &mut observer).await;

        assert!(records.is_empty());
        assert_eq!(observer.percents, vec![100.0]);
    }

    #[tokio::test]
    async fn cancellation_stops_between_images() {
        let pipeline = BatchPipeline::new(EchoRecognizer);
        let cancel = pipeline.cancel_handle();
        cancel.cancel();

        let images = vec![image("a", "a.png"), image("b", "b.png")];
        let mut observer = Recording::default();
        let records = pipeline.run(&images, &mut observer).await;

        assert!(records.is_empty());
        assert!(observer.records.is_empty());
    }

    #[tokio::test]
    async fn rerunning_the_same_batch_is_idempotent() {
        let pipeline = BatchPipeline::new(EchoRecognizer);
        let images = vec![image(
            "Enviar a Juan Pérez\nMonto: S/ 42.00\n",
            "pago.jpeg",
        )];

        let first = pipeline.run(&images, &mut NullObserver).await;
        let second = pipeline.run(&images, &mut NullObserver).await;

        assert_eq!(first, second);
    }
}
