//! Price Job Service
//!
//! Drives one uploaded parts list through download, parsing, validation and
//! per-row price enrichment. Rows are processed strictly one at a time: a
//! row's lookup and all of its inserts finish before the next row starts.
//! A failed insert aborts the job; records already written stay written.

use std::sync::Arc;

use crate::lookup_client::QuoteSource;
use crate::metrics::JobMetrics;
use pricecheck_database::{BlobStore, ResultStore};
use pricecheck_models::{JobResult, JobResultEntry, NewPriceResult, ValidatedRow};
use pricecheck_utils::{table, PriceCheckResult};

/// Price job service
#[derive(Clone)]
pub struct PriceJob {
    blob_store: Arc<dyn BlobStore>,
    quote_source: Arc<dyn QuoteSource>,
    result_store: Arc<dyn ResultStore>,
    metrics: JobMetrics,
    max_quotes: usize,
}

impl PriceJob {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        quote_source: Arc<dyn QuoteSource>,
        result_store: Arc<dyn ResultStore>,
        metrics: JobMetrics,
    ) -> Self {
        Self {
            blob_store,
            quote_source,
            result_store,
            metrics,
            max_quotes: 3,
        }
    }

    /// Cap on quotes persisted per row.
    pub fn with_max_quotes(mut self, max_quotes: usize) -> Self {
        self.max_quotes = max_quotes;
        self
    }

    /// Run a full job for an uploaded file.
    #[tracing::instrument(name = "price_job", skip(self))]
    pub async fn run(
        &self,
        user_id: &str,
        file_path: &str,
        file_name: &str,
    ) -> PriceCheckResult<JobResult> {
        let outcome = match self.load_rows(file_path, file_name).await {
            Ok(rows) => self.process_rows(user_id, rows).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(results) => {
                self.metrics.record_outcome("success");
                tracing::info!(rows = results.len(), "Price job completed");
            }
            Err(e) => self.metrics.record_outcome(&e.error_code().to_lowercase()),
        }
        outcome
    }

    /// Download, parse and validate without enrichment or persistence.
    #[tracing::instrument(skip(self))]
    pub async fn preview(&self, file_path: &str, file_name: &str) -> PriceCheckResult<Vec<ValidatedRow>> {
        self.load_rows(file_path, file_name).await
    }

    async fn load_rows(&self, file_path: &str, file_name: &str) -> PriceCheckResult<Vec<ValidatedRow>> {
        let data = self.blob_store.download(file_path).await?;
        let parsed = table::parse(&data, file_name)?;
        let rows = table::validate(&parsed)?;

        tracing::info!(table_rows = parsed.len(), valid_rows = rows.len(), "Upload validated");
        Ok(rows)
    }

    /// Enrich validated rows in order and persist every quote found.
    ///
    /// Returns one entry per row, in input order; an entry's price is the
    /// first quote's price, or `None` when the lookup found nothing.
    #[tracing::instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn process_rows(
        &self,
        user_id: &str,
        rows: Vec<ValidatedRow>,
    ) -> PriceCheckResult<JobResult> {
        let mut results = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let mut quotes = self
                .quote_source
                .lookup(&row.manufacturer, &row.part_number)
                .await;
            quotes.truncate(self.max_quotes);

            if quotes.is_empty() {
                self.metrics.lookup_empty.inc();
            }

            for quote in &quotes {
                let record =
                    NewPriceResult::from_quote(user_id, &row.manufacturer, &row.part_number, quote);
                if let Err(e) = self.result_store.insert(&record).await {
                    tracing::error!(
                        error = %e,
                        row = idx,
                        completed_rows = results.len(),
                        "Persisting quote failed, aborting job"
                    );
                    return Err(e);
                }
                self.metrics.quotes_persisted.inc();
            }

            let price = quotes.first().and_then(|quote| quote.price);
            tracing::debug!(
                manufacturer = %row.manufacturer,
                part_number = %row.part_number,
                quotes = quotes.len(),
                ?price,
                "Row processed"
            );

            self.metrics.rows_processed.inc();
            results.push(JobResultEntry::new(row, price));
        }

        Ok(results)
    }
}
