//! Prometheus counters for price jobs.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

#[derive(Clone)]
pub struct JobMetrics {
    pub jobs: IntCounterVec,
    pub rows_processed: IntCounter,
    pub quotes_persisted: IntCounter,
    pub lookup_empty: IntCounter,
}

impl JobMetrics {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            jobs: IntCounterVec::new(
                Opts::new("pricecheck_jobs_total", "Price jobs by outcome"),
                &["outcome"],
            )?,
            rows_processed: IntCounter::new(
                "pricecheck_rows_processed_total",
                "Validated rows run through price lookup",
            )?,
            quotes_persisted: IntCounter::new(
                "pricecheck_quotes_persisted_total",
                "Quote records written to the result store",
            )?,
            lookup_empty: IntCounter::new(
                "pricecheck_lookup_empty_total",
                "Lookups that produced no quotes",
            )?,
        })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.jobs.clone()))?;
        registry.register(Box::new(self.rows_processed.clone()))?;
        registry.register(Box::new(self.quotes_persisted.clone()))?;
        registry.register(Box::new(self.lookup_empty.clone()))?;
        Ok(())
    }

    pub fn record_outcome(&self, outcome: &str) {
        self.jobs.with_label_values(&[outcome]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_gather() {
        let registry = Registry::new();
        let metrics = JobMetrics::new().unwrap();
        metrics.register(&registry).unwrap();

        metrics.record_outcome("success");
        metrics.rows_processed.inc_by(2);

        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"pricecheck_jobs_total".to_string()));
        assert_eq!(metrics.jobs.with_label_values(&["success"]).get(), 1);
        assert_eq!(metrics.rows_processed.get(), 2);
    }
}
