//! Batch audits under a concurrency limit

use super::{AuditOptions, Auditor};
use crate::report::AnyReport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Which audit to run for each URL of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditMode {
    #[default]
    Single,
    Site,
}

/// A finished audit of one batch URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub url: String,
    pub report: AnyReport,
}

/// A batch URL whose audit could not run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub url: String,
    pub error: String,
}

/// Results of a batch, associated by URL
///
/// Both lists keep input order, so a URL listed twice appears twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub reports: Vec<BatchEntry>,
    pub errors: Vec<BatchFailure>,
}

impl BatchReport {
    /// Error of the first failed audit of `url`
    pub fn error_for(&self, url: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|failure| failure.url == url)
            .map(|failure| failure.error.as_str())
    }
}

async fn audit_one(
    auditor: &Auditor,
    url: &str,
    mode: AuditMode,
    options: &AuditOptions,
) -> Result<AnyReport, String> {
    let result = match mode {
        AuditMode::Single => auditor.audit_url(url, options).await.map(AnyReport::Single),
        AuditMode::Site => auditor.audit_site(url, options).await.map(AnyReport::Site),
    };
    result.map_err(|e| e.to_string())
}

/// Audits every URL with at most `concurrency` audits in flight
///
/// One URL's failure lands in `errors` and never affects the others.
pub async fn run_batch(
    auditor: Arc<Auditor>,
    urls: Vec<String>,
    mode: AuditMode,
    concurrency: usize,
    options: AuditOptions,
) -> BatchReport {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let options = Arc::new(options);
    info!(
        "Starting batch of {} URLs ({:?} mode, concurrency {})",
        urls.len(),
        mode,
        concurrency.max(1)
    );

    let mut handles = Vec::with_capacity(urls.len());
    for url in urls {
        let auditor = Arc::clone(&auditor);
        let options = Arc::clone(&options);
        let semaphore = Arc::clone(&semaphore);
        let task_url = url.clone();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed, so the permit is always granted
            let _permit = semaphore.acquire_owned().await;
            audit_one(&auditor, &task_url, mode, &options).await
        });
        handles.push((url, handle));
    }

    let mut batch = BatchReport::default();
    for (url, handle) in handles {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Err(format!("Audit task failed: {}", e)),
        };
        match outcome {
            Ok(report) => batch.reports.push(BatchEntry { url, report }),
            Err(error) => {
                warn!("Batch audit of {} failed: {}", url, error);
                batch.errors.push(BatchFailure { url, error });
            }
        }
    }

    info!(
        "Batch complete: {} reports, {} errors",
        batch.reports.len(),
        batch.errors.len()
    );
    batch
}

