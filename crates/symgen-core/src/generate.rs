//! Generation pipeline: metadata → fetch plan → per family (fetch, emit).
//!
//! Families are processed one at a time; only the fetch inside a family fans out.
//! A metadata failure aborts before any file is touched. An emitter failure
//! aborts too, leaving files of already finished families in place.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc::Sender;

use crate::config::GeneratorConfig;
use crate::emit;
use crate::error::{error_chain, GenerateError};
use crate::fetch::{self, FetchFailure};
use crate::http::HttpClient;
use crate::metadata::{self, Metadata};
use crate::resolve::{self, FetchPlan};

/// Progress events sent while a run is in flight (CLI-friendly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyProgress {
    Started { family: String, requested: usize },
    Finished { family: String, fetched: usize, requested: usize },
}

/// What happened to one family.
#[derive(Debug, Clone)]
pub struct FamilyReport {
    /// Full family name, e.g. `Material Symbols Outlined`.
    pub family: String,
    /// Class and file name, e.g. `Outlined`.
    pub short_name: String,
    pub requested: usize,
    pub fetched: usize,
    pub failures: Vec<FetchFailure>,
    /// Generated file, or `None` when the family produced no constants.
    pub written: Option<PathBuf>,
}

/// Aggregated outcome of a run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub families: Vec<FamilyReport>,
}

impl RunReport {
    pub fn total_requested(&self) -> usize {
        self.families.iter().map(|f| f.requested).sum()
    }

    pub fn total_fetched(&self) -> usize {
        self.families.iter().map(|f| f.fetched).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.families.iter().map(|f| f.failures.len()).sum()
    }

    /// Number of families with at least one failed icon.
    pub fn families_with_failures(&self) -> usize {
        self.families.iter().filter(|f| !f.failures.is_empty()).count()
    }

    pub fn files_written(&self) -> impl Iterator<Item = &Path> {
        self.families.iter().filter_map(|f| f.written.as_deref())
    }

    /// True when every requested icon was fetched.
    pub fn is_clean(&self) -> bool {
        self.total_failed() == 0
    }
}

/// Full run: fetches the manifest from `cfg.metadata_url`, then generates
/// every family below `root`.
pub async fn generate(
    cfg: &GeneratorConfig,
    root: &Path,
    timestamp: &str,
    progress_tx: Option<&Sender<FamilyProgress>>,
) -> Result<RunReport, GenerateError> {
    let client = HttpClient::from_config(cfg);
    let metadata = tokio::task::spawn_blocking({
        let client = client.clone();
        let url = cfg.metadata_url.clone();
        move || metadata::fetch_metadata(&client, &url)
    })
    .await
    .map_err(|e| GenerateError::Join(e.to_string()))?
    .map_err(|e| {
        tracing::error!("metadata fetch failed: {}", error_chain(&e));
        GenerateError::Metadata(e)
    })?;

    generate_from_metadata(cfg, &client, &metadata, root, timestamp, progress_tx).await
}

/// Generation for an already loaded manifest.
pub async fn generate_from_metadata(
    cfg: &GeneratorConfig,
    client: &HttpClient,
    metadata: &Metadata,
    root: &Path,
    timestamp: &str,
    progress_tx: Option<&Sender<FamilyProgress>>,
) -> Result<RunReport, GenerateError> {
    let plan: FetchPlan = resolve::plan_fetches(metadata, &cfg.svg_url_template);
    let out_dir = cfg.output_dir_in(root);
    let mut report = RunReport::default();

    tracing::info!(
        families = plan.len(),
        requests = plan.values().map(Vec::len).sum::<usize>(),
        "fetch plan ready"
    );

    for (family, requests) in &plan {
        let short_name = resolve::family_short_name(family).to_string();
        notify(
            progress_tx,
            FamilyProgress::Started {
                family: family.clone(),
                requested: requests.len(),
            },
        )
        .await;

        let fetched = fetch::fetch_family(client, requests, cfg.concurrency()).await?;
        tracing::info!(
            family = %family,
            fetched = fetched.constants.len(),
            failed = fetched.failures.len(),
            "family fetched"
        );
        notify(
            progress_tx,
            FamilyProgress::Finished {
                family: family.clone(),
                fetched: fetched.constants.len(),
                requested: requests.len(),
            },
        )
        .await;

        let written = emit::write_family_file(
            &out_dir,
            &cfg.project,
            &short_name,
            &fetched.constants,
            timestamp,
        )?;

        report.families.push(FamilyReport {
            family: family.clone(),
            short_name,
            requested: requests.len(),
            fetched: fetched.constants.len(),
            failures: fetched.failures,
            written,
        });
    }

    Ok(report)
}

async fn notify(tx: Option<&Sender<FamilyProgress>>, event: FamilyProgress) {
    if let Some(tx) = tx {
        // A closed receiver only means nobody is watching.
        let _ = tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(failed: usize, fetched: usize, written: bool) -> FamilyReport {
        FamilyReport {
            family: "Material Symbols Outlined".to_string(),
            short_name: "Outlined".to_string(),
            requested: failed + fetched,
            fetched,
            failures: (0..failed)
                .map(|i| FetchFailure {
                    name: format!("Icon{}", i),
                    url: format!("http://h/{}", i),
                    reason: "HTTP 404".to_string(),
                })
                .collect(),
            written: written.then(|| PathBuf::from("Outlined.cs")),
        }
    }

    #[test]
    fn report_totals() {
        let report = RunReport {
            families: vec![family(2, 3, true), family(0, 4, true), family(1, 0, false)],
        };
        assert_eq!(report.total_requested(), 10);
        assert_eq!(report.total_fetched(), 7);
        assert_eq!(report.total_failed(), 3);
        assert_eq!(report.families_with_failures(), 2);
        assert_eq!(report.files_written().count(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(RunReport::default().is_clean());
    }

    #[tokio::test]
    async fn families_without_icons_write_nothing() {
        let root = tempfile::tempdir().unwrap();
        let metadata = Metadata {
            host: "127.0.0.1:1".to_string(),
            families: vec!["Material Symbols Sharp".to_string()],
            icons: vec![],
        };
        let cfg = GeneratorConfig::default();
        let (tx, mut rx) = tokio::sync::mpsc::channel(8);
        let report = generate_from_metadata(
            &cfg,
            &HttpClient::from_config(&cfg),
            &metadata,
            root.path(),
            "t",
            Some(&tx),
        )
        .await
        .unwrap();
        drop(tx);

        assert_eq!(report.families.len(), 1);
        assert!(report.families[0].written.is_none());
        assert!(!cfg.output_dir_in(root.path()).exists());

        let mut events = Vec::new();
        while let Some(ev) = rx.recv().await {
            events.push(ev);
        }
        assert_eq!(
            events,
            [
                FamilyProgress::Started {
                    family: "Material Symbols Sharp".to_string(),
                    requested: 0
                },
                FamilyProgress::Finished {
                    family: "Material Symbols Sharp".to_string(),
                    fetched: 0,
                    requested: 0
                },
            ]
        );
    }
}
