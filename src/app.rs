use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use tokio::{task::JoinHandle, time::timeout};

use crate::{
    classifier::Classifier,
    config::AppConfig,
    infrastructure::{directories::ResolvedPaths, shutdown::StopSignal},
    tasks::{BatchProcessor, ProcessingOutcome},
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub struct EngineApp {
    processor: Arc<BatchProcessor>,
    files: Vec<String>,
    stop: StopSignal,
}

impl EngineApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, stop: StopSignal) -> Result<Self> {
        if config.ingest_files.is_empty() {
            bail!("no ingestion files given; pass paths as arguments or set INGEST_FILES");
        }

        let files = config.ingest_files.clone();
        let config = Arc::new(config);
        let classifier = Arc::new(Classifier::new()?);
        tracing::info!(
            target: "app",
            categories = classifier.categorizer().categories().count(),
            files = files.len(),
            output = %paths.output_dir.display(),
            "engine initialized"
        );

        Ok(Self {
            processor: Arc::new(BatchProcessor::new(classifier, config, paths)),
            files,
            stop,
        })
    }

    pub async fn run(self) -> Result<()> {
        let EngineApp {
            processor,
            files,
            stop,
        } = self;

        let total = files.len();
        let mut listener = stop.listen();
        let mut worker: JoinHandle<Vec<ProcessingOutcome>> = {
            let mut worker_listener = stop.listen();
            tokio::spawn(async move { processor.run(&files, &mut worker_listener).await })
        };

        let outcomes = tokio::select! {
            res = &mut worker => Some(res),
            _ = listener.stopped() => None,
        };

        let outcomes = match outcomes {
            Some(res) => res,
            None => match timeout(SHUTDOWN_GRACE, &mut worker).await {
                Ok(res) => res,
                Err(_) => {
                    tracing::warn!(
                        target: "processor",
                        "batch processor did not stop within {:?}; aborting",
                        SHUTDOWN_GRACE
                    );
                    worker.abort();
                    return Ok(());
                }
            },
        };

        let outcomes = match outcomes {
            Ok(outcomes) => outcomes,
            Err(err) if err.is_panic() => bail!("batch processor panicked"),
            Err(err) => bail!("batch processor task failed: {err}"),
        };

        let documents: usize = outcomes.iter().map(|o| o.documents).sum();
        tracing::info!(
            target: "app",
            processed = outcomes.len(),
            unprocessed = total - outcomes.len(),
            documents,
            "engine finished"
        );
        Ok(())
    }
}
