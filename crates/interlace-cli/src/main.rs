use chrono::Utc;
use interlace_core::domain::job_id;
use interlace_core::typed::{CodecError, Format};
use interlace_core::{
    Always, DependencyManager, InterchangeConfig, Job, JobBase, JobInterchange, JobTimeInfo,
    JobType, RegistryBuilder, make_job_interchange_with,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const GREET_JOB_TYPE: &str = "greet";
const GREET_JOB_VERSION: u32 = 1;
const JOB_COUNT: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GreetPayload {
    recipient: String,
    attempts_before_success: u32,
}

#[derive(Debug, Clone)]
struct GreetJob {
    base: JobBase,
    payload: GreetPayload,
}

impl Default for GreetJob {
    fn default() -> Self {
        Self {
            base: JobBase::new(JobType::new(GREET_JOB_TYPE, GREET_JOB_VERSION)),
            payload: GreetPayload::default(),
        }
    }
}

impl Job for GreetJob {
    fn base(&self) -> &JobBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JobBase {
        &mut self.base
    }

    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        format.encode(&self.payload)
    }

    fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError> {
        format.decode_into(body, &mut self.payload)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// producer: builds jobs, each depending on the previous one, and ships
/// envelope bytes.
async fn producer(config: InterchangeConfig, tx: mpsc::Sender<Vec<u8>>) {
    let mut previous: Option<String> = None;
    for i in 0..JOB_COUNT {
        let mut job = GreetJob::default();
        job.set_id(job_id(GREET_JOB_TYPE));
        job.payload = GreetPayload {
            recipient: format!("worker-{i}"),
            attempts_before_success: (i % 2) as u32,
        };
        job.update_time_info(JobTimeInfo {
            created: Some(Utc::now()),
            ..Default::default()
        });
        job.set_scopes(vec!["greeting-desk".to_string()]);

        let mut dependency = Always::new();
        if let Some(prev) = &previous {
            dependency.add_edge(prev);
        }
        job.set_dependency(Box::new(dependency));

        let bytes = make_job_interchange_with(&job, config.format, &config.truncation)
            .and_then(|interchange| Ok(interchange.to_bytes(config.format)?));
        match bytes {
            Ok(bytes) => {
                info!(job = %job.id(), len = bytes.len(), "enqueued");
                if tx.send(bytes).await.is_err() {
                    break;
                }
            }
            Err(e) => error!(job = %job.id(), "encode failed: {e}"),
        }
        previous = Some(job.id().to_string());
    }
}

/// consumer: resolves envelope bytes back into jobs.
async fn consumer(format: Format, mut rx: mpsc::Receiver<Vec<u8>>) -> usize {
    let mut resolved = 0;
    while let Some(bytes) = rx.recv().await {
        let job = JobInterchange::from_bytes(format, &bytes)
            .map_err(Into::into)
            .and_then(|interchange| interchange.resolve(format));
        match job {
            Ok(job) => {
                let greet = job.downcast_ref::<GreetJob>();
                info!(
                    job = %job.id(),
                    recipient = greet.map(|g| g.payload.recipient.as_str()).unwrap_or_default(),
                    edges = ?job.dependency().edges(),
                    "resolved"
                );
                resolved += 1;
            }
            Err(e) => error!("resolve failed: {e}"),
        }
    }
    resolved
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // (A) configuration and type wiring
    let config = InterchangeConfig::from_env()?;
    RegistryBuilder::new()
        .builtin_dependencies()
        .job::<GreetJob>()
        .expect_jobs(&[GREET_JOB_TYPE])
        .expect_dependencies(&["always"])
        .install()?;
    info!(format = %config.format, "starting");

    // (B) producer and consumer exchange envelope bytes only
    let (tx, rx) = mpsc::channel(JOB_COUNT);
    let consumer = tokio::spawn(consumer(config.format, rx));
    tokio::spawn(producer(config, tx)).await?;

    let resolved = consumer.await?;
    info!(resolved, "done");
    Ok(())
}
