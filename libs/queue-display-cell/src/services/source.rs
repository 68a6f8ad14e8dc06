use async_trait::async_trait;
use tracing::{debug, instrument};

use shared_api_client::ClinicApiClient;
use shared_config::AppConfig;

use crate::{
    CallNextResponse, DoctorQueueEntry, NowServing, QueueDisplayError, QueueListResponse,
};

/// Where the dashboard's queue data comes from and where its commands go.
#[async_trait]
pub trait QueueSource: Send + Sync {
    async fn fetch_queues(&self) -> Result<Vec<DoctorQueueEntry>, QueueDisplayError>;

    async fn call_next(&self, doctor_id: &str) -> Result<(), QueueDisplayError>;

    async fn fetch_now_serving(&self) -> Result<NowServing, QueueDisplayError>;
}

pub struct HttpQueueSource {
    client: ClinicApiClient,
    config: AppConfig,
}

impl HttpQueueSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ClinicApiClient::new(config),
            config: config.clone(),
        }
    }

    pub fn client(&self) -> &ClinicApiClient {
        &self.client
    }
}

#[async_trait]
impl QueueSource for HttpQueueSource {
    #[instrument(skip(self))]
    async fn fetch_queues(&self) -> Result<Vec<DoctorQueueEntry>, QueueDisplayError> {
        let response: QueueListResponse = self.client.get(&self.config.queue_endpoint).await?;
        debug!("Fetched {} doctor queues", response.queues.len());
        Ok(response.queues)
    }

    #[instrument(skip(self))]
    async fn call_next(&self, doctor_id: &str) -> Result<(), QueueDisplayError> {
        validate_doctor_id(doctor_id)?;

        let path = self.config.call_next_path(doctor_id);
        let response: CallNextResponse = self.client.post(&path, None).await?;

        if !response.is_success() {
            return Err(QueueDisplayError::Command(response.failure_reason()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_now_serving(&self) -> Result<NowServing, QueueDisplayError> {
        let now_serving: NowServing = self
            .client
            .get(&self.config.current_patient_endpoint)
            .await?;
        Ok(now_serving)
    }
}

/// Doctor ids are substituted into a URL path, so only plain tokens are accepted.
pub fn validate_doctor_id(doctor_id: &str) -> Result<(), QueueDisplayError> {
    let valid = !doctor_id.is_empty()
        && doctor_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(QueueDisplayError::Command(format!("Invalid doctor id: {:?}", doctor_id)))
    }
}
