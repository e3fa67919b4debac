use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nfl_api::client::{ApiError, NflApi};
use nfl_api::{CollegeMatcher, pipeline};
use tokio::sync::mpsc;

/// Owns the API client and serves scan requests one at a time. Serializing
/// requests here means a refresh tick that arrives mid-scan waits its turn;
/// two scans never run concurrently.
pub struct NetworkWorker {
    client: NflApi,
    matcher: CollegeMatcher,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        matcher: CollegeMatcher,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: NflApi::new(),
            matcher,
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let result = match request {
                NetworkRequest::ScanMatchups => self.handle_scan().await,
            };

            debug!("network request complete");

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_scan(&self) -> Result<NetworkResponse, ApiError> {
        debug!("scanning live games for {} alumni", self.matcher.target());
        let outcome = pipeline::scan(&self.client, &self.matcher).await?;
        Ok(NetworkResponse::ScanCompleted { outcome })
    }
}
