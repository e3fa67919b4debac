use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic scan trigger — every five minutes by default.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut scan_interval = interval(self.period);
        // Skip the immediate first tick so the startup scan isn't double-triggered.
        scan_interval.tick().await;

        loop {
            scan_interval.tick().await;
            let _ = self
                .network_requests
                .send(NetworkRequest::ScanMatchups)
                .await;
        }
    }
}
