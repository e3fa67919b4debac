use nfl_api::pipeline::ScanOutcome;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    ScanMatchups,
}

#[derive(Debug)]
pub enum NetworkResponse {
    ScanCompleted { outcome: ScanOutcome },
    Error { message: String },
}
