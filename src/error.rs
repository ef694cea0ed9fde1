use reqwest::StatusCode;

/// Everything that can go wrong between reading the cluster URL and holding a ranked report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Invalid cluster URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Creating the HTTP client failed")]
    Client(#[source] reqwest::Error),
    #[error("Requesting index stats from {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Cluster answered {url} with {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Decoding the index stats response failed")]
    Decode(#[source] serde_json::Error),
}
