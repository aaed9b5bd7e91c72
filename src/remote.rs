//! Optional fetch of a hosted readiness assessment.
//!
//! Any failure (network, non-2xx, undecodable body) falls back to the default
//! record. The fallback is deliberate and silent toward the caller; the error
//! only reaches the log.

use thiserror::Error;

use crate::assessment::ReadinessAssessment;

const ASSESSMENT_ENDPOINT: &str = "/api/readiness-assessment";

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("response body unreadable: {0}")]
    Body(#[from] std::io::Error),
}

/// Fetches the assessment from `<base_url>/api/readiness-assessment`,
/// returning the default record on any failure.
pub fn fetch_readiness_assessment(base_url: &str) -> ReadinessAssessment {
    match try_fetch(base_url) {
        Ok(assessment) => assessment,
        Err(e) => {
            tracing::warn!("remote assessment fetch failed, using defaults: {e}");
            ReadinessAssessment::default()
        }
    }
}

fn try_fetch(base_url: &str) -> Result<ReadinessAssessment, RemoteError> {
    let url = format!("{}{ASSESSMENT_ENDPOINT}", base_url.trim_end_matches('/'));
    let response = ureq::get(&url).call().map_err(Box::new)?;
    Ok(response.into_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_falls_back_to_defaults() {
        // Port 1 is never serving; the connection fails immediately.
        let assessment = fetch_readiness_assessment("http://127.0.0.1:1");
        assert_eq!(assessment, ReadinessAssessment::default());
    }
}
