use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::domain::ContactInquiry;

/// Destination for contact inquiries.
#[async_trait]
pub trait InquirySink: Send + Sync {
    async fn deliver(&self, inquiry: &ContactInquiry) -> Result<(), InquiryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("inquiry channel unavailable: {0}")]
    Unavailable(String),
}

/// Stand-in for a real inquiry backend: waits out a fixed latency and accepts
/// every inquiry.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedInquirySink {
    latency: Duration,
}

impl SimulatedInquirySink {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl InquirySink for SimulatedInquirySink {
    async fn deliver(&self, inquiry: &ContactInquiry) -> Result<(), InquiryError> {
        tokio::time::sleep(self.latency).await;
        info!(
            message_len = inquiry.message.len(),
            "contact inquiry accepted"
        );
        Ok(())
    }
}
