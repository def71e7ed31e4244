use async_trait::async_trait;

use crate::domain::classification::ClassificationOutcome;
use crate::domain::ticket::Ticket;

/// One classification attempt per call. Transport and parse problems are
/// folded into the returned outcome; this call itself never fails.
#[async_trait]
pub trait ClassifierService: Send + Sync {
    async fn classify(&self, ticket: &Ticket) -> ClassificationOutcome;
}
