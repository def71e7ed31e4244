use tracing::{info, warn};

use crate::domain::classification::ClassificationOutcome;
use crate::domain::ticket::Ticket;
use crate::services::ClassifierService;

/// Classify every ticket in input order, one call at a time. A failed
/// ticket never aborts the batch; the output is one-to-one with the input.
pub async fn classify_batch(
    classifier: &dyn ClassifierService,
    tickets: &[Ticket],
) -> Vec<ClassificationOutcome> {
    let total = tickets.len();
    info!("processing {total} tickets");

    let mut results = Vec::with_capacity(total);
    for (index, ticket) in tickets.iter().enumerate() {
        let outcome = classifier.classify(ticket).await;
        match &outcome {
            ClassificationOutcome::Success { .. } => {
                info!("[{}/{total}] {} classified", index + 1, ticket.id);
            }
            ClassificationOutcome::Failure { error, .. } => {
                warn!("[{}/{total}] {} failed: {error}", index + 1, ticket.id);
            }
        }
        results.push(outcome);
    }

    info!(
        "{}/{total} tickets classified successfully",
        success_count(&results)
    );
    results
}

pub fn success_count(results: &[ClassificationOutcome]) -> usize {
    results.iter().filter(|result| result.is_success()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::classification::{Classification, TicketCategory, TicketPriority};

    struct ScriptedClassifier {
        failing_ids: Vec<&'static str>,
    }

    #[async_trait]
    impl ClassifierService for ScriptedClassifier {
        async fn classify(&self, ticket: &Ticket) -> ClassificationOutcome {
            if self.failing_ids.contains(&ticket.id.as_str()) {
                ClassificationOutcome::failure(&ticket.id, "API error: quota exceeded", None)
            } else {
                ClassificationOutcome::success(
                    &ticket.id,
                    Classification {
                        category: TicketCategory::Billing,
                        priority: TicketPriority::Low,
                        should_escalate: false,
                        escalate_to: None,
                        reasoning: "Routine inquiry.".to_string(),
                        suggested_tags: vec!["billing".to_string()],
                        confidence: 0.9,
                    },
                )
            }
        }
    }

    fn ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            subject: "subject".to_string(),
            description: "description".to_string(),
            customer_email: "customer@example.com".to_string(),
            customer_tier: "pro".to_string(),
            created_at: "2024-03-05T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn returns_one_ordered_result_per_ticket() {
        let classifier = ScriptedClassifier {
            failing_ids: vec!["T-2", "T-4"],
        };
        let tickets = vec![ticket("T-1"), ticket("T-2"), ticket("T-3"), ticket("T-4")];

        let results = classify_batch(&classifier, &tickets).await;

        assert_eq!(results.len(), 4);
        let ids: Vec<&str> = results.iter().map(|result| result.ticket_id()).collect();
        assert_eq!(ids, vec!["T-1", "T-2", "T-3", "T-4"]);
        assert_eq!(success_count(&results), 2);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
    }

    #[tokio::test]
    async fn failures_do_not_abort_the_batch() {
        let classifier = ScriptedClassifier {
            failing_ids: vec!["T-1", "T-2", "T-3"],
        };
        let tickets = vec![ticket("T-1"), ticket("T-2"), ticket("T-3")];

        let results = classify_batch(&classifier, &tickets).await;

        assert_eq!(results.len(), 3);
        assert_eq!(success_count(&results), 0);
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_results() {
        let classifier = ScriptedClassifier { failing_ids: vec![] };

        let results = classify_batch(&classifier, &[]).await;

        assert!(results.is_empty());
        assert_eq!(success_count(&results), 0);
    }
}
