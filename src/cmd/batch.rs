use std::path::PathBuf;

use crate::context::AppContext;
use crate::domain::classification::ClassificationOutcome;
use crate::domain::ticket::load_tickets;
use crate::error::AppResult;
use crate::workflow::batch::{classify_batch, success_count};

#[derive(Debug, Clone)]
pub struct BatchCommandArgs {
    pub tickets: Option<PathBuf>,
}

pub async fn run(ctx: &AppContext, args: BatchCommandArgs) -> AppResult<()> {
    let path = args
        .tickets
        .unwrap_or_else(|| ctx.config.tickets_path.clone());
    let tickets = load_tickets(&path)?;
    println!("Loaded {} tickets from {}", tickets.len(), path.display());

    let classifier = ctx.require_classifier()?;
    let results = classify_batch(classifier.as_ref(), &tickets).await;

    for result in &results {
        print_result(result);
    }

    println!(
        "\n{}/{} tickets classified successfully",
        success_count(&results),
        results.len()
    );
    Ok(())
}

fn print_result(result: &ClassificationOutcome) {
    match result {
        ClassificationOutcome::Failure {
            ticket_id, error, ..
        } => {
            println!("\n{ticket_id} - ERROR: {error}");
        }
        ClassificationOutcome::Success {
            ticket_id,
            classification,
        } => {
            println!("\n{ticket_id}");
            println!("  Category:   {}", classification.category.as_str());
            println!("  Priority:   {}", classification.priority.as_str());
            println!("  Confidence: {:.0}%", classification.confidence * 100.0);
            match classification.escalate_to {
                Some(target) if classification.should_escalate => {
                    println!("  Escalate:   yes -> {}", target.as_str());
                }
                _ if classification.should_escalate => println!("  Escalate:   yes"),
                _ => println!("  Escalate:   no (handle autonomously)"),
            }
            println!("  Reasoning:  {}", classification.reasoning);
            if !classification.suggested_tags.is_empty() {
                println!("  Tags:       {}", classification.suggested_tags.join(", "));
            }
        }
    }
}
