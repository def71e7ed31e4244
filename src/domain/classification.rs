use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    Billing,
    Technical,
    Account,
    FeatureRequest,
    Churn,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Billing => "BILLING",
            TicketCategory::Technical => "TECHNICAL",
            TicketCategory::Account => "ACCOUNT",
            TicketCategory::FeatureRequest => "FEATURE_REQUEST",
            TicketCategory::Churn => "CHURN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "LOW",
            TicketPriority::Medium => "MEDIUM",
            TicketPriority::High => "HIGH",
            TicketPriority::Urgent => "URGENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationTarget {
    SupportTeam,
    AccountManager,
    Engineering,
    Billing,
}

impl EscalationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationTarget::SupportTeam => "SUPPORT_TEAM",
            EscalationTarget::AccountManager => "ACCOUNT_MANAGER",
            EscalationTarget::Engineering => "ENGINEERING",
            EscalationTarget::Billing => "BILLING",
        }
    }
}

/// The decision produced by the model for one ticket.
///
/// Decoding is deliberately lenient at the edges: unknown keys are ignored
/// and `escalate_to`, `suggested_tags` and `confidence` fall back to
/// defaults when absent. The remaining fields are required, so a response
/// missing them fails to parse instead of producing a half-filled decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub should_escalate: bool,
    #[serde(default)]
    pub escalate_to: Option<EscalationTarget>,
    pub reasoning: String,
    #[serde(default)]
    pub suggested_tags: Vec<String>,
    #[serde(default)]
    pub confidence: f64,
}

/// The per-ticket result of one classification attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClassificationOutcome {
    Success {
        ticket_id: String,
        classification: Classification,
    },
    Failure {
        ticket_id: String,
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        raw_response: Option<String>,
    },
}

impl ClassificationOutcome {
    /// Build the outcome for one raw model response: fence-strip, then
    /// parse strictly as JSON. On failure the attempted text is preserved
    /// for diagnosis.
    pub fn from_response(ticket_id: &str, raw: &str) -> Self {
        let payload = extract_json_payload(raw);
        match serde_json::from_str(payload) {
            Ok(classification) => Self::success(ticket_id, classification),
            Err(err) => Self::failure(
                ticket_id,
                format!("Failed to parse JSON response: {err}"),
                Some(payload.to_string()),
            ),
        }
    }

    pub fn success(ticket_id: impl Into<String>, classification: Classification) -> Self {
        ClassificationOutcome::Success {
            ticket_id: ticket_id.into(),
            classification,
        }
    }

    pub fn failure(
        ticket_id: impl Into<String>,
        error: impl Into<String>,
        raw_response: Option<String>,
    ) -> Self {
        ClassificationOutcome::Failure {
            ticket_id: ticket_id.into(),
            error: error.into(),
            raw_response,
        }
    }

    pub fn ticket_id(&self) -> &str {
        match self {
            ClassificationOutcome::Success { ticket_id, .. } => ticket_id,
            ClassificationOutcome::Failure { ticket_id, .. } => ticket_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ClassificationOutcome::Success { .. })
    }
}

/// Strip conversational wrapping from a model response before JSON parsing.
///
/// Honors only the first fence pair, preferring a ```json fence over a
/// generic one; text after the closing fence is discarded. Without fences
/// the whole trimmed text is returned. Not a markdown parser.
pub fn extract_json_payload(text: &str) -> &str {
    let text = text.trim();
    if let Some((_, rest)) = text.split_once("```json") {
        match rest.split_once("```") {
            Some((payload, _)) => payload.trim(),
            None => rest.trim(),
        }
    } else if let Some((_, rest)) = text.split_once("```") {
        match rest.split_once("```") {
            Some((payload, _)) => payload.trim(),
            None => rest.trim(),
        }
    } else {
        text
    }
}
