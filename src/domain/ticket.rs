use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A customer support request as received from the outside world.
///
/// All six fields are required: a ticket JSON missing any of them is
/// rejected during deserialization, before a classification request is
/// ever issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub description: String,
    pub customer_email: String,
    pub customer_tier: String,
    pub created_at: String,
}

pub fn load_tickets(path: &Path) -> AppResult<Vec<Ticket>> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|err| {
        AppError::InvalidTicket(format!("invalid tickets file {}: {err}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn deserializes_complete_ticket() {
        let ticket: Ticket = serde_json::from_str(
            r#"{
                "id": "TICKET-001",
                "subject": "Cannot export project data",
                "description": "Export has been failing since yesterday.",
                "customer_email": "ops@example.com",
                "customer_tier": "enterprise",
                "created_at": "2024-03-01T09:15:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(ticket.id, "TICKET-001");
        assert_eq!(ticket.customer_tier, "enterprise");
    }

    #[test]
    fn rejects_ticket_missing_required_field() {
        let result = serde_json::from_str::<Ticket>(
            r#"{
                "id": "TICKET-002",
                "subject": "Invoice request",
                "description": "Please resend the February invoice.",
                "customer_email": "billing@example.com",
                "created_at": "2024-03-02T10:00:00Z"
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn loads_tickets_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "id": "TICKET-003",
                "subject": "How do I add a teammate?",
                "description": "Looking for the invite flow.",
                "customer_email": "pm@example.com",
                "customer_tier": "pro",
                "created_at": "2024-03-03T12:30:00Z"
            }}]"#
        )
        .unwrap();

        let tickets = load_tickets(file.path()).unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].id, "TICKET-003");
    }

    #[test]
    fn rejects_malformed_tickets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let result = load_tickets(file.path());
        assert!(matches!(result, Err(AppError::InvalidTicket(_))));
    }
}
