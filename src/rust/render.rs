//! Text and JSON display of an [`Outcome`].

use std::fmt::Write;

use crate::advisor::NoticeLevel;
use crate::classifier::ClassifierError;
use crate::pipeline::Outcome;

pub fn render_text(outcome: &Outcome) -> String {
    let mut out = String::new();
    let suggestion = &outcome.suggestion;

    let _ = writeln!(out, "Message Category: {}", outcome.category);
    if let Some(notice) = &suggestion.notice {
        match notice.level {
            NoticeLevel::Info => {
                let _ = writeln!(out, "Note: {}", notice.text);
            }
            NoticeLevel::Plain => {
                let _ = writeln!(out, "{}", notice.text);
            }
        }
    }
    if let Some(advice) = &suggestion.advice_text {
        let _ = writeln!(out, "Suggested Action: {}", advice);
    }
    if !suggestion.primary_actions.is_empty() {
        out.push_str("Actions:\n");
        for action in &suggestion.primary_actions {
            let _ = writeln!(out, "  [{}] {}", action.label, action.redirect_message());
        }
    }
    out
}

pub fn render_json(outcome: &Outcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// User-facing line for a message that could not be handled.
pub fn render_error(error: &ClassifierError) -> String {
    match error {
        ClassifierError::EmptyInput => "Please enter a valid message.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::advise;
    use crate::category::Category;

    fn outcome(category: Category, message: &str) -> Outcome {
        Outcome {
            label: category.label().unwrap_or(-1),
            category,
            suggestion: advise(category, message),
        }
    }

    #[test]
    fn test_render_bill() {
        let text = render_text(&outcome(Category::Transactional, "pay your bill"));
        assert_eq!(
            text,
            "Message Category: Transactional\n\
             Suggested Action: Offer discounts for frequent bill payers.\n\
             Actions:\n  [Pay Now] Redirecting to payment portal...\n"
        );
    }

    #[test]
    fn test_render_notices() {
        let text = render_text(&outcome(Category::Transactional, "thanks"));
        assert!(text.contains("Note: No specific action available for this transactional message."));

        let text = render_text(&outcome(Category::Otp, "otp"));
        assert!(text.contains("OTP will auto-delete after 5 minutes."));
    }

    #[test]
    fn test_render_unknown() {
        assert_eq!(render_text(&outcome(Category::Unknown, "x")), "Message Category: Unknown\n");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&outcome(Category::Otp, "otp")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "OTP");
        assert_eq!(value["label"], 2);
        assert_eq!(value["suggestion"]["extra"]["expiry_minutes"], 5);
        assert_eq!(value["suggestion"]["notice"]["level"], "plain");
    }

    #[test]
    fn test_render_error() {
        assert_eq!(render_error(&ClassifierError::EmptyInput), "Please enter a valid message.");
        let err = ClassifierError::ClassificationError("bad shape".into());
        assert_eq!(render_error(&err), err.to_string());
    }
}
