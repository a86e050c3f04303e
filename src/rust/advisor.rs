//! Picks a suggested action for a classified message.
//!
//! The decision is a fixed table over the category. Only transactional
//! messages look at the text itself, through a case-insensitive keyword test.

use serde::Serialize;

use crate::category::Category;
use crate::classifier::ClassifierError;

/// An action offered to the user alongside the suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub label: &'static str,
    /// Where invoking the action leads
    pub effect: &'static str,
}

impl ActionButton {
    pub const PAY_NOW: ActionButton = ActionButton { label: "Pay Now", effect: "payment portal" };
    pub const RECHARGE_NOW: ActionButton = ActionButton { label: "Recharge Now", effect: "recharge portal" };
    pub const BOOK_TICKETS: ActionButton = ActionButton { label: "Book Tickets", effect: "booking portal" };
    pub const TRACK_SHIPMENT: ActionButton = ActionButton { label: "Track Shipment", effect: "shipment tracking" };

    /// Text displayed when the action is invoked.
    pub fn redirect_message(&self) -> String {
        format!("Redirecting to {}...", self.effect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Plain,
}

/// A status line shown next to the suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Plain, text: text.into() }
    }
}

/// Minutes after which a received OTP is auto-deleted. Always within `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OtpExpiry(u8);

impl OtpExpiry {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 30;
    pub const DEFAULT: OtpExpiry = OtpExpiry(5);

    /// Rejects values outside `1..=30`.
    pub fn new(minutes: u32) -> Result<Self, ClassifierError> {
        if !(u32::from(Self::MIN)..=u32::from(Self::MAX)).contains(&minutes) {
            return Err(ClassifierError::ValidationError(format!(
                "OTP expiry must be between {} and {} minutes, got {}",
                Self::MIN,
                Self::MAX,
                minutes
            )));
        }
        Ok(Self(minutes as u8))
    }

    /// Clamps any value into `1..=30`.
    pub fn clamped(minutes: i64) -> Self {
        Self(minutes.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn minutes(&self) -> u8 {
        self.0
    }
}

impl Default for OtpExpiry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Extra parameters attached to OTP suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OtpOptions {
    pub expiry_minutes: OtpExpiry,
}

/// The advisory payload for a category/message pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub category: Category,
    pub primary_actions: Vec<ActionButton>,
    pub advice_text: Option<String>,
    pub notice: Option<Notice>,
    pub extra: Option<OtpOptions>,
}

impl Suggestion {
    fn new(category: Category) -> Self {
        Self {
            category,
            primary_actions: Vec::new(),
            advice_text: None,
            notice: None,
            extra: None,
        }
    }

    fn action(mut self, action: ActionButton) -> Self {
        self.primary_actions.push(action);
        self
    }

    fn advice(mut self, text: &str) -> Self {
        self.advice_text = Some(text.to_string());
        self
    }

    fn notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// True when nothing is suggested (the `Unknown` category).
    pub fn is_empty(&self) -> bool {
        self.primary_actions.is_empty() && self.advice_text.is_none() && self.notice.is_none()
    }
}

/// Keywords checked in transactional messages, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionalKeyword {
    Bill,
    Recharge,
    Book,
}

impl TransactionalKeyword {
    pub const PRIORITY: [TransactionalKeyword; 3] = [Self::Bill, Self::Recharge, Self::Book];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bill => "bill",
            Self::Recharge => "recharge",
            Self::Book => "book",
        }
    }

    /// First keyword contained in the message, ignoring case.
    pub fn detect(message: &str) -> Option<Self> {
        let lowered = message.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
    }
}

/// Suggests actions for a message using the default OTP expiry.
pub fn advise(category: Category, message: &str) -> Suggestion {
    advise_with(category, message, OtpExpiry::default())
}

/// Suggests actions for a message.
pub fn advise_with(category: Category, message: &str, expiry: OtpExpiry) -> Suggestion {
    let suggestion = Suggestion::new(category);
    match category {
        Category::Transactional => match TransactionalKeyword::detect(message) {
            Some(TransactionalKeyword::Bill) => suggestion
                .action(ActionButton::PAY_NOW)
                .advice("Offer discounts for frequent bill payers."),
            Some(TransactionalKeyword::Recharge) => suggestion
                .action(ActionButton::RECHARGE_NOW)
                .advice("Offer recharge promotions for frequent shoppers."),
            Some(TransactionalKeyword::Book) => suggestion
                .action(ActionButton::BOOK_TICKETS)
                .advice("Offer discounts for frequent ticket bookers."),
            None => suggestion
                .notice(Notice::info("No specific action available for this transactional message."))
                .advice("Offer recurring payment discounts."),
        },
        Category::Logistic => suggestion
            .action(ActionButton::TRACK_SHIPMENT)
            .advice("Provide shipment tracking services for logistic-related inquiries."),
        Category::Otp => {
            let mut suggestion = suggestion
                .notice(Notice::plain(format!(
                    "OTP will auto-delete after {} minutes.",
                    expiry.minutes()
                )))
                .advice("Offer instant OTP generation and expiration options.");
            suggestion.extra = Some(OtpOptions { expiry_minutes: expiry });
            suggestion
        }
        Category::PowerBill => suggestion
            .action(ActionButton::PAY_NOW)
            .advice("Offer incentives for timely bill payments and discounts for loyal customers."),
        Category::Recharge => suggestion
            .action(ActionButton::RECHARGE_NOW)
            .advice("Offer recharge discounts or promotional bundles for frequent users."),
        Category::Fraud => suggestion
            .notice(Notice::plain("Fraud detected. Improving fraud detection and prevention."))
            .advice("Improve fraud detection and implement more secure transactions."),
        Category::Spam => suggestion
            .notice(Notice::plain(
                "Message classified as Spam. Consider implementing stricter spam filters.",
            ))
            .advice("Strengthen spam filtering system."),
        Category::Unknown => suggestion,
    }
}
