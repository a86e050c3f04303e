//! Fixed mapping from model labels to message categories.

use serde::Serialize;
use std::fmt;

/// The categories the bundled model was trained on, plus a sentinel for
/// labels outside the trained range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Fraud,
    Logistic,
    #[serde(rename = "OTP")]
    Otp,
    #[serde(rename = "Power Bill")]
    PowerBill,
    Recharge,
    Spam,
    Transactional,
    Unknown,
}

impl Category {
    /// All trained categories, in label order.
    pub const TRAINED: [Category; 7] = [
        Category::Fraud,
        Category::Logistic,
        Category::Otp,
        Category::PowerBill,
        Category::Recharge,
        Category::Spam,
        Category::Transactional,
    ];

    /// Display name as shown to users.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fraud => "Fraud",
            Self::Logistic => "Logistic",
            Self::Otp => "OTP",
            Self::PowerBill => "Power Bill",
            Self::Recharge => "Recharge",
            Self::Spam => "Spam",
            Self::Transactional => "Transactional",
            Self::Unknown => "Unknown",
        }
    }

    /// The model label this category was trained as, if any.
    pub fn label(&self) -> Option<i64> {
        Self::TRAINED
            .iter()
            .position(|c| c == self)
            .map(|i| i as i64)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves a predicted label into its category.
///
/// Labels outside `0..=6` resolve to [`Category::Unknown`]; this is not an error.
pub fn resolve(label: i64) -> Category {
    usize::try_from(label)
        .ok()
        .and_then(|i| Category::TRAINED.get(i).copied())
        .unwrap_or(Category::Unknown)
}
