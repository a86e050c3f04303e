use msgclass::{advise, resolve, ActionButton, Category, Suggestion};

fn advice(suggestion: &Suggestion) -> &str {
    suggestion.advice_text.as_deref().unwrap_or("")
}

#[test]
fn test_transactional_branches() {
    let cases = [
        ("Please pay your bill", Some(ActionButton::PAY_NOW), "Offer discounts for frequent bill payers."),
        ("Your recharge is due", Some(ActionButton::RECHARGE_NOW), "Offer recharge promotions for frequent shoppers."),
        ("book your ticket now", Some(ActionButton::BOOK_TICKETS), "Offer discounts for frequent ticket bookers."),
        ("thank you for your purchase", None, "Offer recurring payment discounts."),
        ("BILL", Some(ActionButton::PAY_NOW), "Offer discounts for frequent bill payers."),
        ("pay your recharge bill", Some(ActionButton::PAY_NOW), "Offer discounts for frequent bill payers."),
    ];

    for (message, action, expected) in cases {
        let suggestion = advise(Category::Transactional, message);
        assert_eq!(suggestion.primary_actions.first().copied(), action, "message: {}", message);
        assert_eq!(advice(&suggestion), expected, "message: {}", message);
    }
}

#[test]
fn test_every_label_has_a_category() {
    for label in 0..=6 {
        let category = resolve(label);
        assert_ne!(category, Category::Unknown);
        assert!(!advise(category, "any message").is_empty());
    }
    assert!(advise(resolve(7), "any message").is_empty());
}

#[test]
fn test_shared_actions() {
    // Power bills and bill-related transactions lead to the same portal
    assert_eq!(
        advise(Category::PowerBill, "").primary_actions,
        advise(Category::Transactional, "bill").primary_actions
    );
    assert_eq!(
        advise(Category::Recharge, "").primary_actions,
        vec![ActionButton::RECHARGE_NOW]
    );
}
