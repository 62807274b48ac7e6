//! Card severity classification.

use crate::models::qualifier::{has_tag, Qualifier};
use crate::models::CardType;

/// Classify a card from its qualifier tags.
///
/// Priority is `Red` > `SecondYellow` > `Yellow`, regardless of tag order.
pub fn classify_card(qualifiers: &[Qualifier]) -> Option<CardType> {
    if has_tag(qualifiers, "Red") {
        Some(CardType::Red)
    } else if has_tag(qualifiers, "SecondYellow") {
        Some(CardType::SecondYellow)
    } else if has_tag(qualifiers, "Yellow") {
        Some(CardType::Yellow)
    } else {
        None
    }
}
