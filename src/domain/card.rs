//! Card number validation.

/// Shortest and longest accepted primary account numbers.
pub const MIN_CARD_DIGITS: usize = 13;
pub const MAX_CARD_DIGITS: usize = 19;

/// Returns true when `card_number` carries 13 to 19 digits that pass the Luhn
/// checksum.
///
/// Non-digit characters (spaces, dashes, stray letters) are ignored, so
/// `"4111 1111 1111 1111"` validates the same as `"4111111111111111"`.
pub fn validate_card(card_number: &str) -> bool {
    if card_number.trim().is_empty() {
        return false;
    }

    let digits: Vec<u32> = card_number.chars().filter_map(|c| c.to_digit(10)).collect();
    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) {
        return false;
    }

    luhn_sum(&digits) % 10 == 0
}

/// Luhn sum scanning from the rightmost digit, doubling every second one.
fn luhn_sum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum()
}
