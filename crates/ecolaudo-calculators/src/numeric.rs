//! Tolerant numeric parsing for form inputs.

/// Parse the leading decimal number of a string, ignoring whatever follows
/// ("120 mmHg" → 120.0, "1.20.8" → 1.2). Returns `None` when the string
/// does not start with a number.
pub fn parse_leading_f64(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for c in trimmed.chars() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end += c.len_utf8();
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end += c.len_utf8();
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].trim_end_matches('.').parse().ok()
}
