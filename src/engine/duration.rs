/// Concatenates every ASCII digit in `text` and parses the result as days.
///
/// "2 days 3 hours" therefore reads as 23. Only ASCII digits count, so
/// "٣ days" reads as 0. Input without digits, or with a digit run too large
/// for `u32`, reads as 0.
pub fn parse_duration_days(text: &str) -> u32 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}
