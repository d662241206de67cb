//! Initial value parsing.
//!
//! Each argument may hold several whitespace-separated integers. Parsing is
//! lenient: a token is read as an optional sign followed by leading digits,
//! anything after them is ignored, and a token without digits reads as 0.
//! Out-of-range values saturate at the `i32` bounds.

/// Parse every integer in `args`, in order. The first becomes the top of A.
pub fn parse_numbers<S: AsRef<str>>(args: &[S]) -> Vec<i32> {
    args.iter().flat_map(|arg| arg.as_ref().split_ascii_whitespace().map(parse_int)).collect()
}

/// Parse one token leniently.
pub fn parse_int(token: &str) -> i32 {
    let bytes = token.as_bytes();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let limit = i64::from(i32::MAX) + 1;
    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(limit));

    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or_default()
}
