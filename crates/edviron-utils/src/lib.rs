//! Utility functions and helpers

use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Format an integer string with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Format a money amount, e.g. `₹1,250.00`
pub fn format_amount(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    let rounded = amount.round_dp(decimal_places);
    let text = format!("{:.*}", decimal_places as usize, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest.to_string()),
        None => ("", int_part),
    };

    match frac_part {
        Some(frac) => format!("{}{}{}.{}", sign, symbol, format_number(digits), frac),
        None => format!("{}{}{}", sign, symbol, format_number(digits)),
    }
}

/// Escape text for safe inclusion in HTML bodies and single- or double-quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Upper-case the first character ("pending" -> "Pending")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID (millisecond timestamp plus a process-wide sequence)
pub fn generate_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", now, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-45000), "-45,000");
    }

    #[test]
    fn test_format_amount() {
        let d = Decimal::from_str("1250").unwrap();
        assert_eq!(format_amount(d, "₹", 2), "₹1,250.00");

        let d = Decimal::from_str("99.999").unwrap();
        assert_eq!(format_amount(d, "₹", 2), "₹100.00");

        let d = Decimal::from_str("-1500.5").unwrap();
        assert_eq!(format_amount(d, "$", 1), "-$1,500.5");

        let d = Decimal::from_str("42").unwrap();
        assert_eq!(format_amount(d, "", 0), "42");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("upi"), "Upi");
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}
