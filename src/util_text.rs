//! Unit formatting for rendered explorer output.

use chrono::{Local, TimeZone, Utc};

/// Thousands-separated integer: 2600000 -> "2,600,000"
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Byte size in 1024 steps with two decimals: 31457280 -> "30.00 MB"
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Fraction as a percentage with four decimals: 0.9998 -> "99.9800%"
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.4}%", fraction * 100.0)
}

/// Shorten a hash to "first10...last10"; 20 chars or fewer come back verbatim
pub fn truncate_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= 20 {
        return hash.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{head}...{tail}")
}

/// ZEC amount with a grouped integer part and trailing zeros trimmed
pub fn format_zec(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.8}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let grouped = group_digits(int_part);
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped} ZEC")
    } else {
        format!("{sign}{grouped}.{frac} ZEC")
    }
}

/// Signed pool delta: positive values keep an explicit "+"
pub fn format_zec_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{}", format_zec(delta))
    } else {
        format_zec(delta)
    }
}

/// Unix seconds to local wall-clock time
pub fn format_timestamp(secs: i64) -> String {
    let dt = Utc
        .timestamp_opt(secs, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
    dt.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
