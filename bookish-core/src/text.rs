//! Text helpers: query sanitizing, category clean-up and number display

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s+]+").expect("valid regex"));

/// Turn free text into a catalog query string.
///
/// Leading and trailing whitespace is trimmed, every remaining run of
/// whitespace and `+` collapses to a single `+`. Everything else, including
/// punctuation and digits, passes through untouched.
///
/// ```
/// use bookish_core::text::sanitize;
///
/// assert_eq!(sanitize("  harry potter  "), "harry+potter");
/// assert_eq!(sanitize("harry++potter"), "harry+potter");
/// assert_eq!(sanitize("   "), "");
/// ```
pub fn sanitize(text: &str) -> String {
    SEPARATOR_RUN.replace_all(text.trim(), "+").into_owned()
}

/// Flatten catalog categories such as `"Fiction / Fantasy / Epic"` into a
/// de-duplicated list, preserving first-seen order
pub fn clean_categories<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
    let mut seen = Vec::new();
    for part in categories
        .iter()
        .flat_map(|c| c.as_ref().split(" / "))
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        if !seen.iter().any(|s: &String| s == part) {
            seen.push(part.to_string());
        }
    }
    seen
}

/// Display form of [`clean_categories`]: `"Fiction, Fantasy, Epic"`
pub fn genre_line<S: AsRef<str>>(categories: &[S]) -> Option<String> {
    let cleaned = clean_categories(categories);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join(", "))
    }
}

/// `1234` -> `"1,234"`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Page totals: plain with separators up to 9,999, abbreviated above (`12k`, `3m`)
pub fn format_compact(n: u64) -> String {
    if n <= 9_999 {
        return format_thousands(n);
    }

    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "b"), (1_000_000, "m"), (1_000, "k")];

    let mut result = format_thousands(n);
    for (i, (scale, suffix)) in UNITS.iter().enumerate() {
        if n >= *scale {
            let rounded = (n as f64 / *scale as f64).round() as u64;
            // 999_600 rounds to 1000k; promote to the next unit
            result = if rounded >= 1_000 && i > 0 {
                let (_, bigger) = UNITS[i - 1];
                format!("1{}", bigger)
            } else {
                format!("{}{}", rounded, suffix)
            };
            break;
        }
    }
    result
}
