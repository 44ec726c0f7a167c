//! Number, size, and date formatting shared by every section.

use chrono::DateTime;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable size with one decimal, base 1024.
///
/// # Examples
///
/// ```
/// use truckstat_report::format::format_size;
///
/// assert_eq!(format_size(0), "0.0 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}

/// Integer with `,` thousands separators.
///
/// # Examples
///
/// ```
/// use truckstat_report::format::with_thousands;
///
/// assert_eq!(with_thousands(999), "999");
/// assert_eq!(with_thousands(1_234_567), "1,234,567");
/// ```
pub fn with_thousands(n: u64) -> String {
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

/// UTC calendar date of a Unix timestamp, `YYYY-MM-DD`.
///
/// Timestamps outside chrono's range fall back to the raw number.
///
/// # Examples
///
/// ```
/// use truckstat_report::format::format_date;
///
/// assert_eq!(format_date(1_700_000_000), "2023-11-14");
/// ```
pub fn format_date(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| epoch.to_string())
}

/// `part` as a percentage of `whole`, `0.0` when `whole` is zero.
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}
