use chrono::NaiveDate;

/// Cell values the spreadsheet emits for "no data". All of them clean
/// to zero. Checked after trimming, before any parse attempt.
pub const MISSING_MARKERS: [&str; 3] = ["#N/A", "-", "nan"];

/// Clean a textual numeric cell into an `f64`.
///
/// Empty and whitespace-only cells and the [`MISSING_MARKERS`] become
/// `0.0`. Anything else has thousands separators and currency symbols
/// stripped and is parsed; an unparseable remainder becomes `NaN` for
/// the caller to collapse with [`coalesce`]. Never panics.
#[must_use]
pub fn normalize_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        return 0.0;
    }

    let cleaned: String = trimmed.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    cleaned.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Collapse NaN and infinities to zero.
///
/// Aggregation and filtering always apply `coalesce(normalize_number(..))`,
/// so every number downstream of the services is finite.
#[must_use]
pub fn coalesce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Canonicalize a stock code: trim, drop the ".0" suffix a
/// numeric-typed spreadsheet cell leaves behind, left-pad with zeros
/// to a minimum width of 4.
///
/// "50" and "50.0" both become "0050"; "006208" stays as-is.
/// Idempotent, and applied identically to every feed's code column and
/// to codes submitted through the write client, so joins by code
/// succeed regardless of each feed's formatting.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    format!("{stripped:0>4}")
}

/// Parse a feed date in either of the formats the sheet emits
/// (`YYYY-MM-DD` or `YYYY/MM/DD`, zero-padding optional).
#[must_use]
pub fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .ok()
}
