// src/format.rs
//! Commentary formatting: rating extraction, star rendering, safe HTML.
//!
//! The analysis backend returns free text with lightweight markup
//! (`**bold**`, `*italic*`) and, usually, a score written as `X/10`
//! somewhere in the prose. Everything here is pure string work so the
//! same pipeline serves the HTTP API and the CLI.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// First `X/10` fraction in the text. The slash and surrounding spaces are
/// both optional, so "8/10", "8 / 10" and a bare "8 10" all count. ASCII
/// digits only (`\d` also matches Unicode digits `f64` cannot parse).
static RATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+(\.[0-9]+)?)\s*/?\s*10").expect("valid regex"));

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));

/// Pull the numeric rating out of commentary text.
///
/// Takes the first match, parses it as a float, and falls back to 0.0 when
/// the text never names a score. The value is reported as-is: a model that
/// writes "12/10" gets its 12 echoed back, only the star row is capped.
pub fn extract_rating(text: &str) -> f64 {
    RATING_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Render a five-star row for a 0-10 rating, e.g. `⭐⭐⭐⭐☆ (8/10)`.
///
/// Star count is `rating / 2` rounded to the nearest whole star and clamped
/// to the row; the textual fraction keeps the raw value.
pub fn render_stars(rating: f64) -> String {
    let filled = (rating / 2.0).round().clamp(0.0, 5.0) as u32;
    let mut stars = String::new();
    for i in 1..=5 {
        stars.push(if i <= filled { '⭐' } else { '☆' });
    }
    stars.push_str(&format!(" ({rating}/10)"));
    stars
}

/// Turn raw commentary into display-safe HTML.
///
/// Escapes first, then applies markup, so nothing the model writes can
/// smuggle tags through: `**…**` becomes `<b>`, `*…*` becomes `<i>`, and
/// newlines become `<br>`. Bold runs before italic so `**` pairs are not
/// eaten as two empty italics.
pub fn format_commentary(text: &str) -> String {
    let escaped = html_escape::encode_safe(text);
    let bolded = BOLD_RE.replace_all(&escaped, "<b>${1}</b>");
    let styled = ITALIC_RE.replace_all(&bolded, "<i>${1}</i>");
    styled.replace('\n', "<br>")
}

/// Everything derived from one round of commentary, ready to serve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Raw commentary as the backend produced it.
    pub text: String,
    /// Extracted 0-10 score (0.0 when the text carries none).
    pub rating: f64,
    /// Star row with the textual fraction, e.g. `⭐⭐⭐⭐☆ (8/10)`.
    pub stars: String,
    /// Escaped + formatted HTML rendering of `text`.
    pub html: String,
}

impl AnalysisReport {
    /// Derive rating, stars and HTML from raw commentary.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let rating = extract_rating(&text);
        Self {
            rating,
            stars: render_stars(rating),
            html: format_commentary(&text),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_rating_plain() {
        assert_eq!(extract_rating("Solid work, 8/10 overall."), 8.0);
    }

    #[test]
    fn test_extract_rating_decimal_and_spacing() {
        assert_eq!(extract_rating("I'd say 7.5 / 10"), 7.5);
        assert_eq!(extract_rating("Rating: 9/10"), 9.0);
        // The slash itself is optional
        assert_eq!(extract_rating("a clean 8 10"), 8.0);
    }

    #[test]
    fn test_extract_rating_first_match_wins() {
        assert_eq!(extract_rating("6/10 for pose, 9/10 for light"), 6.0);
    }

    #[test]
    fn test_extract_rating_absent() {
        assert_eq!(extract_rating("lovely colours, no score given"), 0.0);
        assert_eq!(extract_rating(""), 0.0);
    }

    #[test]
    fn test_extract_rating_skips_non_ascii_digits() {
        // U+0668 ARABIC-INDIC EIGHT is a Unicode digit but not an f64;
        // it must not shadow a later ASCII score
        assert_eq!(extract_rating("٨/10 overall, but really 7/10"), 7.0);
        assert_eq!(extract_rating("٨/10"), 0.0);
    }

    #[test]
    fn test_render_stars_rounding() {
        assert_eq!(render_stars(8.0), "⭐⭐⭐⭐☆ (8/10)");
        // 7/2 = 3.5 rounds up to four stars
        assert_eq!(render_stars(7.0), "⭐⭐⭐⭐☆ (7/10)");
        assert_eq!(render_stars(10.0), "⭐⭐⭐⭐⭐ (10/10)");
        assert_eq!(render_stars(0.0), "☆☆☆☆☆ (0/10)");
    }

    #[test]
    fn test_render_stars_keeps_decimal_in_fraction() {
        assert_eq!(render_stars(7.5), "⭐⭐⭐⭐☆ (7.5/10)");
    }

    #[test]
    fn test_render_stars_clamps_row_not_fraction() {
        assert_eq!(render_stars(20.0), "⭐⭐⭐⭐⭐ (20/10)");
    }

    #[test]
    fn test_format_commentary_markup() {
        assert_eq!(
            format_commentary("**Nice** *shot*\nKeep it up"),
            "<b>Nice</b> <i>shot</i><br>Keep it up"
        );
    }

    #[test]
    fn test_format_commentary_escapes_before_markup() {
        let html = format_commentary("<script>alert(1)</script> **bold**");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<b>bold</b>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_format_commentary_escapes_quotes_and_amp() {
        let html = format_commentary(r#"say "cheese" & smile"#);
        assert!(html.contains("&quot;cheese&quot;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn test_format_commentary_stray_asterisk_left_alone() {
        assert_eq!(format_commentary("rated * highly"), "rated * highly");
    }

    #[test]
    fn test_report_from_text() {
        let report = AnalysisReport::from_text("Score: 8/10. **Great** framing.");
        assert_eq!(report.rating, 8.0);
        assert!(report.stars.starts_with("⭐⭐⭐⭐☆"));
        assert!(report.html.contains("<b>Great</b>"));
        assert_eq!(report.text, "Score: 8/10. **Great** framing.");
    }
}
