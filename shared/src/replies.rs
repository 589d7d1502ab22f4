//! Fixed assistant texts and lightweight markdown handling

use crate::models::Confidence;

pub const BOT_NAME: &str = "Ingres";

pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

pub const FORECAST_FAILED: &str =
    "I'm sorry, I couldn't generate a reliable forecast at this time.";

pub fn greeting() -> String {
    format!(
        "Hello! I am {}. How can I help you analyze groundwater data today? \
         You can ask me for suggestions, predictions, or to visualize data for a district.",
        BOT_NAME
    )
}

pub fn graph_caption(district: &str) -> String {
    format!("Visualizing data for {}", district)
}

pub fn no_data_found(district: &str) -> String {
    format!("Sorry, I couldn't find data for {}.", district)
}

pub fn forecast_pending(district: &str, year: i32) -> String {
    format!(
        "Hold on, I am running a forecast for {} for the year {}...",
        district, year
    )
}

pub fn forecast_ready(district: &str, year: i32, confidence: Confidence) -> String {
    format!(
        "Here is the forecast for {} for {}. My confidence in this forecast is **{}**.",
        district, year, confidence
    )
}

/// Render `**bold**` spans as `<strong>` after escaping HTML.
///
/// A span never crosses a line break; unmatched markers are kept literally.
pub fn render_emphasis(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();

    while let Some(open) = rest.find("**") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) if !after_open[..close].contains('\n') => {
                out.push_str("<strong>");
                out.push_str(&after_open[..close]);
                out.push_str("</strong>");
                rest = &after_open[close + 2..];
            }
            _ => {
                out.push_str("**");
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Drop `**` markers, e.g. before speaking a reply aloud
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_ready_marks_confidence_bold() {
        let text = forecast_ready("Chennai", 2026, Confidence::High);
        assert_eq!(
            text,
            "Here is the forecast for Chennai for 2026. My confidence in this forecast is **High**."
        );
    }

    #[test]
    fn test_render_emphasis() {
        assert_eq!(
            render_emphasis("Status is **Critical** now"),
            "Status is <strong>Critical</strong> now"
        );
        assert_eq!(
            render_emphasis("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_render_emphasis_escapes_html() {
        assert_eq!(
            render_emphasis("<b>**x & y**</b>"),
            "&lt;b&gt;<strong>x &amp; y</strong>&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_emphasis_keeps_unmatched_markers() {
        assert_eq!(render_emphasis("2 ** 3"), "2 ** 3");
        assert_eq!(render_emphasis("**a\nb**"), "**a\nb**");
    }

    #[test]
    fn test_strip_emphasis() {
        assert_eq!(strip_emphasis("confidence is **Low**."), "confidence is Low.");
    }
}
