//! Raw entry bodies to clean, minimum-length summaries.

use crate::pipeline::SkipReason;

/// The cleaned text of one entry, in both stored and processed forms.
#[derive(Debug, Clone)]
pub struct NormalizedSummary {
    /// Cleaned text with the padding passage appended until the word floor
    /// is met. All chunking and model passes run over this.
    pub padded: String,
    /// Cleaned text before padding; the preferred form for storage.
    pub original: String,
}

impl NormalizedSummary {
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.padded.split_whitespace().count()
    }
}

/// Strip markup from a raw entry body and enforce the minimum word floor.
///
/// # Errors
///
/// Returns [`SkipReason::EmptySummary`] when nothing survives tag stripping,
/// or [`SkipReason::UnderMinimumWords`] when the text stays below
/// `min_words` after padding (only possible with an empty padding passage).
pub fn normalize_summary(
    raw_html: &str,
    min_words: usize,
    padding: &str,
) -> Result<NormalizedSummary, SkipReason> {
    let original = collapse_whitespace(&strip_html(raw_html));
    if original.is_empty() {
        return Err(SkipReason::EmptySummary);
    }

    let padding = padding.trim();
    let mut padded = original.clone();
    let mut words = padded.split_whitespace().count();
    while words < min_words && !padding.is_empty() {
        padded.push(' ');
        padded.push_str(padding);
        words = padded.split_whitespace().count();
    }

    if words < min_words {
        return Err(SkipReason::UnderMinimumWords { words });
    }

    Ok(NormalizedSummary { padded, original })
}

/// Strip HTML tags from a string, returning plain text.
///
/// A removed tag leaves a space between its neighbors so block boundaries
/// don't glue words together, except when the next character is clinging
/// punctuation (`</b>.` must stay `today.`, not `today .`).
pub(crate) fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut at_tag_boundary = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                at_tag_boundary = true;
            }
            _ if in_tag => {}
            _ => {
                if at_tag_boundary && !ch.is_whitespace() && !clings_to_previous_word(ch) {
                    result.push(' ');
                }
                at_tag_boundary = false;
                result.push(ch);
            }
        }
    }
    result
}

fn clings_to_previous_word(ch: char) -> bool {
    matches!(ch, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']')
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PADDING: &str = "Background context filler passage for short summaries.";

    #[test]
    fn strips_markup_and_collapses_whitespace() {
        let result = normalize_summary("<p>RBI  cut \n rates <b>today</b>.</p>", 1, PADDING)
            .expect("normalizes");
        assert_eq!(result.original, "RBI cut rates today.");
    }

    #[test]
    fn inline_markup_keeps_punctuation_attached() {
        let result = normalize_summary(
            "<p>Rates fell <b>today</b>, and <i>banks</i> cheered.</p>",
            1,
            PADDING,
        )
        .expect("normalizes");
        assert_eq!(result.original, "Rates fell today, and banks cheered.");
    }

    #[test]
    fn adjacent_tags_still_separate_words() {
        let result =
            normalize_summary("<h1>Headline</h1><p>Body text.</p>", 1, PADDING).expect("normalizes");
        assert_eq!(result.original, "Headline Body text.");
    }

    #[test]
    fn empty_body_is_rejected() {
        let result = normalize_summary("<p>   </p>", 100, PADDING);
        assert!(matches!(result, Err(SkipReason::EmptySummary)));
    }

    #[test]
    fn markup_only_body_is_rejected() {
        let result = normalize_summary("<div><img src=\"x.png\"/></div>", 100, PADDING);
        assert!(matches!(result, Err(SkipReason::EmptySummary)));
    }

    #[test]
    fn short_summary_is_padded_to_the_floor() {
        let result = normalize_summary("Five words in this summary.", 100, PADDING)
            .expect("padding fills the floor");
        assert!(result.word_count() >= 100);
        assert_eq!(result.original, "Five words in this summary.");
        assert!(result.padded.starts_with("Five words in this summary."));
        assert!(result.padded.contains("filler passage"));
    }

    #[test]
    fn padding_is_idempotent_at_the_floor() {
        let long_body = "word ".repeat(150);
        let result = normalize_summary(&long_body, 100, PADDING).expect("normalizes");
        // Already at the floor: padded text is identical to the original.
        assert_eq!(result.padded, result.original);
        assert_eq!(result.word_count(), 150);

        // Re-running normalization over its own output changes nothing.
        let again = normalize_summary(&result.padded, 100, PADDING).expect("normalizes");
        assert_eq!(again.padded, result.padded);
    }

    #[test]
    fn empty_padding_under_floor_is_rejected() {
        let result = normalize_summary("too short", 100, "");
        assert!(matches!(
            result,
            Err(SkipReason::UnderMinimumWords { words: 2 })
        ));
    }

    #[test]
    fn original_never_contains_padding() {
        let result = normalize_summary("Tiny.", 100, PADDING).expect("normalizes");
        assert_eq!(result.original, "Tiny.");
        assert!(!result.original.contains("filler"));
    }
}
