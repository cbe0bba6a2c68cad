//! Classifier output to a 1–5 star scale, and per-article aggregation.

use crate::capabilities::SentimentPrediction;

/// Mapped value for any label other than POSITIVE/NEGATIVE.
pub const NEUTRAL_STARS: i32 = 3;

/// Map one classifier prediction onto the 1–5 star scale.
///
/// POSITIVE lands in {4, 5} and NEGATIVE in {1, 2} regardless of raw
/// confidence; the scale reads as a star rating, not a probability. Within a
/// bucket, higher confidence pushes POSITIVE toward 5 and NEGATIVE toward 1.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn star_rating(prediction: &SentimentPrediction) -> i32 {
    let confidence = prediction.confidence;
    match prediction.label.as_str() {
        "POSITIVE" => ((confidence * 5.0).round() as i32).clamp(4, 5),
        "NEGATIVE" => (((1.0 - confidence) * 5.0).round() as i32).clamp(1, 2),
        _ => NEUTRAL_STARS,
    }
}

/// Running sum of per-chunk star values for one article.
///
/// Chunks whose classification failed simply never call [`SentimentTally::add`];
/// an article where every chunk failed yields `None` from
/// [`SentimentTally::mean`].
#[derive(Debug, Default)]
pub struct SentimentTally {
    total: i64,
    scored_chunks: u32,
}

impl SentimentTally {
    pub fn add(&mut self, stars: i32) {
        self.total += i64::from(stars);
        self.scored_chunks += 1;
    }

    #[must_use]
    pub fn scored_chunks(&self) -> u32 {
        self.scored_chunks
    }

    /// Arithmetic mean rounded to the nearest integer; `None` when no chunk
    /// produced a value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<i32> {
        if self.scored_chunks == 0 {
            return None;
        }
        let mean = self.total as f64 / f64::from(self.scored_chunks);
        Some(mean.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(label: &str, confidence: f64) -> SentimentPrediction {
        SentimentPrediction {
            label: label.to_string(),
            confidence,
        }
    }

    #[test]
    fn positive_is_always_four_or_five() {
        for confidence in [0.0, 0.2, 0.5, 0.7, 0.9, 1.0] {
            let stars = star_rating(&prediction("POSITIVE", confidence));
            assert!((4..=5).contains(&stars), "confidence {confidence} gave {stars}");
        }
    }

    #[test]
    fn negative_is_always_one_or_two() {
        for confidence in [0.0, 0.3, 0.5, 0.8, 0.95, 1.0] {
            let stars = star_rating(&prediction("NEGATIVE", confidence));
            assert!((1..=2).contains(&stars), "confidence {confidence} gave {stars}");
        }
    }

    #[test]
    fn high_confidence_positive_maps_to_five() {
        assert_eq!(star_rating(&prediction("POSITIVE", 0.9)), 5);
        assert_eq!(star_rating(&prediction("POSITIVE", 1.0)), 5);
    }

    #[test]
    fn weak_positive_maps_to_four() {
        assert_eq!(star_rating(&prediction("POSITIVE", 0.6)), 4);
    }

    #[test]
    fn high_confidence_negative_maps_to_one() {
        assert_eq!(star_rating(&prediction("NEGATIVE", 0.8)), 1);
        assert_eq!(star_rating(&prediction("NEGATIVE", 1.0)), 1);
    }

    #[test]
    fn positive_mapping_is_monotonic_in_confidence() {
        let mut last = 0;
        for confidence in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let stars = star_rating(&prediction("POSITIVE", confidence));
            assert!(stars >= last, "stars dropped at confidence {confidence}");
            last = stars;
        }
    }

    #[test]
    fn other_labels_map_to_neutral() {
        assert_eq!(star_rating(&prediction("NEUTRAL", 0.99)), 3);
        assert_eq!(star_rating(&prediction("mixed", 0.1)), 3);
    }

    #[test]
    fn empty_tally_has_no_mean() {
        assert_eq!(SentimentTally::default().mean(), None);
    }

    #[test]
    fn mean_rounds_to_nearest_integer() {
        let mut tally = SentimentTally::default();
        tally.add(4);
        tally.add(5);
        // 4.5 rounds away from zero to 5.
        assert_eq!(tally.mean(), Some(5));

        let mut tally = SentimentTally::default();
        tally.add(1);
        tally.add(1);
        tally.add(2);
        // 4/3 rounds to 1.
        assert_eq!(tally.mean(), Some(1));
    }

    #[test]
    fn single_chunk_mean_is_its_value() {
        let mut tally = SentimentTally::default();
        tally.add(5);
        assert_eq!(tally.mean(), Some(5));
        assert_eq!(tally.scored_chunks(), 1);
    }
}
