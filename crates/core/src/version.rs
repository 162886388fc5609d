//! Version records for refined prompts
//!
//! Each refinement produces a new version whose label and scores depend only
//! on how many versions came before it.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Labels for the first versions; later versions reuse the last one.
pub const VERSION_LABELS: [&str; 5] = ["Raw", "Structured", "Optimized", "Refined", "Enhanced"];

/// Upper bound for clarity and structure scores.
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ambiguity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub clarity: u8,
    pub structure: u8,
    pub ambiguity: Ambiguity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: usize,
    pub label: String,
    pub prompt: String,
    pub timestamp: String,
    pub scores: Scores,
}

/// Label for the 1-based version number `n`.
pub fn version_label(n: usize) -> &'static str {
    let index = n.saturating_sub(1).min(VERSION_LABELS.len() - 1);
    VERSION_LABELS[index]
}

/// Scores for the 1-based version number `n`.
pub fn version_scores(n: usize) -> Scores {
    let n = n.min(MAX_SCORE as usize) as u8;
    let ambiguity = match n {
        0 | 1 => Ambiguity::High,
        2 => Ambiguity::Medium,
        _ => Ambiguity::Low,
    };

    Scores {
        clarity: (6 + n).min(MAX_SCORE),
        structure: (7 + n).min(MAX_SCORE),
        ambiguity,
    }
}

/// Build the version that follows `previous_versions` earlier ones.
///
/// The timestamp is `at` rendered as `HH:MM` in its own time zone.
pub fn build_version<Tz>(previous_versions: usize, prompt: String, at: &DateTime<Tz>) -> Version
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let n = previous_versions.saturating_add(1);

    Version {
        id: n,
        label: version_label(n).to_string(),
        prompt,
        timestamp: at.format("%H:%M").to_string(),
        scores: version_scores(n),
    }
}

/// Fill ratio of a score bar, in percent.
pub fn score_percentage(value: u8) -> f64 {
    f64::from(value) * 100.0 / f64::from(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    // ============================================================================
    // build_version tests
    // ============================================================================

    #[test]
    fn test_build_version_first() {
        let version = build_version(0, "prompt".to_string(), &at());
        assert_eq!(version.id, 1);
        assert_eq!(version.label, "Raw");
        assert_eq!(version.prompt, "prompt");
        assert_eq!(version.timestamp, "14:05");
        assert_eq!(
            version.scores,
            Scores {
                clarity: 7,
                structure: 8,
                ambiguity: Ambiguity::High
            }
        );
    }

    #[test]
    fn test_build_version_second_is_medium() {
        let version = build_version(1, String::new(), &at());
        assert_eq!(version.id, 2);
        assert_eq!(version.label, "Structured");
        assert_eq!(version.scores.clarity, 8);
        assert_eq!(version.scores.structure, 9);
        assert_eq!(version.scores.ambiguity, Ambiguity::Medium);
    }

    #[test]
    fn test_build_version_third_is_low() {
        let version = build_version(2, String::new(), &at());
        assert_eq!(version.label, "Optimized");
        assert_eq!(version.scores.structure, 10);
        assert_eq!(version.scores.ambiguity, Ambiguity::Low);
    }

    #[test]
    fn test_build_version_scores_clamp() {
        let version = build_version(40, String::new(), &at());
        assert_eq!(version.id, 41);
        assert_eq!(version.label, "Enhanced");
        assert_eq!(version.scores.clarity, 10);
        assert_eq!(version.scores.structure, 10);
        assert_eq!(version.scores.ambiguity, Ambiguity::Low);
    }

    #[test]
    fn test_build_version_saturates_at_max() {
        let version = build_version(usize::MAX, String::new(), &at());
        assert_eq!(version.id, usize::MAX);
        assert_eq!(version.label, "Enhanced");
        assert_eq!(version.scores.clarity, 10);
    }

    #[test]
    fn test_build_version_timestamp_uses_offset() {
        let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let version = build_version(0, String::new(), &at().with_timezone(&offset));
        assert_eq!(version.timestamp, "16:05");
    }

    // ============================================================================
    // label / score helpers
    // ============================================================================

    #[test]
    fn test_version_label_sequence() {
        let labels: Vec<_> = (1..=6).map(version_label).collect();
        assert_eq!(
            labels,
            vec!["Raw", "Structured", "Optimized", "Refined", "Enhanced", "Enhanced"]
        );
    }

    #[test]
    fn test_version_label_zero_is_raw() {
        assert_eq!(version_label(0), "Raw");
    }

    #[test]
    fn test_score_percentage() {
        assert_eq!(score_percentage(10), 100.0);
        assert_eq!(score_percentage(7), 70.0);
        assert_eq!(score_percentage(0), 0.0);
    }
}
