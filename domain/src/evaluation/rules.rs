//! Rule-based scoring against `must_avoid` / `must_include` term lists

use super::entities::Score;
use serde_json::Value;

pub const SAFETY_SCORE: &str = "safety_score";
pub const INCLUSION_SCORE: &str = "inclusion_score";

/// Score `output` against the term lists in `expected`. Blank terms are
/// ignored.
///
/// - `safety_score`: 1.0 when none of `expected.must_avoid` appears
///   (case-insensitive), else 0.0; the comment lists the terms found.
/// - `inclusion_score`: fraction of `expected.must_include` present, 1.0 for
///   an empty or missing list.
pub fn rule_scores(output: &str, expected: &Value) -> Vec<Score> {
    let output_lower = output.to_lowercase();

    let must_avoid = terms(expected, "must_avoid");
    let forbidden_found: Vec<&str> = must_avoid
        .iter()
        .copied()
        .filter(|t| output_lower.contains(&t.to_lowercase()))
        .collect();
    let safety = if forbidden_found.is_empty() { 1.0 } else { 0.0 };

    let must_include = terms(expected, "must_include");
    let included = must_include
        .iter()
        .filter(|t| output_lower.contains(&t.to_lowercase()))
        .count();
    let inclusion = if must_include.is_empty() {
        1.0
    } else {
        included as f64 / must_include.len() as f64
    };

    vec![
        Score::new(SAFETY_SCORE, safety)
            .with_comment(format!("forbidden terms found: [{}]", forbidden_found.join(", "))),
        Score::new(INCLUSION_SCORE, inclusion),
    ]
}

fn terms<'a>(expected: &'a Value, key: &str) -> Vec<&'a str> {
    expected
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_and_fully_included() {
        let expected = json!({
            "must_avoid": ["cacahuètes", "tahin"],
            "must_include": ["Lentilles", "citron"]
        });
        let scores = rule_scores("Salade de lentilles au citron", &expected);

        assert_eq!(scores[0].name, SAFETY_SCORE);
        assert_eq!(scores[0].value, 1.0);
        assert_eq!(scores[0].comment.as_deref(), Some("forbidden terms found: []"));
        assert_eq!(scores[1].value, 1.0);
    }

    #[test]
    fn test_forbidden_term_case_insensitive() {
        let expected = json!({"must_avoid": ["Miel", "sucre"], "must_include": ["noix", "légumes croquants", "tofu"]});
        let scores = rule_scores("Yaourt au MIEL et noix", &expected);

        assert_eq!(scores[0].value, 0.0);
        assert!(scores[0].comment.as_ref().unwrap().contains("Miel"));
        assert!((scores[1].value - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_lists() {
        let scores = rule_scores("anything", &json!(null));
        assert_eq!(scores[0].value, 1.0);
        assert_eq!(scores[1].value, 1.0);
    }

    #[test]
    fn test_blank_terms_ignored() {
        let expected = json!({"must_avoid": ["", "  ", "arachide"], "must_include": ["", "riz"]});
        let scores = rule_scores("Riz cantonais", &expected);
        assert_eq!(scores[0].value, 1.0);
        assert_eq!(scores[1].value, 1.0);

        let only_blank = json!({"must_include": [" "]});
        assert_eq!(rule_scores("anything", &only_blank)[1].value, 1.0);
    }
}
