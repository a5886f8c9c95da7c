//! LLM-judge score parsing

use super::entities::Score;
use crate::core::error::ParseError;
use serde_json::Value;

/// Criteria scored by the judge when none are configured
pub const DEFAULT_JUDGE_CRITERIA: [&str; 3] = ["relevance", "creativity", "practicality"];

/// Extract one score per criterion from the judge's JSON reply.
///
/// The reply must be a JSON object (optionally fenced). Values may be numbers
/// or numeric strings and are clamped to `[0, 1]`. A missing or non-numeric
/// criterion fails the parse, which lets the retry wrapper ask again. An
/// `explanation` string, when present, becomes the comment of every score.
pub fn parse_judge_scores(text: &str, criteria: &[String]) -> Result<Vec<Score>, ParseError> {
    let json: Value = serde_json::from_str(extract_object(text))?;
    let obj = json
        .as_object()
        .ok_or_else(|| ParseError::new("judge reply must be a JSON object"))?;

    let explanation = obj.get("explanation").and_then(|v| v.as_str());

    criteria
        .iter()
        .map(|criterion| {
            let raw = obj
                .get(criterion)
                .ok_or_else(|| ParseError::new(format!("missing criterion '{}'", criterion)))?;
            let value = match raw {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ParseError::new(format!("criterion '{}' is not a number: {}", criterion, raw))
            })?;
            let score = Score::new(criterion.clone(), value.clamp(0.0, 1.0));
            Ok(match explanation {
                Some(text) => score.with_comment(text),
                None => score,
            })
        })
        .collect()
}

/// Slice from the first `{` to the last `}`, or the whole text
fn extract_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> Vec<String> {
        DEFAULT_JUDGE_CRITERIA.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_scores() {
        let scores = parse_judge_scores(
            r#"{"relevance": 0.9, "creativity": "0.4", "practicality": 1}"#,
            &criteria(),
        )
        .unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].name, "relevance");
        assert_eq!(scores[0].value, 0.9);
        assert_eq!(scores[1].value, 0.4);
        assert_eq!(scores[2].value, 1.0);
    }

    #[test]
    fn test_clamps_and_ignores_surrounding_text() {
        let scores = parse_judge_scores(
            "Verdict:\n```json\n{\"relevance\": 1.7, \"creativity\": -2, \"practicality\": 0.5}\n```",
            &criteria(),
        )
        .unwrap();
        assert_eq!(scores[0].value, 1.0);
        assert_eq!(scores[1].value, 0.0);
    }

    #[test]
    fn test_explanation_becomes_comment() {
        let scores = parse_judge_scores(
            r#"{"relevance": 1, "creativity": 1, "practicality": 1, "explanation": "Menu cohérent"}"#,
            &criteria(),
        )
        .unwrap();
        assert!(scores.iter().all(|s| s.comment.as_deref() == Some("Menu cohérent")));
    }

    #[test]
    fn test_missing_criterion() {
        let err = parse_judge_scores(r#"{"relevance": 0.5}"#, &criteria()).unwrap_err();
        assert_eq!(err.message, "missing criterion 'creativity'");
    }

    #[test]
    fn test_not_json() {
        assert!(parse_judge_scores("great menu, 9/10", &criteria()).is_err());
        assert!(parse_judge_scores("[0.5]", &criteria()).is_err());
        assert!(
            parse_judge_scores(
                r#"{"relevance": "high", "creativity": 0, "practicality": 0}"#,
                &criteria()
            )
            .is_err()
        );
    }
}
