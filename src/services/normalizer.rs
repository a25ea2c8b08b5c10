//! Coerces loosely shaped model output into `BookRecommendation` records.
//!
//! Models are allowed to return items in three shapes, tried in this order:
//! a JSON object with the record's fields, an ordered array
//! `[title, author?, genres?, score?]`, or a bare string title. Anything
//! else is skipped without aborting the batch.

use crate::models::BookRecommendation;
use serde_json::Value;
use tracing::trace;

/// Normalize a batch of raw items to at most `limit` records.
///
/// Only the first `limit` raw items are considered; items skipped as
/// unparseable are not backfilled from the remainder, so the result may be
/// shorter than `limit` even when more raw items were available.
pub fn normalize(raw: &[Value], limit: usize) -> Vec<BookRecommendation> {
    raw.iter().take(limit).filter_map(normalize_item).collect()
}

fn normalize_item(item: &Value) -> Option<BookRecommendation> {
    match item {
        Value::Object(_) => match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                trace!(%err, "skipping object-shaped item");
                None
            }
        },
        Value::Array(fields) => normalize_positional(fields),
        Value::String(title) => Some(BookRecommendation::title_only(title.clone())),
        _ => {
            trace!("skipping item of unrecognized shape");
            None
        }
    }
}

/// Positional form: `[title, author?, genres?, score?]`. The title must be
/// a string; trailing fields are optional and `null` means absent.
fn normalize_positional(fields: &[Value]) -> Option<BookRecommendation> {
    let title = fields.first()?.as_str()?.to_string();

    let author = match fields.get(1) {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => return None,
    };

    let genres = match fields.get(2) {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_genres(value)?),
    };

    let score = match fields.get(3) {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_score(value)?),
    };

    Some(BookRecommendation {
        title,
        author,
        genres,
        score,
    })
}

fn parse_genres(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(
            s.split(',')
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
        ),
        Value::Array(items) => items
            .iter()
            .map(|g| g.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

fn parse_score(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_item_maps_field_by_field() {
        let raw = vec![json!({
            "title": "The Little Guide to Feeling Good",
            "author": "A. Author",
            "genres": ["self-help"],
            "score": 0.9,
            "isbn": "ignored-unknown-field"
        })];

        let parsed = normalize(&raw, 5);
        assert_eq!(
            parsed,
            vec![BookRecommendation {
                title: "The Little Guide to Feeling Good".to_string(),
                author: Some("A. Author".to_string()),
                genres: Some(vec!["self-help".to_string()]),
                score: Some(0.9),
            }]
        );
    }

    #[test]
    fn positional_item_maps_by_position() {
        let raw = vec![json!(["Title X", "Author Y", ["genre1"], 0.73])];

        let parsed = normalize(&raw, 5);
        assert_eq!(
            parsed,
            vec![BookRecommendation {
                title: "Title X".to_string(),
                author: Some("Author Y".to_string()),
                genres: Some(vec!["genre1".to_string()]),
                score: Some(0.73),
            }]
        );
    }

    #[test]
    fn short_positional_item_leaves_trailing_fields_absent() {
        let parsed = normalize(&[json!(["Only a Title"])], 5);
        assert_eq!(parsed, vec![BookRecommendation::title_only("Only a Title")]);
    }

    #[test]
    fn null_score_is_preserved_as_absent() {
        let parsed = normalize(&[json!(["Title", "Author", null, null])], 5);
        assert_eq!(parsed[0].score, None);
        assert_eq!(parsed[0].genres, None);
    }

    #[test]
    fn bare_string_becomes_title_only() {
        let parsed = normalize(&[json!("Just a Title")], 5);
        assert_eq!(parsed, vec![BookRecommendation::title_only("Just a Title")]);
    }

    #[test]
    fn unrecognized_shapes_are_skipped_without_aborting() {
        let raw = vec![
            json!(true),
            json!("Survivor"),
            json!(3.5),
            json!({ "no_title": "here" }),
            json!([42, "title not first"]),
        ];

        let parsed = normalize(&raw, 10);
        assert_eq!(parsed, vec![BookRecommendation::title_only("Survivor")]);
    }

    #[test]
    fn unparseable_score_skips_the_item() {
        let parsed = normalize(&[json!(["Title", "Author", null, "not-a-number"])], 5);
        assert!(parsed.is_empty());
    }

    #[test]
    fn truncation_happens_before_parsing() {
        // The bad item occupies one of the two considered slots, so only a
        // single record comes back even though a third, valid item exists.
        let raw = vec![json!("First"), json!(false), json!("Third")];
        let parsed = normalize(&raw, 2);
        assert_eq!(parsed, vec![BookRecommendation::title_only("First")]);
    }

    #[test]
    fn result_never_exceeds_limit() {
        let raw: Vec<Value> = (0..20).map(|i| json!(format!("Book {i}"))).collect();
        assert_eq!(normalize(&raw, 5).len(), 5);
    }
}
