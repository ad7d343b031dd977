//! Filter/order/limit queries over a collection.

use std::cmp::Ordering;

use chrono::DateTime;
use serde_json::Value;

use crate::document_store::r#trait::Document;

/// A single field predicate. Field paths may be dotted (`"customer.email"`).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    In(String, Vec<Value>),
    /// The field is an array containing the value.
    ArrayContains(String, Value),
}

impl Filter {
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::Eq(field, expected) => field_value(doc, field) == Some(expected),
            Filter::In(field, options) => {
                field_value(doc, field).is_some_and(|v| options.contains(v))
            }
            Filter::ArrayContains(field, expected) => match field_value(doc, field) {
                Some(Value::Array(values)) => values.contains(expected),
                _ => false,
            },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Query over one collection: all filters must match; documents missing the
/// order-by field are left out of ordered results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, SortDirection)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.into(), value.into()));
        self
    }

    pub fn filter_in(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.filters.push(Filter::In(field.into(), values));
        self
    }

    pub fn filter_array_contains(
        mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(Filter::ArrayContains(field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, doc: &Document) -> bool {
        let ordered_field_present = match &self.order_by {
            Some((field, _)) => field_value(doc, field).is_some(),
            None => true,
        };
        ordered_field_present && self.filters.iter().all(|f| f.matches(doc))
    }

    /// Compare two matching documents by the order-by field.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let Some((field, direction)) = &self.order_by else {
            return Ordering::Equal;
        };
        let ordering = match (field_value(a, field), field_value(b, field)) {
            (Some(a), Some(b)) => compare_values(a, b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Resolve a dotted field path inside a document.
pub fn field_value<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Total order across JSON values: null < bool < number < string < array < object.
///
/// Two RFC 3339 strings compare as instants, since serialized timestamps
/// carry a variable number of fractional digits.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => {
            match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
                (Ok(at_a), Ok(at_b)) => at_a.cmp(&at_b),
                _ => a.cmp(b),
            }
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn dotted_paths_reach_nested_fields() {
        let d = doc(json!({ "customer": { "email": "a@b.c" } }));
        assert_eq!(field_value(&d, "customer.email"), Some(&json!("a@b.c")));
        assert_eq!(field_value(&d, "customer.name"), None);
    }

    #[test]
    fn filters_combine_with_and() {
        let d = doc(json!({ "status": "PAID", "tags": ["gift"] }));
        let q = Query::new()
            .filter_eq("status", "PAID")
            .filter_array_contains("tags", "gift");
        assert!(q.matches(&d));
        assert!(!q.clone().filter_eq("status", "PENDING").matches(&d));
        assert!(Query::new()
            .filter_in("status", vec![json!("PENDING"), json!("PAID")])
            .matches(&d));
    }

    #[test]
    fn ordering_excludes_documents_without_the_field() {
        let q = Query::new().order_by("createdAt", SortDirection::Descending);
        assert!(!q.matches(&doc(json!({ "status": "PAID" }))));

        let older = doc(json!({ "createdAt": "2026-01-01T00:00:00Z" }));
        let newer = doc(json!({ "createdAt": "2026-02-01T00:00:00Z" }));
        assert_eq!(q.compare(&newer, &older), Ordering::Less);
    }

    #[test]
    fn timestamps_compare_as_instants() {
        let whole = json!("2026-03-01T10:00:00Z");
        let half = json!("2026-03-01T10:00:00.500Z");
        assert_eq!(compare_values(&whole, &half), Ordering::Less);
        assert_eq!(
            compare_values(&json!("2026-03-01T12:00:00+02:00"), &json!("2026-03-01T10:00:00.1Z")),
            Ordering::Less
        );
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare_values(&json!(9), &json!(10.5)), Ordering::Less);
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
    }
}
