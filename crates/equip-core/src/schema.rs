//! Runtime validation of untyped API payloads.
//!
//! The resource collection is not trusted to return well-formed records, so
//! every response body goes through [`validate_one`] or [`validate_many`]
//! before it reaches a caller. Checks are explicit per-field predicates; all
//! offending fields are collected rather than stopping at the first.

use std::fmt;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::model::Equipment;
use crate::types::{EquipmentId, Status, Timestamp};

/// A payload that does not conform to the equipment shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    fn new(issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// Every problem found, in field order.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Paths of the offending fields (`status`, `[2].quantity`, `$` for the
    /// payload itself).
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|i| i.field.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Path of the field within the payload.
    pub field: String,
    /// What is wrong with it.
    pub problem: Problem,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Kind of validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Required field is absent.
    Missing,
    /// Field has the wrong JSON type.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// Field holds a value outside its enumeration.
    NotAllowed { value: String },
    /// Field has the right type but an unusable value.
    Invalid { reason: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Missing => f.write_str("required field is missing"),
            Problem::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Problem::NotAllowed { value } => {
                let allowed: Vec<_> = Status::ALL.iter().map(|s| s.label()).collect();
                write!(f, "'{value}' is not one of {}", allowed.join(", "))
            }
            Problem::Invalid { reason } => f.write_str(reason),
        }
    }
}

/// Validate a single equipment payload.
pub fn validate_one(payload: &Value) -> Result<Equipment, ValidationError> {
    let mut issues = Vec::new();
    match check_record(payload, "", &mut issues) {
        Some(record) if issues.is_empty() => Ok(record),
        _ => Err(ValidationError::new(issues)),
    }
}

/// Validate an array of equipment payloads, preserving order.
///
/// Fails if the payload is not an array or if any element fails; issues from
/// every failing element are reported with an `[index]` prefix.
pub fn validate_many(payload: &Value) -> Result<Vec<Equipment>, ValidationError> {
    let Some(items) = payload.as_array() else {
        return Err(ValidationError::new(vec![FieldIssue {
            field: "$".to_string(),
            problem: Problem::WrongType {
                expected: "array",
                found: kind(payload),
            },
        }]));
    };

    let mut issues = Vec::new();
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if let Some(record) = check_record(item, &format!("[{index}]"), &mut issues) {
            records.push(record);
        }
    }

    if issues.is_empty() {
        Ok(records)
    } else {
        Err(ValidationError::new(issues))
    }
}

fn check_record(payload: &Value, prefix: &str, issues: &mut Vec<FieldIssue>) -> Option<Equipment> {
    let Some(obj) = payload.as_object() else {
        issues.push(FieldIssue {
            field: if prefix.is_empty() { "$" } else { prefix }.to_string(),
            problem: Problem::WrongType {
                expected: "object",
                found: kind(payload),
            },
        });
        return None;
    };

    let mut c = Checker {
        obj,
        prefix,
        issues,
    };

    let id = c.id();
    let name = c.name();
    let category = c.string("category");
    let status = c.status();
    let quantity = c.quantity();
    let storage_location = c.string("storageLocation");
    let purchase_date = c.date("purchaseDate");
    let borrower = c.optional_string("borrower");
    let created_at = c.timestamp("createdAt");
    let updated_at = c.timestamp("updatedAt");
    let notes = c.optional_string("notes");

    Some(Equipment {
        id: id?,
        name: name?,
        category: category?,
        status: status?,
        quantity: quantity?,
        storage_location: storage_location?,
        purchase_date: purchase_date?,
        borrower: borrower?,
        created_at: created_at?,
        updated_at: updated_at?,
        notes: notes?,
    })
}

/// Field predicates over one JSON object. Each returns `None` after
/// recording an issue.
struct Checker<'a> {
    obj: &'a Map<String, Value>,
    prefix: &'a str,
    issues: &'a mut Vec<FieldIssue>,
}

impl<'a> Checker<'a> {
    fn fail<T>(&mut self, field: &str, problem: Problem) -> Option<T> {
        let field = if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        };
        self.issues.push(FieldIssue { field, problem });
        None
    }

    fn required(&mut self, field: &str) -> Option<&'a Value> {
        let obj = self.obj;
        match obj.get(field) {
            Some(value) => Some(value),
            None => self.fail(field, Problem::Missing),
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let value = self.required(field)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => self.wrong_type(field, "string", value),
        }
    }

    /// Absent is valid; present must be a string.
    fn optional_string(&mut self, field: &str) -> Option<Option<String>> {
        let obj = self.obj;
        match obj.get(field) {
            None => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => self.wrong_type(field, "string", other),
        }
    }

    fn id(&mut self) -> Option<EquipmentId> {
        let raw = self.string("id")?;
        match EquipmentId::new(raw) {
            Ok(id) => Some(id),
            Err(_) => self.fail(
                "id",
                Problem::Invalid {
                    reason: "must not be empty".to_string(),
                },
            ),
        }
    }

    fn name(&mut self) -> Option<String> {
        let name = self.string("name")?;
        if name.is_empty() {
            return self.fail(
                "name",
                Problem::Invalid {
                    reason: "must not be empty".to_string(),
                },
            );
        }
        Some(name)
    }

    fn status(&mut self) -> Option<Status> {
        let label = self.string("status")?;
        match Status::from_label(&label) {
            Some(status) => Some(status),
            None => self.fail("status", Problem::NotAllowed { value: label }),
        }
    }

    fn quantity(&mut self) -> Option<u32> {
        let value = self.required("quantity")?;
        let Some(number) = value.as_number() else {
            return self.wrong_type("quantity", "number", value);
        };

        let whole = if let Some(n) = number.as_u64() {
            Some(n)
        } else if number.as_i64().is_some() {
            None
        } else {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u64)
        };

        match whole.and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => self.fail(
                "quantity",
                Problem::Invalid {
                    reason: format!("{number} is not a non-negative whole count"),
                },
            ),
        }
    }

    fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let raw = self.string(field)?;
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) if raw.len() == 10 => Some(date),
            _ => self.fail(
                field,
                Problem::Invalid {
                    reason: format!("'{raw}' is not a YYYY-MM-DD date"),
                },
            ),
        }
    }

    fn timestamp(&mut self, field: &str) -> Option<Timestamp> {
        let raw = self.string(field)?;
        match Timestamp::parse(&raw) {
            Ok(ts) => Some(ts),
            Err(_) => self.fail(
                field,
                Problem::Invalid {
                    reason: format!("'{raw}' is not an ISO-8601 timestamp"),
                },
            ),
        }
    }

    fn wrong_type<T>(&mut self, field: &str, expected: &'static str, found: &Value) -> Option<T> {
        self.fail(
            field,
            Problem::WrongType {
                expected,
                found: kind(found),
            },
        )
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "id": "eq-001",
            "name": "Projector",
            "category": "OA機器",
            "status": "貸出中",
            "quantity": 2,
            "storageLocation": "Cabinet 3",
            "purchaseDate": "2023-04-01",
            "borrower": "Tanaka",
            "createdAt": "2024-01-01T09:00:00.000Z",
            "updatedAt": "2024-02-01T09:00:00.000Z",
            "notes": "HDMI only"
        })
    }

    fn without(field: &str) -> Value {
        let mut value = payload();
        value.as_object_mut().unwrap().remove(field);
        value
    }

    fn with(field: &str, v: Value) -> Value {
        let mut value = payload();
        value.as_object_mut().unwrap().insert(field.to_string(), v);
        value
    }

    fn fields(err: &ValidationError) -> Vec<&str> {
        err.fields().collect()
    }

    #[test]
    fn valid_payload_round_trips() {
        let record = validate_one(&payload()).unwrap();
        assert_eq!(record.id.as_str(), "eq-001");
        assert_eq!(record.status, Status::OnLoan);
        assert_eq!(record.borrower.as_deref(), Some("Tanaka"));
        assert_eq!(serde_json::to_value(&record).unwrap(), payload());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut value = without("borrower");
        value.as_object_mut().unwrap().remove("notes");
        let record = validate_one(&value).unwrap();
        assert!(record.borrower.is_none());
        assert!(record.notes.is_none());
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn every_required_field_is_checked() {
        for field in [
            "id",
            "name",
            "category",
            "status",
            "quantity",
            "storageLocation",
            "purchaseDate",
            "createdAt",
            "updatedAt",
        ] {
            let err = validate_one(&without(field)).unwrap_err();
            assert_eq!(fields(&err), vec![field], "missing {field}");
            assert_eq!(err.issues()[0].problem, Problem::Missing);
        }
    }

    #[test]
    fn status_outside_enumeration_fails() {
        for bad in ["available", "貸出", "", "使用中 "] {
            let err = validate_one(&with("status", json!(bad))).unwrap_err();
            assert_eq!(fields(&err), vec!["status"]);
            assert!(matches!(err.issues()[0].problem, Problem::NotAllowed { .. }));
        }
    }

    #[test]
    fn all_statuses_are_accepted() {
        for status in Status::ALL {
            let record = validate_one(&with("status", json!(status.label()))).unwrap();
            assert_eq!(record.status, status);
        }
    }

    #[test]
    fn wrong_primitive_types_fail() {
        let err = validate_one(&with("quantity", json!("2"))).unwrap_err();
        assert_eq!(
            err.issues()[0].problem,
            Problem::WrongType {
                expected: "number",
                found: "string"
            }
        );

        let err = validate_one(&with("name", json!(42))).unwrap_err();
        assert_eq!(fields(&err), vec!["name"]);

        let err = validate_one(&with("borrower", Value::Null)).unwrap_err();
        assert_eq!(fields(&err), vec!["borrower"]);
    }

    #[test]
    fn quantity_must_be_a_whole_non_negative_count() {
        assert_eq!(validate_one(&with("quantity", json!(0))).unwrap().quantity, 0);
        assert_eq!(validate_one(&with("quantity", json!(3.0))).unwrap().quantity, 3);
        assert!(validate_one(&with("quantity", json!(-1))).is_err());
        assert!(validate_one(&with("quantity", json!(1.5))).is_err());
        assert!(validate_one(&with("quantity", json!(u64::MAX))).is_err());
    }

    #[test]
    fn dates_and_timestamps_are_parsed() {
        assert!(validate_one(&with("purchaseDate", json!("2023/04/01"))).is_err());
        assert!(validate_one(&with("purchaseDate", json!("2023-02-30"))).is_err());
        assert!(validate_one(&with("createdAt", json!("last week"))).is_err());
    }

    #[test]
    fn server_text_is_echoed_unchanged() {
        let mut value = with("id", json!(" 12"));
        let obj = value.as_object_mut().unwrap();
        obj.insert("createdAt".to_string(), json!("2024-01-01T09:00:00"));
        obj.insert("updatedAt".to_string(), json!("2024-01-01T18:00:00+09:00"));

        let record = validate_one(&value).unwrap();
        assert_eq!(record.id.as_str(), " 12");
        assert_eq!(serde_json::to_value(&record).unwrap(), value);

        let records = validate_many(&json!([payload(), value])).unwrap();
        assert_eq!(records[1].id.as_str(), " 12");
    }

    #[test]
    fn empty_id_fails() {
        let err = validate_one(&with("id", json!(""))).unwrap_err();
        assert_eq!(fields(&err), vec!["id"]);
        assert_eq!(
            err.issues()[0].problem,
            Problem::Invalid {
                reason: "must not be empty".to_string()
            }
        );
    }

    #[test]
    fn empty_name_fails() {
        let err = validate_one(&with("name", json!(""))).unwrap_err();
        assert_eq!(fields(&err), vec!["name"]);
    }

    #[test]
    fn reports_every_offending_field() {
        let mut value = with("status", json!("lost"));
        value.as_object_mut().unwrap().remove("category");
        let err = validate_one(&value).unwrap_err();
        assert_eq!(fields(&err), vec!["category", "status"]);
        let message = err.to_string();
        assert!(message.contains("category"));
        assert!(message.contains("status"));
    }

    #[test]
    fn non_object_payload_fails() {
        let err = validate_one(&json!([payload()])).unwrap_err();
        assert_eq!(fields(&err), vec!["$"]);
    }

    #[test]
    fn validate_many_requires_an_array() {
        for bad in [payload(), json!(null), json!("[]"), json!({"equipments": []})] {
            let err = validate_many(&bad).unwrap_err();
            assert_eq!(fields(&err), vec!["$"]);
        }
    }

    #[test]
    fn validate_many_preserves_order() {
        let second = with("id", json!("eq-002"));
        let records = validate_many(&json!([second, payload()])).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["eq-002", "eq-001"]);
        assert!(validate_many(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn validate_many_fails_if_any_element_fails() {
        let err = validate_many(&json!([payload(), without("status"), payload()])).unwrap_err();
        assert_eq!(fields(&err), vec!["[1].status"]);

        let err = validate_many(&json!([payload(), 7])).unwrap_err();
        assert_eq!(fields(&err), vec!["[1]"]);
    }
}
