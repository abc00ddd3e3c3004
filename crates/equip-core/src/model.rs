//! Equipment record and its write shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::{EquipmentId, Status, Timestamp};

/// A piece of inventory as stored by the resource collection.
///
/// Values of this type only come out of [`schema::validate_one`]
/// (or are built by hand in tests); the server owns the canonical copy.
///
/// [`schema::validate_one`]: crate::schema::validate_one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub category: String,
    pub status: Status,
    pub quantity: u32,
    pub storage_location: String,
    pub purchase_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields supplied by the client when registering equipment.
///
/// `id`, `createdAt` and `updatedAt` are deliberately absent: the server
/// assigns the id and the API layer stamps the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEquipment {
    pub name: String,
    pub category: String,
    pub status: Status,
    pub quantity: u32,
    pub storage_location: String,
    pub purchase_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewEquipment {
    /// Client-side form validation.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        require_name(&self.name)
    }
}

/// A partial update. Only `Some` fields are sent; the server leaves the
/// rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EquipmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EquipmentPatch {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Client-side form validation of the supplied fields.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        match &self.name {
            Some(name) => require_name(name),
            None => Ok(()),
        }
    }
}

fn require_name(name: &str) -> Result<(), InvalidInputError> {
    if name.trim().is_empty() {
        return Err(InvalidInputError::Field {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chair() -> NewEquipment {
        NewEquipment {
            name: "Chair".to_string(),
            category: "Furniture".to_string(),
            status: Status::Available,
            quantity: 5,
            storage_location: "RoomA".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            borrower: None,
            notes: None,
        }
    }

    #[test]
    fn new_equipment_uses_wire_field_names() {
        let value = serde_json::to_value(chair()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Chair",
                "category": "Furniture",
                "status": "利用可能",
                "quantity": 5,
                "storageLocation": "RoomA",
                "purchaseDate": "2024-01-01"
            })
        );
    }

    #[test]
    fn new_equipment_refuses_server_fields() {
        let result = serde_json::from_value::<NewEquipment>(json!({
            "id": "x",
            "name": "Chair",
            "category": "Furniture",
            "status": "利用可能",
            "quantity": 5,
            "storageLocation": "RoomA",
            "purchaseDate": "2024-01-01"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_name_fails_form_validation() {
        let mut form = chair();
        form.name = "   ".to_string();
        assert!(form.validate().is_err());
        assert!(chair().validate().is_ok());
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = EquipmentPatch {
            quantity: Some(2),
            borrower: Some("Sato".to_string()),
            status: Some(Status::OnLoan),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"quantity": 2, "borrower": "Sato", "status": "貸出中"})
        );
        assert!(!patch.is_empty());
        assert!(EquipmentPatch::default().is_empty());
    }

    #[test]
    fn patch_validation_checks_name_when_present() {
        let patch = EquipmentPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(EquipmentPatch::default().validate().is_ok());
    }
}
