//! Field flags shared by `create` and `edit`.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::de::DeserializeOwned;

use equip_core::{EquipmentPatch, InvalidInputError, NewEquipment, Status};

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Equipment name
    #[arg(long)]
    pub name: Option<String>,

    /// Category (e.g. Furniture)
    #[arg(long)]
    pub category: Option<String>,

    /// Status: 使用中, 貸出中, 利用可能, 廃棄 or in-use, on-loan, available, disposed
    #[arg(long)]
    pub status: Option<Status>,

    /// Number of units
    #[arg(long)]
    pub quantity: Option<u32>,

    /// Storage location
    #[arg(long)]
    pub location: Option<String>,

    /// Purchase date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub purchase_date: Option<NaiveDate>,

    /// Person currently using or borrowing the equipment
    #[arg(long)]
    pub borrower: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl FieldArgs {
    /// Build a full registration form; every field but borrower and notes
    /// is required.
    pub fn into_new(self) -> Result<NewEquipment> {
        Ok(NewEquipment {
            name: self.name.context("--name is required")?,
            category: self.category.context("--category is required")?,
            status: self.status.context("--status is required")?,
            quantity: self.quantity.context("--quantity is required")?,
            storage_location: self.location.context("--location is required")?,
            purchase_date: self.purchase_date.context("--purchase-date is required")?,
            borrower: self.borrower,
            notes: self.notes,
        })
    }

    pub fn into_patch(self) -> EquipmentPatch {
        EquipmentPatch {
            name: self.name,
            category: self.category,
            status: self.status,
            quantity: self.quantity,
            storage_location: self.location,
            purchase_date: self.purchase_date,
            borrower: self.borrower,
            notes: self.notes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.quantity.is_none()
            && self.location.is_none()
            && self.purchase_date.is_none()
            && self.borrower.is_none()
            && self.notes.is_none()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, InvalidInputError> {
    let invalid = |reason: String| InvalidInputError::Date {
        value: s.to_string(),
        reason,
    };

    if s.len() != 10 {
        return Err(invalid("expected YYYY-MM-DD".to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| invalid(e.to_string()))
}

/// Read a JSON document from a file, or stdin for `-`.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        let content = std::fs::read_to_string(path).context("Failed to read JSON file")?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("2024-01-15").is_ok());
        assert!(parse_date("2024-1-15").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("15/01/2024").is_err());
    }

    #[test]
    fn new_requires_core_fields() {
        let args = FieldArgs {
            name: Some("Chair".to_string()),
            ..Default::default()
        };
        let err = args.into_new().unwrap_err();
        assert_eq!(err.to_string(), "--category is required");
    }

    #[test]
    fn patch_carries_only_supplied_fields() {
        let args = FieldArgs {
            quantity: Some(7),
            ..Default::default()
        };
        assert!(!args.is_empty());

        let patch = args.into_patch();
        assert_eq!(patch.quantity, Some(7));
        assert_eq!(
            patch,
            EquipmentPatch {
                quantity: Some(7),
                ..Default::default()
            }
        );
        assert!(FieldArgs::default().is_empty());
    }
}
