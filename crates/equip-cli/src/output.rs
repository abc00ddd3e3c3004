//! Output formatting helpers.

use anyhow::Result;
use chrono::Local;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use equip_core::{Equipment, Notifier, Status, Timestamp};

/// Shown in place of an empty borrower.
pub const NO_BORROWER: &str = "not registered";

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Routes API notifications to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify_success(&self, message: &str) {
        success(message);
    }

    fn notify_failure(&self, message: &str) {
        error(message);
    }
}

/// The status label in its display color.
pub fn status(status: Status) -> ColoredString {
    let label = status.label();
    match status {
        Status::InUse => label.blue(),
        Status::OnLoan => label.yellow(),
        Status::Available => label.green(),
        Status::Disposed => label.red().dimmed(),
    }
}

/// Format a timestamp in local time as `YYYY/MM/DD HH:MM`.
pub fn local_time(ts: &Timestamp) -> String {
    ts.as_datetime()
        .with_timezone(&Local)
        .format("%Y/%m/%d %H:%M")
        .to_string()
}

/// The borrower, or a placeholder that stands out when the status says
/// someone should have it.
fn borrower(record: &Equipment) -> ColoredString {
    match record.borrower.as_deref() {
        Some(name) if !name.is_empty() => name.normal(),
        _ if record.status.expects_borrower() => NO_BORROWER.yellow(),
        _ => NO_BORROWER.dimmed(),
    }
}

/// Print a record as a detail card.
pub fn equipment(record: &Equipment) {
    println!("{}  {}", record.name.bold(), status(record.status));
    println!();
    field("ID", record.id.as_str());
    field("Category", &record.category);
    field("Quantity", &record.quantity.to_string());
    field("Storage location", &record.storage_location);
    field("Borrower", &borrower(record).to_string());
    field("Purchase date", &record.purchase_date.format("%Y/%m/%d").to_string());
    field("Registered", &local_time(&record.created_at));
    field("Updated", &local_time(&record.updated_at));
    if let Some(notes) = record.notes.as_deref().filter(|n| !n.is_empty()) {
        field("Notes", notes);
    }
}

/// Print records as an aligned table. The status column comes last since
/// its labels are double-width.
pub fn table(records: &[Equipment]) {
    let width = |f: fn(&Equipment) -> String, header: &str| {
        records
            .iter()
            .map(|r| f(r).chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0)
    };

    let id_w = width(|r| r.id.to_string(), "ID");
    let name_w = width(|r| r.name.clone(), "NAME");
    let cat_w = width(|r| r.category.clone(), "CATEGORY");
    let qty_w = width(|r| r.quantity.to_string(), "QTY");
    let loc_w = width(|r| r.storage_location.clone(), "LOCATION");

    let header = format!(
        "{:id_w$}  {:name_w$}  {:cat_w$}  {:>qty_w$}  {:loc_w$}  STATUS",
        "ID", "NAME", "CATEGORY", "QTY", "LOCATION"
    );
    println!("{}", header.dimmed());

    for r in records {
        println!(
            "{:id_w$}  {:name_w$}  {:cat_w$}  {:>qty_w$}  {:loc_w$}  {}",
            r.id.as_str(),
            r.name,
            r.category,
            r.quantity,
            r.storage_location,
            status(r.status)
        );
    }
}
