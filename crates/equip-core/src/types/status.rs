//! Equipment status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Lifecycle status of a piece of equipment.
///
/// On the wire each status is a fixed label shared with the existing service.
/// Any other value is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// In use by its owner.
    #[serde(rename = "使用中")]
    InUse,
    /// Lent out to a borrower.
    #[serde(rename = "貸出中")]
    OnLoan,
    /// Available for use or loan.
    #[serde(rename = "利用可能")]
    Available,
    /// Disposed of.
    #[serde(rename = "廃棄")]
    Disposed,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 4] = [
        Status::InUse,
        Status::OnLoan,
        Status::Available,
        Status::Disposed,
    ];

    /// Wire label of this status.
    pub fn label(self) -> &'static str {
        match self {
            Status::InUse => "使用中",
            Status::OnLoan => "貸出中",
            Status::Available => "利用可能",
            Status::Disposed => "廃棄",
        }
    }

    /// ASCII keyword accepted on the command line.
    pub fn keyword(self) -> &'static str {
        match self {
            Status::InUse => "in-use",
            Status::OnLoan => "on-loan",
            Status::Available => "available",
            Status::Disposed => "disposed",
        }
    }

    /// Look up a status by its exact wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Whether a borrower is expected alongside this status.
    ///
    /// Advisory only; nothing rejects a record that disagrees.
    pub fn expects_borrower(self) -> bool {
        self == Status::OnLoan
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses either the wire label or the ASCII keyword.
impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|st| st.keyword().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| -> Error {
                InvalidInputError::Status {
                    value: s.to_string(),
                }
                .into()
            })
    }
}
