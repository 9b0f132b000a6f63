use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub type FileId = String;

/// Type tags offered by the filter panel, in display order.
pub const FILE_TYPES: &[&str] = &["PDF", "MD", "TXT", "DOC", "XLS", "PPT", "IMG", "VID", "AUD"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
    pub path: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(rename = "modified")]
    pub modified_unix_ms: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    Any,
    Today,
    Week,
    Month,
    Year,
}

impl DateRange {
    pub const ALL: [DateRange; 5] = [
        DateRange::Any,
        DateRange::Today,
        DateRange::Week,
        DateRange::Month,
        DateRange::Year,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => Some(Self::Any),
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Any => "Any time",
            Self::Today => "Today",
            Self::Week => "This week",
            Self::Month => "This month",
            Self::Year => "This year",
        }
    }

    /// Trailing window length in days. `Today` is anchored to the calendar day instead.
    pub fn trailing_days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Year => Some(365),
            Self::Any | Self::Today => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub types: BTreeSet<String>,
    #[serde(default)]
    pub tag: String,
    #[serde(default, rename = "date")]
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn with_date_range(date_range: DateRange) -> Self {
        Self {
            date_range,
            ..Self::default()
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.types.is_empty() && self.tag.trim().is_empty() && self.date_range == DateRange::Any
    }

    /// Adds `file_type` when absent, removes it when present. Comparison ignores case.
    pub fn toggle_type(&mut self, file_type: &str) {
        let existing = self
            .types
            .iter()
            .find(|t| t.eq_ignore_ascii_case(file_type))
            .cloned();

        match existing {
            Some(current) => {
                self.types.remove(&current);
            }
            None => {
                self.types.insert(file_type.to_string());
            }
        }
    }

    pub fn has_type(&self, file_type: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(file_type))
    }
}
