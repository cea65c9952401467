//! Review verdicts and their display texts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Reviewer decision on a homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }
}

impl FromStr for Verdict {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(AppError::parse_status(format!(
                "unknown status code '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed mapping from verdict code to the text shown in chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictTable {
    #[serde(default = "defaults::approved")]
    pub approved: String,
    #[serde(default = "defaults::reviewing")]
    pub reviewing: String,
    #[serde(default = "defaults::rejected")]
    pub rejected: String,
}

impl Default for VerdictTable {
    fn default() -> Self {
        Self {
            approved: defaults::approved(),
            reviewing: defaults::reviewing(),
            rejected: defaults::rejected(),
        }
    }
}

impl VerdictTable {
    /// Text for a verdict.
    pub fn message(&self, verdict: Verdict) -> &str {
        match verdict {
            Verdict::Approved => &self.approved,
            Verdict::Reviewing => &self.reviewing,
            Verdict::Rejected => &self.rejected,
        }
    }

    /// Text for a raw status code, if the code is known.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        code.parse::<Verdict>().ok().map(|v| self.message(v))
    }

    pub fn validate(&self) -> Result<()> {
        for verdict in [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected] {
            if self.message(verdict).trim().is_empty() {
                return Err(AppError::validation(format!(
                    "verdicts.{verdict} is empty"
                )));
            }
        }
        Ok(())
    }
}

mod defaults {
    pub fn approved() -> String {
        "The work has been reviewed: the reviewer liked everything. Hooray!".into()
    }
    pub fn reviewing() -> String {
        "The work has been taken for review.".into()
    }
    pub fn rejected() -> String {
        "The work has been reviewed: the reviewer has comments.".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!("approved".parse::<Verdict>().unwrap(), Verdict::Approved);
        assert_eq!("reviewing".parse::<Verdict>().unwrap(), Verdict::Reviewing);
        assert_eq!("rejected".parse::<Verdict>().unwrap(), Verdict::Rejected);
    }

    #[test]
    fn rejects_unknown_and_miscased_codes() {
        assert!(matches!(
            "pending".parse::<Verdict>(),
            Err(AppError::ParseStatus(_))
        ));
        assert!("Approved".parse::<Verdict>().is_err());
        assert!("".parse::<Verdict>().is_err());
    }

    #[test]
    fn lookup_returns_table_text() {
        let table = VerdictTable::default();
        assert_eq!(table.lookup("approved"), Some(table.approved.as_str()));
        assert_eq!(table.lookup("unknown"), None);
    }

    #[test]
    fn validate_rejects_blank_text() {
        let table = VerdictTable {
            reviewing: " ".into(),
            ..VerdictTable::default()
        };
        assert!(table.validate().is_err());
    }
}
