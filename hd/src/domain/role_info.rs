//! Role extraction fields collected across conversation turns

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The three fields required before a posting can be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleField {
    JobRole,
    Location,
    CompanyName,
}

impl RoleField {
    /// All fields, in the order they are asked for
    pub const ALL: [RoleField; 3] = [RoleField::JobRole, RoleField::Location, RoleField::CompanyName];

    /// Human-readable field name for follow-up questions
    pub fn name(&self) -> &'static str {
        match self {
            RoleField::JobRole => "job role",
            RoleField::Location => "location",
            RoleField::CompanyName => "company name",
        }
    }
}

impl std::fmt::Display for RoleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Job details extracted from the conversation
///
/// Each field is optional until populated. Fields are filled monotonically:
/// merging never clears a value, only an explicit later extraction overwrites
/// one. Empty or whitespace-only strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleInfo {
    pub job_role: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
}

impl RoleInfo {
    /// Merge newly extracted fields into this one
    ///
    /// A field is taken from `extracted` only when it is present and
    /// non-empty; existing values are never cleared.
    pub fn merge(&mut self, extracted: &RoleInfo) {
        debug!(?extracted, "RoleInfo::merge: called");
        if filled(&extracted.job_role) {
            self.job_role = extracted.job_role.clone();
        }
        if filled(&extracted.location) {
            self.location = extracted.location.clone();
        }
        if filled(&extracted.company_name) {
            self.company_name = extracted.company_name.clone();
        }
    }

    /// Are all three fields populated?
    pub fn is_complete(&self) -> bool {
        filled(&self.job_role) && filled(&self.location) && filled(&self.company_name)
    }

    /// Which fields are still missing, in ask order
    pub fn missing_fields(&self) -> Vec<RoleField> {
        let mut missing = Vec::new();
        if !filled(&self.job_role) {
            missing.push(RoleField::JobRole);
        }
        if !filled(&self.location) {
            missing.push(RoleField::Location);
        }
        if !filled(&self.company_name) {
            missing.push(RoleField::CompanyName);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_empty_role_info_missing_all_fields() {
        let info = RoleInfo::default();
        assert!(!info.is_complete());
        assert_eq!(
            info.missing_fields(),
            vec![RoleField::JobRole, RoleField::Location, RoleField::CompanyName]
        );
    }

    #[test]
    fn test_merge_fills_missing_fields() {
        let mut info = RoleInfo {
            job_role: some("Marketing Manager"),
            ..Default::default()
        };
        info.merge(&RoleInfo {
            location: some("London"),
            company_name: some("Acme Corp"),
            ..Default::default()
        });

        assert!(info.is_complete());
        assert_eq!(info.location.as_deref(), Some("London"));
    }

    #[test]
    fn test_merge_never_clears_existing_values() {
        let mut info = RoleInfo {
            job_role: some("Data Engineer"),
            location: some("NYC"),
            company_name: some("Acme"),
        };
        info.merge(&RoleInfo::default());

        assert!(info.is_complete());
        assert_eq!(info.job_role.as_deref(), Some("Data Engineer"));
    }

    #[test]
    fn test_merge_overwrites_on_explicit_extraction() {
        let mut info = RoleInfo {
            location: some("NYC"),
            ..Default::default()
        };
        info.merge(&RoleInfo {
            location: some("Remote"),
            ..Default::default()
        });

        assert_eq!(info.location.as_deref(), Some("Remote"));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let info = RoleInfo {
            job_role: some(""),
            location: some("  "),
            company_name: some("Acme"),
        };
        assert!(!info.is_complete());
        assert_eq!(info.missing_fields(), vec![RoleField::JobRole, RoleField::Location]);
    }

    #[test]
    fn test_merge_ignores_empty_string_extraction() {
        let mut info = RoleInfo {
            job_role: some("Data Engineer"),
            ..Default::default()
        };
        info.merge(&RoleInfo {
            job_role: some(""),
            ..Default::default()
        });

        assert_eq!(info.job_role.as_deref(), Some("Data Engineer"));
    }
}
