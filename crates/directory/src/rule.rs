use serde::{Deserialize, Serialize};

use staffhub_auth::Role;
use staffhub_core::{DomainError, DomainResult};

use crate::{Department, FieldSet, ProfileField};

/// Composite key of a permission rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub viewer_role: Role,
    pub target_department: Department,
}

impl RuleKey {
    pub fn new(viewer_role: Role, target_department: Department) -> Self {
        Self {
            viewer_role,
            target_department,
        }
    }
}

impl core::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} -> {}", self.viewer_role, self.target_department)
    }
}

/// One cell of the visibility matrix.
///
/// # Invariants
/// - `target_department` is a known department.
/// - When `can_view` is false, `visible_fields` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    pub viewer_role: Role,
    pub target_department: Department,
    pub can_view: bool,
    #[serde(default)]
    pub visible_fields: FieldSet,
}

impl PermissionRule {
    /// Build a validated, normalised rule.
    pub fn new(
        viewer_role: Role,
        target_department: Department,
        can_view: bool,
        visible_fields: FieldSet,
    ) -> DomainResult<Self> {
        let rule = Self {
            viewer_role,
            target_department,
            can_view,
            visible_fields,
        };
        rule.validate()?;
        Ok(rule.normalized())
    }

    pub fn key(&self) -> RuleKey {
        RuleKey::new(self.viewer_role, self.target_department)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.target_department.is_known() {
            return Err(DomainError::validation(format!(
                "rule for role '{}' targets an unknown department",
                self.viewer_role
            )));
        }
        Ok(())
    }

    /// Drop field grants from a rule that does not allow viewing.
    pub fn normalized(mut self) -> Self {
        if !self.can_view {
            self.visible_fields = FieldSet::empty();
        }
        self
    }

    /// Fields this rule grants, or `None` when the rule denies.
    ///
    /// Stored field lists are ignored for denying rules even if storage still
    /// carries a stale list.
    pub fn granted_fields(&self) -> Option<&FieldSet> {
        self.can_view.then_some(&self.visible_fields)
    }
}

/// Untyped rule as submitted by an editor; parsed into a [`PermissionRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    #[serde(default)]
    pub viewer_role: Option<String>,
    #[serde(default)]
    pub target_department: Option<String>,
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub visible_fields: Vec<String>,
}

impl RuleDraft {
    pub fn into_rule(self) -> DomainResult<PermissionRule> {
        let role = self
            .viewer_role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| DomainError::validation("viewer_role is required"))?;
        let role: Role = role.parse().map_err(|e| DomainError::validation(format!("{e}")))?;

        let department = self
            .target_department
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| DomainError::validation("target_department is required"))?;
        let department = Department::parse(department);

        let mut fields = FieldSet::empty();
        for name in &self.visible_fields {
            let field = ProfileField::ALL
                .into_iter()
                .find(|f| f.as_str() == name.trim())
                .ok_or_else(|| DomainError::validation(format!("unknown field '{name}'")))?;
            fields.insert(field);
        }

        PermissionRule::new(role, department, self.can_view, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denying_rule_drops_fields() {
        let rule = PermissionRule::new(
            Role::Rmt,
            Department::Finance,
            false,
            FieldSet::from([ProfileField::Phone]),
        )
        .unwrap();
        assert!(rule.visible_fields.is_empty());
        assert_eq!(rule.granted_fields(), None);
    }

    #[test]
    fn granted_fields_ignores_stale_list_on_deny() {
        // As if loaded from storage without normalisation.
        let stale = PermissionRule {
            viewer_role: Role::Rmt,
            target_department: Department::Finance,
            can_view: false,
            visible_fields: FieldSet::all(),
        };
        assert_eq!(stale.granted_fields(), None);
    }

    #[test]
    fn unknown_department_is_a_validation_error() {
        let err = PermissionRule::new(Role::Rmt, Department::Unknown, true, FieldSet::empty()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn draft_requires_composite_key() {
        let draft = RuleDraft {
            target_department: Some("clinical".to_string()),
            can_view: true,
            ..Default::default()
        };
        assert_eq!(
            draft.into_rule(),
            Err(DomainError::validation("viewer_role is required"))
        );
    }

    #[test]
    fn drafted_rule_and_stored_profile_agree_on_department() {
        let draft = RuleDraft {
            viewer_role: Some("rmt".to_string()),
            target_department: Some("Clinical".to_string()),
            can_view: true,
            visible_fields: vec![],
        };
        let rule = draft.into_rule().unwrap();

        let profile: crate::StaffProfile = serde_json::from_str(
            r#"{"id":"0192b3c4-0000-7000-8000-000000000001","full_name":"Dana Lee","department":"Clinical"}"#,
        )
        .unwrap();

        assert_eq!(rule.target_department, Department::Clinical);
        assert_eq!(profile.department, rule.target_department);
    }

    #[test]
    fn draft_parses_into_rule() {
        let draft = RuleDraft {
            viewer_role: Some("rmt".to_string()),
            target_department: Some("clinical".to_string()),
            can_view: true,
            visible_fields: vec!["bio".to_string()],
        };
        let rule = draft.into_rule().unwrap();
        assert_eq!(rule.key(), RuleKey::new(Role::Rmt, Department::Clinical));
        assert_eq!(rule.visible_fields, FieldSet::from([ProfileField::Bio]));
    }

    #[test]
    fn draft_rejects_unknown_field_and_role() {
        let draft = RuleDraft {
            viewer_role: Some("rmt".to_string()),
            target_department: Some("clinical".to_string()),
            can_view: true,
            visible_fields: vec!["salary".to_string()],
        };
        assert!(matches!(draft.into_rule(), Err(DomainError::Validation(m)) if m.contains("salary")));

        let draft = RuleDraft {
            viewer_role: Some("wizard".to_string()),
            target_department: Some("clinical".to_string()),
            ..Default::default()
        };
        assert!(draft.into_rule().is_err());
    }
}
