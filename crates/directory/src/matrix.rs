use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use staffhub_auth::Role;
use staffhub_core::DomainResult;

use crate::{Department, FieldSet, PermissionRule, RuleKey};

/// Outcome of a matrix lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "access", content = "visible_fields", rename_all = "snake_case")]
pub enum Access {
    Denied,
    Granted(FieldSet),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Role × department visibility matrix.
///
/// Total over every (role, department) pair: a pair without a stored rule,
/// or with a department this build does not know, is [`Access::Denied`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    rules: BTreeMap<RuleKey, PermissionRule>,
}

/// One row of the rendered matrix, including implicit denies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub viewer_role: Role,
    pub target_department: Department,
    pub can_view: bool,
    pub visible_fields: FieldSet,
    /// False when no rule is stored and the cell is an implicit deny.
    pub explicit: bool,
}

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored rules. Later rules for the same key win; rules
    /// targeting an unknown department are skipped.
    pub fn from_rules(rules: impl IntoIterator<Item = PermissionRule>) -> Self {
        let mut matrix = Self::new();
        for rule in rules {
            if let Err(e) = matrix.upsert(rule) {
                tracing::warn!("skipping stored permission rule: {e}");
            }
        }
        matrix
    }

    /// Insert or replace the rule at its composite key (last writer wins).
    pub fn upsert(&mut self, rule: PermissionRule) -> DomainResult<PermissionRule> {
        rule.validate()?;
        let rule = rule.normalized();
        self.rules.insert(rule.key(), rule.clone());
        Ok(rule)
    }

    pub fn rule(&self, key: RuleKey) -> Option<&PermissionRule> {
        self.rules.get(&key)
    }

    pub fn rules(&self) -> impl Iterator<Item = &PermissionRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Access for a single role.
    pub fn access(&self, role: Role, department: Department) -> Access {
        if !department.is_known() {
            return Access::Denied;
        }
        match self
            .rules
            .get(&RuleKey::new(role, department))
            .and_then(PermissionRule::granted_fields)
        {
            Some(fields) => Access::Granted(fields.clone()),
            None => Access::Denied,
        }
    }

    /// Access for a viewer holding several roles.
    ///
    /// Union semantics: granted when any role is granted; the visible fields
    /// are the union over the granting roles only.
    pub fn access_for_any<'a>(&self, roles: impl IntoIterator<Item = &'a Role>, department: Department) -> Access {
        let mut granted: Option<FieldSet> = None;
        for role in roles {
            if let Access::Granted(fields) = self.access(*role, department) {
                granted.get_or_insert_with(FieldSet::empty).extend_from(&fields);
            }
        }
        granted.map_or(Access::Denied, Access::Granted)
    }

    /// Every role × known department cell, in a stable order.
    pub fn grid(&self) -> Vec<MatrixCell> {
        let mut cells = Vec::with_capacity(Role::ALL.len() * Department::KNOWN.len());
        for role in Role::ALL {
            for department in Department::KNOWN {
                let stored = self.rules.get(&RuleKey::new(role, department));
                let access = self.access(role, department);
                let (can_view, visible_fields) = match access {
                    Access::Granted(fields) => (true, fields),
                    Access::Denied => (false, FieldSet::empty()),
                };
                cells.push(MatrixCell {
                    viewer_role: role,
                    target_department: department,
                    can_view,
                    visible_fields,
                    explicit: stored.is_some(),
                });
            }
        }
        cells
    }
}
