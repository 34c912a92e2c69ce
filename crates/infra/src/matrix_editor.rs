//! Admin-side permission matrix editor.
//!
//! Holds a cached copy of the matrix. Edits go to the store first; the cache
//! only changes once the write is confirmed, so a failed save leaves what the
//! admin sees identical to what is stored.
//!
//! Meant to back an interactive admin front-end holding one open matrix.
//! The HTTP routes call [`PortalService`] directly since they keep no
//! per-admin state between requests.

use std::sync::Arc;

use staffhub_auth::{Role, Viewer};
use staffhub_directory::{Access, Department, FieldSet, MatrixCell, PermissionMatrix, PermissionRule};

use crate::error::PortalError;
use crate::services::PortalService;

pub struct MatrixEditor {
    service: Arc<PortalService>,
    viewer: Viewer,
    matrix: PermissionMatrix,
}

impl MatrixEditor {
    /// Load the current matrix on behalf of `viewer` (must be an admin).
    pub async fn load(service: Arc<PortalService>, viewer: Viewer) -> Result<Self, PortalError> {
        let matrix = service.permission_matrix(&viewer).await?;
        Ok(Self {
            service,
            viewer,
            matrix,
        })
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Every role × known department, implicit denies included.
    pub fn grid(&self) -> Vec<MatrixCell> {
        self.matrix.grid()
    }

    /// Re-read the matrix from the store, discarding the cache.
    pub async fn refresh(&mut self) -> Result<(), PortalError> {
        self.matrix = self.service.permission_matrix(&self.viewer).await?;
        Ok(())
    }

    /// Flip `can_view` for one cell. Turning a cell on starts with no fields.
    pub async fn toggle(&mut self, role: Role, department: Department) -> Result<Access, PortalError> {
        let rule = match self.matrix.access(role, department) {
            Access::Granted(_) => PermissionRule::new(role, department, false, FieldSet::empty())?,
            Access::Denied => PermissionRule::new(role, department, true, FieldSet::empty())?,
        };
        self.save(rule).await
    }

    /// Replace the visible fields of a cell, granting it if it was denied.
    pub async fn set_fields(
        &mut self,
        role: Role,
        department: Department,
        fields: FieldSet,
    ) -> Result<Access, PortalError> {
        let rule = PermissionRule::new(role, department, true, fields)?;
        self.save(rule).await
    }

    /// Deny a cell outright.
    pub async fn deny(&mut self, role: Role, department: Department) -> Result<Access, PortalError> {
        let rule = PermissionRule::new(role, department, false, FieldSet::empty())?;
        self.save(rule).await
    }

    async fn save(&mut self, rule: PermissionRule) -> Result<Access, PortalError> {
        let key = rule.key();
        let saved = self.service.upsert_rule(&self.viewer, rule).await?;
        self.matrix.upsert(saved)?;
        Ok(self.matrix.access(key.viewer_role, key.target_department))
    }
}
