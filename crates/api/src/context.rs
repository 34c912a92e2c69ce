use std::ops::Deref;

use staffhub_auth::Viewer;

/// Authenticated viewer for a request.
///
/// Inserted by the auth middleware from verified token claims and required by
/// every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerContext {
    viewer: Viewer,
}

impl ViewerContext {
    pub fn new(viewer: Viewer) -> Self {
        Self { viewer }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }
}

impl Deref for ViewerContext {
    type Target = Viewer;

    fn deref(&self) -> &Self::Target {
        &self.viewer
    }
}
