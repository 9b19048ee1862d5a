use edutrack_core::model::UserRole;

use crate::routes::{self, AppView, NavItem, Presentation};

/// Sidebar selection for the logged-in user.
///
/// The selected view is free-form; what actually renders always goes through
/// the routing table, so toggling cannot expose another role's screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Navigator {
    role: UserRole,
    selected: AppView,
}

impl Navigator {
    #[must_use]
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            selected: AppView::Dashboard,
        }
    }

    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    #[must_use]
    pub fn selected(&self) -> AppView {
        self.selected
    }

    pub fn select(&mut self, view: AppView) {
        self.selected = view;
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        routes::route(self.role, self.selected)
    }

    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItem> {
        routes::nav_items(self.role)
    }
}
