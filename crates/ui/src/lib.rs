pub mod context;
pub mod routes;
pub mod vm;
pub mod views;

pub use context::Navigator;
pub use routes::{AppView, CatalogScope, NavItem, Presentation, nav_items, route};
pub use views::{DetailError, Screen, ViewState, build_screen, build_student_detail};
