mod render;
mod screen;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use screen::{DetailError, Screen, build_screen, build_student_detail};
pub use state::{ViewState, view_state_from_session};
