use thiserror::Error;

use crate::model::{ActivityError, CourseError, UserError};

/// Any validation failure raised by the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Activity(#[from] ActivityError),
}
