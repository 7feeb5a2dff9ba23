use std::io;

use thiserror::Error;

use crate::service::ServiceError;
use crate::ui::prompt::InputError;

/// Everything that can abort a single menu action.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}
