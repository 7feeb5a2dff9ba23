pub mod menu;
pub mod prompt;

pub use menu::{Session, run};
pub use prompt::Console;
