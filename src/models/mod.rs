mod project;

pub use project::{NewProject, OrNone, Project};
