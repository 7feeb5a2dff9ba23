use std::fmt;

use sqlx::types::BigDecimal;

/// A row of the `projects` table.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub estimated_hours: Option<BigDecimal>,
    pub actual_hours: Option<BigDecimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
}

/// Field values for a project that has not been stored yet.
///
/// The id is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub estimated_hours: Option<BigDecimal>,
    pub actual_hours: Option<BigDecimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n   ID={}", self.id)?;
        write!(f, "\n   name={}", self.name)?;
        write!(f, "\n   estimated hours={}", OrNone(&self.estimated_hours))?;
        write!(f, "\n   actual hours={}", OrNone(&self.actual_hours))?;
        write!(f, "\n   difficulty={}", OrNone(&self.difficulty))?;
        write!(f, "\n   notes={}", OrNone(&self.notes))
    }
}

/// Displays an optional value, or `none` when it is absent.
pub struct OrNone<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("none"),
        }
    }
}
