//! In-memory `ProjectDao` used by the service and menu tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::ProjectDao;
use crate::models::{NewProject, Project};

#[derive(Default)]
struct Rows {
    projects: Vec<Project>,
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryDao {
    rows: Mutex<Rows>,
    fail_next: AtomicBool,
}

impl MemoryDao {
    /// Make the next call fail as if the database were unreachable.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Snapshot of the stored rows in insertion order.
    pub fn rows(&self) -> Vec<Project> {
        self.rows.lock().unwrap().projects.clone()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectDao for MemoryDao {
    async fn insert_project(&self, project: &NewProject) -> Result<Project, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        rows.last_id += 1;
        let stored = Project {
            id: rows.last_id,
            name: project.name.clone(),
            estimated_hours: project.estimated_hours.clone(),
            actual_hours: project.actual_hours.clone(),
            difficulty: project.difficulty,
            notes: project.notes.clone(),
        };
        rows.projects.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_all_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        self.check()?;
        let mut projects = self.rows();
        projects.sort_by(|a, b| {
            (a.name.to_lowercase(), a.id).cmp(&(b.name.to_lowercase(), b.id))
        });
        Ok(projects)
    }

    async fn fetch_project_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error> {
        self.check()?;
        Ok(self.rows().into_iter().find(|p| p.id == id))
    }

    async fn modify_project_details(&self, project: &Project) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.projects.iter_mut().find(|p| p.id == project.id) {
            Some(row) => {
                *row = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_project(&self, id: i32) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.projects.len();
        rows.projects.retain(|p| p.id != id);
        Ok(rows.projects.len() < before)
    }
}
