use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use crate::config::Config;
use crate::models::{NewProject, Project};

#[cfg(test)]
pub mod memory;

/// Row-level access to the `projects` table.
///
/// A missing row is reported through `None` or `false`, never as an error;
/// errors are reserved for storage failures.
#[async_trait]
pub trait ProjectDao {
    /// Insert a project and return it with its generated id
    async fn insert_project(&self, project: &NewProject) -> Result<Project, sqlx::Error>;

    /// All projects, ordered by name ignoring case
    async fn fetch_all_projects(&self) -> Result<Vec<Project>, sqlx::Error>;

    async fn fetch_project_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error>;

    /// Overwrite the mutable fields of the row matching `project.id`.
    /// Returns whether exactly one row was changed.
    async fn modify_project_details(&self, project: &Project) -> Result<bool, sqlx::Error>;

    /// Returns whether exactly one row was removed.
    async fn delete_project(&self, id: i32) -> Result<bool, sqlx::Error>;
}

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for the connection to be returned
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ProjectDao for Database {
    async fn insert_project(&self, project: &NewProject) -> Result<Project, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, estimated_hours, actual_hours, difficulty, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, estimated_hours, actual_hours, difficulty, notes
            "#,
        )
        .bind(&project.name)
        .bind(&project.estimated_hours)
        .bind(&project.actual_hours)
        .bind(project.difficulty)
        .bind(&project.notes)
        .fetch_one(self.get_pool())
        .await?;

        debug!(id = project.id, "inserted project");
        Ok(project)
    }

    async fn fetch_all_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, estimated_hours, actual_hours, difficulty, notes
            FROM projects
            ORDER BY LOWER(name) ASC, id ASC
            "#,
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(projects)
    }

    async fn fetch_project_by_id(&self, id: i32) -> Result<Option<Project>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, estimated_hours, actual_hours, difficulty, notes
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(project)
    }

    async fn modify_project_details(&self, project: &Project) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $1, estimated_hours = $2, actual_hours = $3, difficulty = $4, notes = $5
            WHERE id = $6
            "#,
        )
        .bind(&project.name)
        .bind(&project.estimated_hours)
        .bind(&project.actual_hours)
        .bind(project.difficulty)
        .bind(&project.notes)
        .bind(project.id)
        .execute(self.get_pool())
        .await?;

        debug!(id = project.id, rows = result.rows_affected(), "updated project");
        Ok(result.rows_affected() == 1)
    }

    async fn delete_project(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(self.get_pool())
            .await?;

        debug!(id, rows = result.rows_affected(), "deleted project");
        Ok(result.rows_affected() == 1)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    // The schema lives in sql/projects_schema.sql and is applied out of band.

    Ok(db)
}
