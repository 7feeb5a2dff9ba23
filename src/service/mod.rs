use thiserror::Error;
use tracing::debug;

use crate::db::ProjectDao;
use crate::models::{NewProject, Project};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Project with ID={id} does not exist")]
    NotFound { id: i32 },
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Project operations with "missing row" turned into `ServiceError::NotFound`.
pub struct ProjectService<D> {
    dao: D,
}

impl<D: ProjectDao> ProjectService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn dao(&self) -> &D {
        &self.dao
    }

    pub async fn add_project(&self, project: &NewProject) -> Result<Project, ServiceError> {
        Ok(self.dao.insert_project(project).await?)
    }

    pub async fn fetch_all_projects(&self) -> Result<Vec<Project>, ServiceError> {
        Ok(self.dao.fetch_all_projects().await?)
    }

    pub async fn fetch_project_by_id(&self, id: i32) -> Result<Project, ServiceError> {
        self.dao
            .fetch_project_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { id })
    }

    pub async fn modify_project_details(&self, project: &Project) -> Result<(), ServiceError> {
        if !self.dao.modify_project_details(project).await? {
            debug!(id = project.id, "update matched no project");
            return Err(ServiceError::NotFound { id: project.id });
        }
        Ok(())
    }

    pub async fn delete_project(&self, id: i32) -> Result<(), ServiceError> {
        if !self.dao.delete_project(id).await? {
            debug!(id, "delete matched no project");
            return Err(ServiceError::NotFound { id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryDao;
    use sqlx::types::BigDecimal;
    use std::str::FromStr;

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            estimated_hours: Some(BigDecimal::from_str("8.00").unwrap()),
            actual_hours: Some(BigDecimal::from_str("9.25").unwrap()),
            difficulty: Some(4),
            notes: Some("sand twice".to_string()),
        }
    }

    #[tokio::test]
    async fn added_project_round_trips() {
        let service = ProjectService::new(MemoryDao::default());

        let created = service.add_project(&new_project("Deck")).await.unwrap();
        let fetched = service.fetch_project_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Deck");
        assert_eq!(fetched.actual_hours, Some(BigDecimal::from_str("9.25").unwrap()));
    }

    #[tokio::test]
    async fn missing_project_is_not_found_and_leaves_rows_alone() {
        let service = ProjectService::new(MemoryDao::default());
        service.add_project(&new_project("Deck")).await.unwrap();
        let before = service.dao().rows();

        let err = service.fetch_project_by_id(42).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { id: 42 }));
        assert_eq!(err.to_string(), "Project with ID=42 does not exist");
        assert_eq!(service.dao().rows(), before);
    }

    #[tokio::test]
    async fn modify_and_delete_report_missing_ids() {
        let service = ProjectService::new(MemoryDao::default());
        let mut project = service.add_project(&new_project("Deck")).await.unwrap();
        project.id = 7;

        assert!(matches!(
            service.modify_project_details(&project).await,
            Err(ServiceError::NotFound { id: 7 })
        ));
        assert!(matches!(
            service.delete_project(7).await,
            Err(ServiceError::NotFound { id: 7 })
        ));
        assert_eq!(service.dao().rows().len(), 1);
    }

    #[tokio::test]
    async fn modify_overwrites_all_mutable_fields() {
        let service = ProjectService::new(MemoryDao::default());
        let mut project = service.add_project(&new_project("Deck")).await.unwrap();
        project.name = "Porch".to_string();
        project.difficulty = None;

        service.modify_project_details(&project).await.unwrap();

        assert_eq!(service.fetch_project_by_id(project.id).await.unwrap(), project);
    }

    #[tokio::test]
    async fn projects_are_listed_by_name_ignoring_case() {
        let service = ProjectService::new(MemoryDao::default());
        for name in ["Banana", "apple", "Cherry"] {
            service.add_project(&new_project(name)).await.unwrap();
        }

        let names: Vec<String> = service
            .fetch_all_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, ["apple", "Banana", "Cherry"]);
    }

    #[tokio::test]
    async fn storage_failures_are_wrapped() {
        let service = ProjectService::new(MemoryDao::default());
        service.dao().fail_next();

        let err = service.fetch_all_projects().await.unwrap_err();

        assert!(matches!(err, ServiceError::Storage(_)));
        assert!(err.to_string().starts_with("database error: "));
    }
}
