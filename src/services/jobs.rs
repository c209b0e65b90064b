//! Jobs service
//!
//! High-level business logic for job applications. Validation runs before
//! any storage call so bad input never reaches the database.

use crate::config::MAX_NAME_LENGTH;
use crate::database::{CreateJobRequest, JobApplication, JobFilter, Repository, UpdateJobRequest};
use crate::error::{AppError, Result};

/// Service for managing job applications
#[derive(Clone)]
pub struct JobsService {
    repo: Repository,
}

impl JobsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a job application. Role and company are required.
    pub async fn create_job(&self, owner_id: &str, req: CreateJobRequest) -> Result<JobApplication> {
        validate_role_and_company(&req.role, &req.company)?;

        tracing::info!("Creating job application: {} at {}", req.role, req.company);

        let job = self.repo.create_job(owner_id, req).await?;

        tracing::info!("Job application created: {}", job.id);
        Ok(job)
    }

    /// Get a job application by ID
    pub async fn get_job(&self, owner_id: &str, id: &str) -> Result<JobApplication> {
        self.repo.get_job(owner_id, id).await
    }

    /// List job applications with optional status filter and ordering
    pub async fn list_jobs(&self, owner_id: &str, filter: &JobFilter) -> Result<Vec<JobApplication>> {
        self.repo.list_jobs(owner_id, filter).await
    }

    /// Replace a job application record
    pub async fn update_job(&self, owner_id: &str, req: UpdateJobRequest) -> Result<JobApplication> {
        validate_role_and_company(&req.role, &req.company)?;

        tracing::debug!("Updating job application: {}", req.id);

        self.repo.update_job(owner_id, req).await
    }

    /// Delete a job application
    pub async fn delete_job(&self, owner_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting job application: {}", id);

        self.repo.delete_job(owner_id, id).await
    }

    /// Case-insensitive substring search over role, company, and notes
    pub async fn search_jobs(&self, owner_id: &str, query: &str) -> Result<Vec<JobApplication>> {
        let all_jobs = self.repo.list_jobs(owner_id, &JobFilter::default()).await?;

        let query_lower = query.to_lowercase();

        let filtered: Vec<JobApplication> = all_jobs
            .into_iter()
            .filter(|job| {
                job.role.to_lowercase().contains(&query_lower)
                    || job.company.to_lowercase().contains(&query_lower)
                    || job
                        .notes
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&query_lower))
            })
            .collect();

        Ok(filtered)
    }
}

fn validate_role_and_company(role: &str, company: &str) -> Result<()> {
    if role.trim().is_empty() {
        return Err(AppError::Validation("Role is required".to_string()));
    }
    if company.trim().is_empty() {
        return Err(AppError::Validation("Company is required".to_string()));
    }
    if role.len() > MAX_NAME_LENGTH || company.len() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Role and company must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> (JobsService, String) {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let repo = Repository::new(pool);
        let user = repo.create_user("dev@example.com").await.unwrap();

        (JobsService::new(repo), user.id)
    }

    fn job_req(role: &str, company: &str) -> CreateJobRequest {
        CreateJobRequest {
            role: role.to_string(),
            company: company.to_string(),
            status: None,
            applied_on: None,
            link: None,
            notes: None,
            custom_data: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_role_and_company() {
        let (service, owner) = create_test_service().await;

        assert!(service.create_job(&owner, job_req("", "Acme")).await.is_err());
        assert!(service.create_job(&owner, job_req("SRE", "")).await.is_err());
        assert!(service.create_job(&owner, job_req("  ", "Acme")).await.is_err());

        // Nothing reached storage
        let jobs = service.list_jobs(&owner, &JobFilter::default()).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_search() {
        let (service, owner) = create_test_service().await;

        let job = service
            .create_job(&owner, job_req("Backend Engineer", "Acme"))
            .await
            .unwrap();
        // Status defaults into the conventional set the views render
        assert!(crate::config::JOB_STATUSES.contains(&job.status.as_str()));
        service
            .create_job(&owner, job_req("Data Engineer", "Initech"))
            .await
            .unwrap();

        let results = service.search_jobs(&owner, "acme").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].company, "Acme");

        let results = service.search_jobs(&owner, "engineer").await.unwrap();
        assert_eq!(results.len(), 2);

        let results = service.search_jobs(&owner, "nonexistent").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let (service, owner) = create_test_service().await;

        let job = service
            .create_job(&owner, job_req("Backend Engineer", "Acme"))
            .await
            .unwrap();

        let updated = service
            .update_job(
                &owner,
                UpdateJobRequest {
                    id: job.id.clone(),
                    role: "Platform Engineer".to_string(),
                    company: "Acme".to_string(),
                    status: "Interview".to_string(),
                    applied_on: None,
                    link: None,
                    notes: None,
                    custom_data: "{}".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, "Platform Engineer");
        assert_eq!(updated.status, "Interview");
        // Fields not carried in the replacement are gone, not preserved
        assert_eq!(updated.notes, None);
    }
}
