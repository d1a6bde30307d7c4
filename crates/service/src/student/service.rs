use std::sync::Arc;

use models::student::{self, Student};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::student::repository::StudentRepository;

/// Application service encapsulating the student business rules.
/// Validation and not-found checks happen here, before any store mutation.
pub struct StudentService<R: StudentRepository> {
    repo: Arc<R>,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Validate every field rule, then insert. No pre-check for a taken `rn`;
    /// the store reports it.
    #[instrument(skip(self, input), fields(rn = input.rn))]
    pub async fn create(&self, input: &Student) -> Result<student::Model, ServiceError> {
        let violations = student::validate(input);
        if !violations.is_empty() {
            let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
            warn!(?fields, "student_create_rejected");
            return Err(ServiceError::Invalid(violations));
        }
        let created = self.repo.create(input).await?;
        info!(rn = created.rn, "student_created");
        Ok(created)
    }

    /// Overwrite name/batch/marks of the record found under `rn`.
    /// Only blank text is rejected here; lengths and marks range are not rechecked.
    #[instrument(skip(self, input))]
    pub async fn update(&self, rn: i32, input: &Student) -> Result<student::Model, ServiceError> {
        let existing = self
            .repo
            .get(rn)
            .await?
            .ok_or_else(|| ServiceError::student_not_found(rn))?;
        if !input.has_required_text() {
            return Err(ServiceError::Validation("Name and Batch are required".into()));
        }
        let updated = self.repo.update(existing, input).await?;
        info!(rn = updated.rn, "student_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, rn: i32) -> Result<(), ServiceError> {
        if self.repo.get(rn).await?.is_none() {
            return Err(ServiceError::student_not_found(rn));
        }
        if !self.repo.delete(rn).await? {
            // removed by a concurrent request between lookup and delete
            return Err(ServiceError::student_not_found(rn));
        }
        info!(rn, "student_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::repository::SeaOrmStudentRepository;
    use crate::test_support::get_db;
    use models::student::Violation;

    async fn service() -> anyhow::Result<StudentService<SeaOrmStudentRepository>> {
        let db = get_db().await?;
        Ok(StudentService::new(Arc::new(SeaOrmStudentRepository::new(db))))
    }

    fn payload(rn: i32, name: &str, batch: &str, marks: i32) -> Student {
        Student { rn, name: name.into(), batch: batch.into(), marks }
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_without_storing() -> anyhow::Result<()> {
        let svc = service().await?;
        let err = svc.create(&payload(1, "", "", 150)).await.unwrap_err();
        match err {
            ServiceError::Invalid(v) => assert_eq!(
                v,
                vec![Violation::NameRequired, Violation::BatchRequired, Violation::MarksOutOfRange]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_then_list_has_one_record_per_rn() -> anyhow::Result<()> {
        let svc = service().await?;
        svc.create(&payload(5, "Asha", "2024A", 88)).await?;
        svc.create(&payload(6, "Ravi", "2024B", 70)).await?;

        let dup = svc.create(&payload(5, "Other", "2024A", 10)).await.unwrap_err();
        assert!(matches!(dup, ServiceError::Model(_)), "unexpected error: {dup:?}");

        let list = svc.list().await?;
        assert_eq!(list.iter().filter(|s| s.rn == 5).count(), 1);
        assert_eq!(list.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_rn_is_not_found_and_never_inserts() -> anyhow::Result<()> {
        let svc = service().await?;
        let err = svc.update(42, &payload(42, "A", "B", 1)).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Student with RN 42 not found");
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_only_blank_text() -> anyhow::Result<()> {
        let svc = service().await?;
        svc.create(&payload(5, "Asha", "2024A", 88)).await?;

        let err = svc.update(5, &payload(0, " ", "2024A", 90)).await.unwrap_err();
        assert_eq!(err.to_string(), "Name and Batch are required");

        // out-of-range marks pass the weaker update check
        let updated = svc.update(5, &payload(0, "Asha R", "2024A", 120)).await?;
        assert_eq!(updated.rn, 5);
        assert_eq!(updated.name, "Asha R");
        assert_eq!(updated.marks, 120);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_once() -> anyhow::Result<()> {
        let svc = service().await?;
        svc.create(&payload(5, "Asha", "2024A", 88)).await?;

        svc.delete(5).await?;
        assert!(svc.list().await?.is_empty());
        let err = svc.delete(5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
