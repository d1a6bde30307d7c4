use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::student::{self, Student};

use crate::errors::ServiceError;

/// Data-access seam for the database-backed student service.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn get(&self, rn: i32) -> Result<Option<student::Model>, ServiceError>;
    async fn create(&self, input: &Student) -> Result<student::Model, ServiceError>;
    async fn update(&self, existing: student::Model, input: &Student) -> Result<student::Model, ServiceError>;
    async fn delete(&self, rn: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn list(&self) -> Result<Vec<student::Model>, ServiceError> {
        Ok(student::list(&self.db).await?)
    }

    async fn get(&self, rn: i32) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::find(&self.db, rn).await?)
    }

    async fn create(&self, input: &Student) -> Result<student::Model, ServiceError> {
        Ok(student::create(&self.db, input).await?)
    }

    async fn update(&self, existing: student::Model, input: &Student) -> Result<student::Model, ServiceError> {
        Ok(student::update_fields(&self.db, existing, input).await?)
    }

    async fn delete(&self, rn: i32) -> Result<bool, ServiceError> {
        Ok(student::delete(&self.db, rn).await?)
    }
}
