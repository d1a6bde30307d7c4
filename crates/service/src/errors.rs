use models::student::Violation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field rules broken by a create payload, in field order.
    #[error("invalid student: {}", join(.0))]
    Invalid(Vec<Violation>),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn student_not_found(rn: i32) -> Self { Self::NotFound(format!("Student with RN {rn} not found")) }

    /// Message of the underlying store failure, without the layer prefix.
    pub fn store_message(&self) -> String {
        match self {
            ServiceError::Model(models::errors::ModelError::Db(msg)) => msg.clone(),
            other => other.to_string(),
        }
    }
}

fn join(v: &[Violation]) -> String {
    v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join("; ")
}
