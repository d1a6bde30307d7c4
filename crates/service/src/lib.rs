//! Service layer providing the student CRUD rules on top of models.
//! - `student`: database-backed service with validation and not-found policy.
//! - `storage`: process-local student list for the in-memory service.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod student;
