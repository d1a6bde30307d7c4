//! Storage abstractions for service layer
//!
//! Process-local stores that need no external collaborator.

pub mod student_list;
