use std::sync::Arc;

use models::student::Student;
use tokio::sync::RwLock;

/// Process-local list of students backing the in-memory service.
///
/// Entries keep insertion order and are lost on restart. Every
/// read-modify-write runs under a single write guard.
#[derive(Clone, Default)]
pub struct StudentListStore {
    inner: Arc<RwLock<Vec<Student>>>,
}

impl StudentListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in insertion order.
    pub async fn list(&self) -> Vec<Student> {
        self.inner.read().await.clone()
    }

    /// First entry with `rn`.
    pub async fn get(&self, rn: i32) -> Option<Student> {
        let list = self.inner.read().await;
        list.iter().find(|s| s.rn == rn).cloned()
    }

    /// Drop every entry sharing `student.rn`, then append `student`.
    pub async fn upsert(&self, student: Student) -> Student {
        let mut list = self.inner.write().await;
        list.retain(|s| s.rn != student.rn);
        list.push(student.clone());
        student
    }

    /// Overwrite name/batch/marks of the first entry with `rn`; false when absent.
    pub async fn update(&self, rn: i32, input: Student) -> bool {
        let mut list = self.inner.write().await;
        match list.iter_mut().find(|s| s.rn == rn) {
            Some(existing) => {
                existing.name = input.name;
                existing.batch = input.batch;
                existing.marks = input.marks;
                true
            }
            None => false,
        }
    }

    /// Remove all entries with `rn`; returns how many were removed.
    pub async fn remove(&self, rn: i32) -> usize {
        let mut list = self.inner.write().await;
        let before = list.len();
        list.retain(|s| s.rn != rn);
        before - list.len()
    }
}
