use std::fmt;
use std::ops::RangeInclusive;

use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_CHARS: usize = 100;
pub const BATCH_MAX_CHARS: usize = 50;
pub const MARKS_RANGE: RangeInclusive<i32> = 0..=100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rn: i32,
    pub name: String,
    pub batch: String,
    pub marks: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Wire shape of a student, used as request payload by both services and
/// as the stored record of the in-memory service.
///
/// Missing fields deserialize to their zero value so that an absent `name`
/// is reported by validation rather than rejected by the JSON extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Student {
    pub rn: i32,
    pub name: String,
    pub batch: String,
    pub marks: i32,
}

impl From<Model> for Student {
    fn from(m: Model) -> Self {
        Self { rn: m.rn, name: m.name, batch: m.batch, marks: m.marks }
    }
}

impl Student {
    /// Both text fields carry something other than whitespace.
    pub fn has_required_text(&self) -> bool {
        !is_blank(&self.name) && !is_blank(&self.batch)
    }
}

/// A single broken field rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    NameRequired,
    NameTooLong,
    BatchRequired,
    BatchTooLong,
    MarksOutOfRange,
}

impl Violation {
    pub fn field(&self) -> &'static str {
        match self {
            Violation::NameRequired | Violation::NameTooLong => "name",
            Violation::BatchRequired | Violation::BatchTooLong => "batch",
            Violation::MarksOutOfRange => "marks",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NameRequired => write!(f, "Name is required"),
            Violation::NameTooLong => write!(f, "Name cannot exceed {NAME_MAX_CHARS} characters"),
            Violation::BatchRequired => write!(f, "Batch is required"),
            Violation::BatchTooLong => write!(f, "Batch cannot exceed {BATCH_MAX_CHARS} characters"),
            Violation::MarksOutOfRange => write!(
                f,
                "Marks must be between {} and {}",
                MARKS_RANGE.start(),
                MARKS_RANGE.end()
            ),
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn check_text(value: &str, max: usize, required: Violation, too_long: Violation, out: &mut Vec<Violation>) {
    // a blank value only reports "required"
    if is_blank(value) {
        out.push(required);
    } else if value.chars().count() > max {
        out.push(too_long);
    }
}

/// Every rule `s` breaks, in field order (name, batch, marks).
/// Empty means the payload may be stored.
pub fn validate(s: &Student) -> Vec<Violation> {
    let mut out = Vec::new();
    check_text(&s.name, NAME_MAX_CHARS, Violation::NameRequired, Violation::NameTooLong, &mut out);
    check_text(&s.batch, BATCH_MAX_CHARS, Violation::BatchRequired, Violation::BatchTooLong, &mut out);
    if !MARKS_RANGE.contains(&s.marks) {
        out.push(Violation::MarksOutOfRange);
    }
    out
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find().all(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, rn: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(rn).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert as-is. A taken `rn` comes back as a `Db` error from the store.
pub async fn create(db: &DatabaseConnection, s: &Student) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        rn: Set(s.rn),
        name: Set(s.name.clone()),
        batch: Set(s.batch.clone()),
        marks: Set(s.marks),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite name/batch/marks of `existing`; its `rn` is kept.
pub async fn update_fields(db: &DatabaseConnection, existing: Model, s: &Student) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = existing.into();
    am.name = Set(s.name.clone());
    am.batch = Set(s.batch.clone());
    am.marks = Set(s.marks);
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, rn: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(rn).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, batch: &str, marks: i32) -> Student {
        Student { rn: 1, name: name.into(), batch: batch.into(), marks }
    }

    #[test]
    fn valid_payload_has_no_violations() {
        assert!(validate(&student("Asha", "2024A", 88)).is_empty());
        assert!(validate(&student("A", "B", 0)).is_empty());
        assert!(validate(&student("A", "B", 100)).is_empty());
    }

    #[test]
    fn reports_every_violation_in_field_order() {
        let v = validate(&student("", "  ", 101));
        assert_eq!(v, vec![Violation::NameRequired, Violation::BatchRequired, Violation::MarksOutOfRange]);
        let msgs: Vec<String> = v.iter().map(|x| x.to_string()).collect();
        assert_eq!(msgs, vec!["Name is required", "Batch is required", "Marks must be between 0 and 100"]);
    }

    #[test]
    fn length_limits_count_characters() {
        let name = "é".repeat(NAME_MAX_CHARS);
        assert!(validate(&student(&name, "B", 1)).is_empty());

        let long_name = "x".repeat(NAME_MAX_CHARS + 1);
        let long_batch = "y".repeat(BATCH_MAX_CHARS + 1);
        let v = validate(&student(&long_name, &long_batch, -1));
        assert_eq!(v, vec![Violation::NameTooLong, Violation::BatchTooLong, Violation::MarksOutOfRange]);
        assert_eq!(v[0].to_string(), "Name cannot exceed 100 characters");
        assert_eq!(v[1].to_string(), "Batch cannot exceed 50 characters");
        assert_eq!(v[1].field(), "batch");
    }

    #[test]
    fn payload_fields_default_when_missing() {
        let s: Student = serde_json::from_str(r#"{"name":"Asha R","batch":"2024A","marks":90}"#).unwrap();
        assert_eq!(s.rn, 0);
        assert_eq!(s.marks, 90);

        let empty: Student = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Student::default());
        assert!(!empty.has_required_text());
    }
}
