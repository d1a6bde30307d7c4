//! Create `student` table.
//!
//! `rn` is caller-supplied, so the primary key is not auto-incrementing.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(integer(Student::Rn).primary_key())
                    .col(string_len(Student::Name, 100).not_null())
                    .col(string_len(Student::Batch, 50).not_null())
                    .col(integer(Student::Marks).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Rn, Name, Batch, Marks }
