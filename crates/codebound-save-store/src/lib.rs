//! Durable implementations of the `SaveRepository` port.
//!
//! `FileSaveRepository` keeps one JSON document per record in a directory;
//! `PgSaveRepository` keeps records in a `PostgreSQL` `saves` table. Both
//! store the owner inside the record and compare it on every read and
//! delete.

pub mod file_save_repository;
pub mod pg_save_repository;
pub mod schema;
