//! SQLite persistence for accepted registrations.
//!
//! Records are stored as their JSON form next to the `staff_id`, which is
//! unique: a staff member registers once.

use std::path::Path;

use common::model::registration::RegistrationRecord;
use rusqlite::{params, Connection, ErrorCode};

use crate::error::{ApiError, ApiResult};

/// Opens the database at `path`, creating the table on first use.
pub fn open(path: &Path) -> ApiResult<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS registrations (
            id TEXT PRIMARY KEY,
            staff_id TEXT NOT NULL UNIQUE,
            record TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )",
    )?;
    Ok(conn)
}

pub fn insert(conn: &Connection, id: &str, record: &RegistrationRecord) -> ApiResult<()> {
    let json = serde_json::to_string(record).map_err(|e| ApiError::Internal(e.to_string()))?;

    match conn.execute(
        "INSERT INTO registrations (id, staff_id, record) VALUES (?1, ?2, ?3)",
        params![id, &record.staff_id, json],
    ) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Err(ApiError::Conflict(record.staff_id.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn fetch(conn: &Connection, id: &str) -> ApiResult<RegistrationRecord> {
    let json: String = match conn.query_row(
        "SELECT record FROM registrations WHERE id = ?1",
        params![id],
        |row| row.get(0),
    ) {
        Ok(json) => json,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(ApiError::NotFound(id.to_string())),
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&json).map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::registration::{Relationship, StaffCategory, WardEntry};

    fn record(staff_id: &str) -> RegistrationRecord {
        RegistrationRecord {
            staff_id: staff_id.into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            phone_number: "08031234567".into(),
            staff_category: StaffCategory::Academic,
            staff_address: "123 staff road".into(),
            department: "law".into(),
            relationship_status: "married".into(),
            email: Some("john@uni.edu.ng".into()),
            image_url: None,
            wards: vec![WardEntry {
                name: "Amy".into(),
                relationship: Relationship::Daughter,
            }],
        }
    }

    #[test]
    fn insert_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("test.sqlite")).unwrap();

        insert(&conn, "r1", &record("sp/1234")).unwrap();

        assert_eq!(fetch(&conn, "r1").unwrap(), record("sp/1234"));
    }

    #[test]
    fn duplicate_staff_id_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("test.sqlite")).unwrap();
        insert(&conn, "r1", &record("sp/1234")).unwrap();

        let err = insert(&conn, "r2", &record("sp/1234")).unwrap_err();

        assert!(matches!(err, ApiError::Conflict(ref staff) if staff == "sp/1234"));
    }

    #[test]
    fn missing_registration_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open(&dir.path().join("test.sqlite")).unwrap();

        assert!(matches!(fetch(&conn, "nope"), Err(ApiError::NotFound(_))));
    }
}
