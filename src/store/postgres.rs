//! PostgreSQL gateway implementation
//!
//! Uniqueness and referential integrity are enforced here as the backstop:
//! SQLSTATE 23505 (unique violation) and 23503 (foreign key violation) are
//! classified into the gateway's error taxonomy by constraint name, so a
//! race that slips past the service layer's proactive checks surfaces as
//! the same error as the checks themselves.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::schema::types::{NewEnrollment, NewStudent, StudentPatch};

use super::{
    Enrollment, EnrollmentStore, StoreError, StoreResult, Student, StudentField, StudentStore,
};

const CREATE_TABLES_SQL: &str = include_str!("../../migrations/0001_create_tables.sql");

const STUDENT_COLUMNS: &str = "ra, name, email, cpf, created_at, updated_at";
const ENROLLMENT_COLUMNS: &str = "id, student_ra, course, created_at, updated_at";

/// Gateway backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Establish a connection pool and ensure the tables exist.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        sqlx::raw_sql(CREATE_TABLES_SQL).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Access the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Classify constraint rejections; anything else stays a database error.
fn classify(err: sqlx::Error) -> StoreError {
    let (code, hint) = match &err {
        sqlx::Error::Database(db) => (
            db.code().map(|c| c.into_owned()),
            // Prefer the constraint name; older servers may only carry it
            // in the message text.
            db.constraint()
                .map(str::to_string)
                .unwrap_or_else(|| db.message().to_string()),
        ),
        _ => return StoreError::Database(err),
    };

    match code.as_deref() {
        Some("23505") => {
            if hint.contains("enrollments") {
                StoreError::DuplicateEnrollment
            } else if hint.contains("email") {
                StoreError::UniqueStudentField(StudentField::Email)
            } else if hint.contains("pkey") || hint.contains("ra") {
                StoreError::UniqueStudentField(StudentField::Ra)
            } else if hint.contains("cpf") {
                StoreError::UniqueStudentField(StudentField::Cpf)
            } else {
                StoreError::Database(err)
            }
        }
        Some("23503") => StoreError::MissingStudent,
        _ => StoreError::Database(err),
    }
}

/// Escape LIKE metacharacters so the query matches literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl StudentStore for PgStore {
    async fn find_by_ra(&self, ra: &str) -> StoreResult<Option<Student>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE ra = $1");
        let student = sqlx::query_as(&sql).bind(ra).fetch_optional(&self.pool).await?;
        Ok(student)
    }

    async fn list(&self) -> StoreResult<Vec<Student>> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY ra");
        let students = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(students)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Student>> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE ra ILIKE $1 OR name ILIKE $1 OR cpf ILIKE $1 \
             ORDER BY ra"
        );
        let students = sqlx::query_as(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    async fn insert(&self, new: NewStudent) -> StoreResult<Student> {
        let sql = format!(
            "INSERT INTO students (ra, name, email, cpf) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(new.ra)
            .bind(new.name)
            .bind(new.email)
            .bind(new.cpf)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update(&self, ra: &str, patch: StudentPatch) -> StoreResult<Option<Student>> {
        let sql = format!(
            "UPDATE students SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                cpf = COALESCE($4, cpf), \
                updated_at = NOW() \
             WHERE ra = $1 \
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(ra)
            .bind(patch.name)
            .bind(patch.email)
            .bind(patch.cpf)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn delete(&self, ra: &str) -> StoreResult<bool> {
        // Enrollments are removed by ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM students WHERE ra = $1")
            .bind(ra)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Enrollment>> {
        let sql = format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1");
        let enrollment = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(enrollment)
    }

    async fn find_by_student_and_course(
        &self,
        student_ra: &str,
        course: &str,
    ) -> StoreResult<Option<Enrollment>> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments \
             WHERE student_ra = $1 AND course = $2"
        );
        let enrollment = sqlx::query_as(&sql)
            .bind(student_ra)
            .bind(course)
            .fetch_optional(&self.pool)
            .await?;
        Ok(enrollment)
    }

    async fn list(&self) -> StoreResult<Vec<Enrollment>> {
        let sql = format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments ORDER BY id");
        let enrollments = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(enrollments)
    }

    async fn insert(&self, new: NewEnrollment) -> StoreResult<Enrollment> {
        let sql = format!(
            "INSERT INTO enrollments (student_ra, course) \
             VALUES ($1, $2) \
             RETURNING {ENROLLMENT_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(new.student_ra)
            .bind(new.course)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
        assert_eq!(escape_like("RA1001"), "RA1001");
    }
}
