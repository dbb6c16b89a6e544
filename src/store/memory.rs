//! In-memory gateway implementation
//!
//! Backs tests and local experimentation. Enforces the same invariants as
//! the PostgreSQL gateway (unique email/ra/cpf, unique (student, course)
//! pair, student reference, cascading delete) so the service layer observes
//! identical outcomes against either implementation.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::schema::types::{NewEnrollment, NewStudent, StudentPatch};

use super::{
    Enrollment, EnrollmentStore, StoreError, StoreResult, Student, StudentField, StudentStore,
};

#[derive(Default)]
struct Inner {
    students: Vec<Student>,
    enrollments: Vec<Enrollment>,
    next_enrollment_id: i32,
}

/// Gateway backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Internal("lock poisoned".to_string()))
    }
}

/// Uniqueness backstop, checked in the same priority order the PostgreSQL
/// classifier reports: email, then ra, then cpf.
fn unique_conflict(
    students: &[Student],
    skip_ra: Option<&str>,
    email: Option<&str>,
    ra: Option<&str>,
    cpf: Option<&str>,
) -> Option<StudentField> {
    let others = students
        .iter()
        .filter(|s| skip_ra != Some(s.ra.as_str()))
        .collect::<Vec<_>>();

    if let Some(email) = email {
        if others.iter().any(|s| s.email == email) {
            return Some(StudentField::Email);
        }
    }
    if let Some(ra) = ra {
        if others.iter().any(|s| s.ra == ra) {
            return Some(StudentField::Ra);
        }
    }
    if let Some(cpf) = cpf {
        if others.iter().any(|s| s.cpf == cpf) {
            return Some(StudentField::Cpf);
        }
    }
    None
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn find_by_ra(&self, ra: &str) -> StoreResult<Option<Student>> {
        let inner = self.read()?;
        Ok(inner.students.iter().find(|s| s.ra == ra).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Student>> {
        let inner = self.read()?;
        let mut students = inner.students.clone();
        students.sort_by(|a, b| a.ra.cmp(&b.ra));
        Ok(students)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Student>> {
        let needle = query.to_lowercase();
        let inner = self.read()?;
        let mut students: Vec<Student> = inner
            .students
            .iter()
            .filter(|s| {
                s.ra.to_lowercase().contains(&needle)
                    || s.name.to_lowercase().contains(&needle)
                    || s.cpf.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        students.sort_by(|a, b| a.ra.cmp(&b.ra));
        Ok(students)
    }

    async fn insert(&self, new: NewStudent) -> StoreResult<Student> {
        let mut inner = self.write()?;

        if let Some(field) = unique_conflict(
            &inner.students,
            None,
            Some(&new.email),
            Some(&new.ra),
            Some(&new.cpf),
        ) {
            return Err(StoreError::UniqueStudentField(field));
        }

        let now = Utc::now();
        let student = Student {
            ra: new.ra,
            name: new.name,
            email: new.email,
            cpf: new.cpf,
            created_at: now,
            updated_at: now,
        };
        inner.students.push(student.clone());
        Ok(student)
    }

    async fn update(&self, ra: &str, patch: StudentPatch) -> StoreResult<Option<Student>> {
        let mut inner = self.write()?;

        let Some(pos) = inner.students.iter().position(|s| s.ra == ra) else {
            return Ok(None);
        };

        if let Some(field) = unique_conflict(
            &inner.students,
            Some(ra),
            patch.email.as_deref(),
            None,
            patch.cpf.as_deref(),
        ) {
            return Err(StoreError::UniqueStudentField(field));
        }

        let student = &mut inner.students[pos];

        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        if let Some(cpf) = patch.cpf {
            student.cpf = cpf;
        }
        student.updated_at = Utc::now();

        Ok(Some(student.clone()))
    }

    async fn delete(&self, ra: &str) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let before = inner.students.len();
        inner.students.retain(|s| s.ra != ra);
        let removed = inner.students.len() < before;
        if removed {
            // Cascade, as the foreign key declaration would
            inner.enrollments.retain(|e| e.student_ra != ra);
        }
        Ok(removed)
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Enrollment>> {
        let inner = self.read()?;
        Ok(inner.enrollments.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_student_and_course(
        &self,
        student_ra: &str,
        course: &str,
    ) -> StoreResult<Option<Enrollment>> {
        let inner = self.read()?;
        Ok(inner
            .enrollments
            .iter()
            .find(|e| e.student_ra == student_ra && e.course == course)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Enrollment>> {
        let inner = self.read()?;
        let mut enrollments = inner.enrollments.clone();
        enrollments.sort_by_key(|e| e.id);
        Ok(enrollments)
    }

    async fn insert(&self, new: NewEnrollment) -> StoreResult<Enrollment> {
        let mut inner = self.write()?;

        if !inner.students.iter().any(|s| s.ra == new.student_ra) {
            return Err(StoreError::MissingStudent);
        }
        if inner
            .enrollments
            .iter()
            .any(|e| e.student_ra == new.student_ra && e.course == new.course)
        {
            return Err(StoreError::DuplicateEnrollment);
        }

        inner.next_enrollment_id += 1;
        let now = Utc::now();
        let enrollment = Enrollment {
            id: inner.next_enrollment_id,
            student_ra: new.student_ra,
            course: new.course,
            created_at: now,
            updated_at: now,
        };
        inner.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let mut inner = self.write()?;
        let before = inner.enrollments.len();
        inner.enrollments.retain(|e| e.id != id);
        Ok(inner.enrollments.len() < before)
    }
}
