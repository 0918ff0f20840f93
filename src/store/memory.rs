use super::types::{Course, Enrollment, Student};
use super::RecordStore;
use crate::{RegistrarError, Result};

/// Record store that keeps everything in memory. Saves can be made to fail to
/// exercise the "changes may not be saved" path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new(students: Vec<Student>, courses: Vec<Course>, enrollments: Vec<Enrollment>) -> Self {
        Self {
            students,
            courses,
            enrollments,
            fail_saves: false,
            saves: 0,
        }
    }

    /// Make every subsequent save fail with an IO error
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_saves {
            return Err(RegistrarError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "memory store is read-only",
            )));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn load_students(&self) -> Result<Vec<Student>> {
        Ok(self.students.clone())
    }

    fn load_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }

    fn load_enrollments(&self) -> Result<Vec<Enrollment>> {
        Ok(self.enrollments.clone())
    }

    fn save_students(&mut self, students: &[Student]) -> Result<()> {
        self.check_writable()?;
        self.students = students.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn save_enrollments(&mut self, enrollments: &[Enrollment]) -> Result<()> {
        self.check_writable()?;
        self.enrollments = enrollments.to_vec();
        self.saves += 1;
        Ok(())
    }
}
