//! Record Store: durable representation of students, courses and enrollments

pub mod delimited;
pub mod memory;
pub mod types;

pub use delimited::DelimitedStore;
pub use memory::MemoryStore;
pub use types::{Course, Enrollment, Student, StudentId, Ticket};

use crate::Result;

/// Loads and saves the three record collections.
///
/// Saves always replace the whole collection; there is no append mode. The
/// courses collection is read-only.
pub trait RecordStore {
    fn load_students(&self) -> Result<Vec<Student>>;

    fn load_courses(&self) -> Result<Vec<Course>>;

    fn load_enrollments(&self) -> Result<Vec<Enrollment>>;

    fn save_students(&mut self, students: &[Student]) -> Result<()>;

    fn save_enrollments(&mut self, enrollments: &[Enrollment]) -> Result<()>;
}
