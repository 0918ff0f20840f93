use crate::catalog::CatalogIndex;
use crate::config::MalformedRows;
use crate::store::{Course, Enrollment, Student, StudentId, Ticket};
use crate::{RegistrarError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::warn;

/// The three in-memory collections a session works on.
///
/// Fields are read freely; only the enrollment engine and the add-student
/// path push or remove records.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub students: Vec<Student>,
    pub catalog: CatalogIndex,
    /// Enrollment records in the order they were created
    pub enrollments: Vec<Enrollment>,
}

impl Registry {
    /// Assemble the collections, checking the invariants the files cannot enforce:
    /// unique students, and enrollments that are unique and point at a known
    /// student and course. A duplicate student always fails. Enrollment
    /// violations follow `policy`: `Reject` fails, `Skip` drops the offending
    /// record with a warning.
    pub fn assemble(
        students: Vec<Student>,
        courses: Vec<Course>,
        enrollments: Vec<Enrollment>,
        policy: MalformedRows,
    ) -> Result<Self> {
        let catalog = CatalogIndex::build(courses)?;

        let mut seen_students = HashSet::with_capacity(students.len());
        let mut kept_students = Vec::with_capacity(students.len());
        for student in students {
            if seen_students.insert(student.id.clone()) {
                kept_students.push(student);
            } else {
                // The students file is rewritten whole, so a dropped duplicate would be lost
                return Err(RegistrarError::Integrity(format!(
                    "student {} appears more than once",
                    student.id
                )));
            }
        }

        let mut seen_pairs = HashSet::with_capacity(enrollments.len());
        let mut kept_enrollments = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let problem = if !seen_students.contains(&enrollment.student) {
                Some(format!(
                    "enrollment references unknown student {}",
                    enrollment.student
                ))
            } else if !catalog.contains(enrollment.ticket) {
                Some(format!(
                    "enrollment of {} references unknown course {}",
                    enrollment.student, enrollment.ticket
                ))
            } else if seen_pairs.contains(&enrollment) {
                Some(format!(
                    "{} is enrolled in {} more than once",
                    enrollment.student, enrollment.ticket
                ))
            } else {
                None
            };

            match problem {
                Some(message) => reject_or_skip(policy, message)?,
                None => {
                    seen_pairs.insert(enrollment.clone());
                    kept_enrollments.push(enrollment);
                }
            }
        }

        Ok(Self {
            students: kept_students,
            catalog,
            enrollments: kept_enrollments,
        })
    }

    /// Case-insensitive student lookup
    pub fn find_student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|student| &student.id == id)
    }

    pub fn has_student(&self, id: &StudentId) -> bool {
        self.find_student(id).is_some()
    }

    /// Number of seats taken in a course
    pub fn occupancy(&self, ticket: Ticket) -> usize {
        self.enrollments
            .iter()
            .filter(|enrollment| enrollment.ticket == ticket)
            .count()
    }

    /// Sum of credit hours over the student's enrolled courses, saturating at
    /// `Decimal::MAX`
    pub fn load(&self, student: &StudentId) -> Decimal {
        self.enrollments_of(student)
            .filter_map(|enrollment| self.catalog.by_id(enrollment.ticket))
            .fold(Decimal::ZERO, |total, course| {
                total.saturating_add(course.credit_hours)
            })
    }

    pub fn is_enrolled(&self, student: &StudentId, ticket: Ticket) -> bool {
        self.position_of(student, ticket).is_some()
    }

    /// Index of the first enrollment record for the pair
    pub fn position_of(&self, student: &StudentId, ticket: Ticket) -> Option<usize> {
        self.enrollments
            .iter()
            .position(|enrollment| enrollment.matches(student, ticket))
    }

    /// The student's enrollments in creation order
    pub fn enrollments_of<'a>(
        &'a self,
        student: &'a StudentId,
    ) -> impl Iterator<Item = &'a Enrollment> + 'a {
        self.enrollments
            .iter()
            .filter(move |enrollment| &enrollment.student == student)
    }
}

fn reject_or_skip(policy: MalformedRows, message: String) -> Result<()> {
    match policy {
        MalformedRows::Reject => Err(RegistrarError::Integrity(message)),
        MalformedRows::Skip => {
            warn!("Dropping record on load: {}", message);
            Ok(())
        }
    }
}
