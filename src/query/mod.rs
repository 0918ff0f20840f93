//! Query Service: read-only projections over a [`Registry`]

use crate::session::Registry;
use crate::store::{Course, Student, StudentId, Ticket};
use crate::{RegistrarError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// A student's enrolled courses, in the order the enrollments were made
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub student: Student,
    pub courses: Vec<Course>,
    pub total_units: Decimal,
}

/// The students enrolled in a course, in the order the enrollments were made
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    pub course: Course,
    pub students: Vec<Student>,
}

/// Read-only query engine over a registry
pub struct Query<'a> {
    registry: &'a Registry,
}

impl<'a> Query<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// The student's courses and total units
    pub fn student_schedule(&self, student: &StudentId) -> Result<Schedule> {
        let record = self
            .registry
            .find_student(student)
            .ok_or_else(|| RegistrarError::StudentNotFound(student.to_string()))?;

        let courses: Vec<Course> = self
            .registry
            .enrollments_of(student)
            .filter_map(|enrollment| self.registry.catalog.by_id(enrollment.ticket))
            .cloned()
            .collect();
        let total_units = self.registry.load(student);

        Ok(Schedule {
            student: record.clone(),
            courses,
            total_units,
        })
    }

    /// The course and its enrolled students
    pub fn course_roster(&self, ticket: Ticket) -> Result<Roster> {
        let course = self.registry.catalog.require(ticket)?;

        let students = self
            .registry
            .enrollments
            .iter()
            .filter(|enrollment| enrollment.ticket == ticket)
            .filter_map(|enrollment| self.registry.find_student(&enrollment.student))
            .cloned()
            .collect();

        Ok(Roster {
            course: course.clone(),
            students,
        })
    }

    /// Every course, ascending by ticket
    pub fn course_listing(&self) -> Vec<Course> {
        self.registry.catalog.all_sorted_by_id().cloned().collect()
    }

    pub fn find_student(&self, student: &StudentId) -> Option<&'a Student> {
        self.registry.find_student(student)
    }

    pub fn occupancy(&self, ticket: Ticket) -> usize {
        self.registry.occupancy(ticket)
    }

    pub fn load(&self, student: &StudentId) -> Decimal {
        self.registry.load(student)
    }
}
