//! Enrollment Engine
//!
//! The only component that mutates the enrollment collection. Each operation
//! runs every check against the current collections first and mutates only when
//! all of them pass, so a rejected register or drop leaves no trace. A successful
//! mutation rewrites the whole enrollments file through the record store.
//!
//! Register checks, first failure wins:
//! 1. the student is on file
//! 2. the ticket resolves in the catalog
//! 3. the course has a free seat (`occupancy < capacity`)
//! 4. current load plus the course's credit hours stays within the ceiling
//! 5. the pair is not already enrolled
//!
//! Drop checks the student, the ticket, then that the pair is enrolled, and
//! removes the first matching record.

pub mod decision;

pub use decision::{Decision, Rejection};

use crate::config::Limits;
use crate::session::Registry;
use crate::store::{Enrollment, RecordStore, StudentId, Ticket};
use crate::{RegistrarError, Result};
use tracing::{debug, info};

/// Validates and applies register/drop against a [`Registry`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentEngine {
    limits: Limits,
}

impl EnrollmentEngine {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Run the register checks without mutating anything
    pub fn check_register(
        &self,
        registry: &Registry,
        student: &StudentId,
        ticket: Ticket,
    ) -> std::result::Result<(), Rejection> {
        if !registry.has_student(student) {
            return Err(Rejection::StudentNotFound {
                student: student.clone(),
            });
        }

        let course = registry
            .catalog
            .by_id(ticket)
            .ok_or(Rejection::CourseNotFound { ticket })?;

        let occupancy = registry.occupancy(ticket);
        if occupancy >= self.limits.capacity {
            return Err(Rejection::CourseFull {
                ticket,
                occupancy,
                capacity: self.limits.capacity,
            });
        }

        let current = registry.load(student);
        // A sum too large for Decimal is over any ceiling
        let over_ceiling = current
            .checked_add(course.credit_hours)
            .map_or(true, |total| total > self.limits.unit_ceiling);
        if over_ceiling {
            return Err(Rejection::UnitLimitExceeded {
                ticket,
                current,
                requested: course.credit_hours,
                ceiling: self.limits.unit_ceiling,
            });
        }

        if registry.is_enrolled(student, ticket) {
            return Err(Rejection::AlreadyRegistered {
                student: student.clone(),
                ticket,
            });
        }

        Ok(())
    }

    /// Run the drop checks; on success returns the index of the record to remove
    pub fn check_drop(
        &self,
        registry: &Registry,
        student: &StudentId,
        ticket: Ticket,
    ) -> std::result::Result<usize, Rejection> {
        if !registry.has_student(student) {
            return Err(Rejection::StudentNotFound {
                student: student.clone(),
            });
        }

        if !registry.catalog.contains(ticket) {
            return Err(Rejection::CourseNotFound { ticket });
        }

        registry
            .position_of(student, ticket)
            .ok_or_else(|| Rejection::NotRegistered {
                student: student.clone(),
                ticket,
            })
    }

    /// Enroll `student` in `ticket` and persist the enrollment collection.
    ///
    /// If the save fails the enrollment stays in memory and the error is
    /// returned as [`RegistrarError::Unsaved`].
    pub fn register<S: RecordStore + ?Sized>(
        &self,
        registry: &mut Registry,
        store: &mut S,
        student: &StudentId,
        ticket: Ticket,
    ) -> Result<Decision> {
        if let Err(rejection) = self.check_register(registry, student, ticket) {
            debug!("Register {} -> {} rejected: {}", student, ticket, rejection.code());
            return Ok(rejection.into());
        }

        // Store the identifier as the student record spells it
        let canonical = registry
            .find_student(student)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| student.clone());
        registry
            .enrollments
            .push(Enrollment::new(canonical.clone(), ticket));
        info!("Registered {} for {}", canonical, ticket);

        persist(registry, store)?;
        Ok(Decision::Registered {
            student: canonical,
            ticket,
        })
    }

    /// Remove `student` from `ticket` and persist the enrollment collection.
    pub fn drop<S: RecordStore + ?Sized>(
        &self,
        registry: &mut Registry,
        store: &mut S,
        student: &StudentId,
        ticket: Ticket,
    ) -> Result<Decision> {
        let index = match self.check_drop(registry, student, ticket) {
            Ok(index) => index,
            Err(rejection) => {
                debug!("Drop {} -> {} rejected: {}", student, ticket, rejection.code());
                return Ok(rejection.into());
            }
        };

        let removed = registry.enrollments.remove(index);
        info!("Dropped {} from {}", removed.student, ticket);

        persist(registry, store)?;
        Ok(Decision::Dropped {
            student: removed.student,
            ticket,
        })
    }
}

fn persist<S: RecordStore + ?Sized>(registry: &Registry, store: &mut S) -> Result<()> {
    store
        .save_enrollments(&registry.enrollments)
        .map_err(|e| RegistrarError::Unsaved(Box::new(e)))
}
