//! Decision types returned by the enrollment engine
//!
//! Business-rule outcomes are ordinary values. A rejected register or drop
//! leaves every collection untouched; only IO failures travel as errors.

use crate::error::ErrorCategory;
use crate::store::{StudentId, Ticket};
use rust_decimal::Decimal;
use std::fmt;

/// Why a register or drop was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The student identifier is not on file
    StudentNotFound { student: StudentId },

    /// The ticket does not resolve in the catalog
    CourseNotFound { ticket: Ticket },

    /// Every seat is taken
    CourseFull {
        ticket: Ticket,
        occupancy: usize,
        capacity: usize,
    },

    /// Adding the course would push the student's load past the ceiling
    UnitLimitExceeded {
        ticket: Ticket,
        current: Decimal,
        requested: Decimal,
        ceiling: Decimal,
    },

    /// The pair is already enrolled
    AlreadyRegistered { student: StudentId, ticket: Ticket },

    /// Drop of a pair that is not enrolled
    NotRegistered { student: StudentId, ticket: Ticket },
}

impl Rejection {
    /// Stable snake_case name for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::StudentNotFound { .. } => "student_not_found",
            Rejection::CourseNotFound { .. } => "course_not_found",
            Rejection::CourseFull { .. } => "course_full",
            Rejection::UnitLimitExceeded { .. } => "unit_limit_exceeded",
            Rejection::AlreadyRegistered { .. } => "already_registered",
            Rejection::NotRegistered { .. } => "not_registered",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Rejection::StudentNotFound { .. } | Rejection::CourseNotFound { .. } => {
                ErrorCategory::NotFound
            }
            _ => ErrorCategory::Validation,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::StudentNotFound { student } => write!(f, "{} was not found.", student),
            Rejection::CourseNotFound { ticket } => write!(f, "{} not found.", ticket),
            Rejection::CourseFull { ticket, .. } => write!(f, "{} is full.", ticket),
            Rejection::UnitLimitExceeded { ticket, .. } => write!(
                f,
                "Cannot register for {}. Exceeds maximum unit limit.",
                ticket
            ),
            Rejection::AlreadyRegistered { student, .. } => {
                write!(f, "{} is already registered for this course.", student)
            }
            Rejection::NotRegistered { student, ticket } => {
                write!(f, "{} is not registered for {}.", student, ticket)
            }
        }
    }
}

/// Result of a register or drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Registered { student: StudentId, ticket: Ticket },
    Dropped { student: StudentId, ticket: Ticket },
    Rejected(Rejection),
}

impl Decision {
    /// True when the enrollment collection changed
    pub fn is_applied(&self) -> bool {
        !matches!(self, Decision::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Decision::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Decision::Registered { .. } => "registered",
            Decision::Dropped { .. } => "dropped",
            Decision::Rejected(rejection) => rejection.code(),
        }
    }
}

impl From<Rejection> for Decision {
    fn from(rejection: Rejection) -> Self {
        Decision::Rejected(rejection)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Registered { student, ticket } => {
                write!(f, "{} was added to {}.", student, ticket)
            }
            Decision::Dropped { student, ticket } => {
                write!(f, "{} was dropped from {}.", student, ticket)
            }
            Decision::Rejected(rejection) => rejection.fmt(f),
        }
    }
}
