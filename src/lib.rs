//! Course registration record manager.
//!
//! Students, courses and enrollments live in tab-delimited files. A
//! [`Session`](session::Session) loads them, the
//! [`EnrollmentEngine`](engine::EnrollmentEngine) applies register/drop under the
//! capacity and unit-load ceilings, and [`Query`](query::Query) answers
//! schedule, roster and listing questions.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod query;
pub mod session;
pub mod store;

pub use engine::{Decision, EnrollmentEngine, Rejection};
pub use error::{ErrorCategory, RegistrarError, Result};
pub use session::Session;
