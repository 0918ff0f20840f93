//! Session: owns the loaded collections for one run of the program.
//!
//! Opening a session loads every collection through the record store; closing
//! it writes out anything a failed save left behind. All mutations go through
//! the session so the enrollment engine and the add-student path are the only
//! writers.

pub mod ids;
pub mod registry;

pub use ids::generate_student_id;
pub use registry::Registry;

use crate::config::{Limits, MalformedRows, RegistrarConfig};
use crate::engine::{Decision, EnrollmentEngine};
use crate::io::DataPaths;
use crate::query::{Query, Roster, Schedule};
use crate::store::{Course, DelimitedStore, RecordStore, Student, StudentId, Ticket};
use crate::{RegistrarError, Result};
use tracing::{info, warn};

pub struct Session<S: RecordStore> {
    store: S,
    registry: Registry,
    engine: EnrollmentEngine,
    /// Collections whose last save failed
    dirty_students: bool,
    dirty_enrollments: bool,
}

impl Session<DelimitedStore> {
    /// Open a session over the files named by `config`
    pub fn open_config(config: &RegistrarConfig) -> Result<Self> {
        config.validate()?;
        let store = DelimitedStore::new(DataPaths::from_config(config))
            .with_malformed_rows(config.malformed_rows);
        Self::open(store, config.limits(), config.malformed_rows)
    }
}

impl<S: RecordStore> Session<S> {
    /// Load every collection from `store`. Any load failure is fatal.
    pub fn open(store: S, limits: Limits, policy: MalformedRows) -> Result<Self> {
        let students = store.load_students()?;
        let courses = store.load_courses()?;
        let enrollments = store.load_enrollments()?;
        let registry = Registry::assemble(students, courses, enrollments, policy)?;

        info!(
            "Session opened: {} students, {} courses, {} enrollments",
            registry.students.len(),
            registry.catalog.len(),
            registry.enrollments.len()
        );

        Ok(Self {
            store,
            registry,
            engine: EnrollmentEngine::new(limits),
            dirty_students: false,
            dirty_enrollments: false,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limits(&self) -> &Limits {
        self.engine.limits()
    }

    pub fn query(&self) -> Query<'_> {
        Query::new(&self.registry)
    }

    pub fn register(&mut self, student: &StudentId, ticket: Ticket) -> Result<Decision> {
        let result = self
            .engine
            .register(&mut self.registry, &mut self.store, student, ticket);
        Self::track(&mut self.dirty_enrollments, result)
    }

    pub fn drop(&mut self, student: &StudentId, ticket: Ticket) -> Result<Decision> {
        let result = self
            .engine
            .drop(&mut self.registry, &mut self.store, student, ticket);
        Self::track(&mut self.dirty_enrollments, result)
    }

    /// Add a student with a generated identifier and rewrite the students file.
    ///
    /// If the save fails the student stays in memory and
    /// [`RegistrarError::Unsaved`] is returned.
    pub fn add_student(&mut self, first_name: &str, last_name: &str) -> Result<Student> {
        let id = generate_student_id(
            first_name,
            last_name,
            self.registry.students.iter().map(|s| &s.id),
        )?;
        let student = Student::new(id, first_name.trim(), last_name.trim());
        self.registry.students.push(student.clone());
        info!("Added student {}", student.id);

        match self.store.save_students(&self.registry.students) {
            Ok(()) => {
                self.dirty_students = false;
                Ok(student)
            }
            Err(e) => {
                self.dirty_students = true;
                Err(RegistrarError::Unsaved(Box::new(e)))
            }
        }
    }

    pub fn student_schedule(&self, student: &StudentId) -> Result<Schedule> {
        self.query().student_schedule(student)
    }

    pub fn course_roster(&self, ticket: Ticket) -> Result<Roster> {
        self.query().course_roster(ticket)
    }

    pub fn course_listing(&self) -> Vec<Course> {
        self.query().course_listing()
    }

    /// True while some in-memory change has not reached disk
    pub fn is_dirty(&self) -> bool {
        self.dirty_students || self.dirty_enrollments
    }

    /// Write out collections whose last save failed
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty_students {
            self.store.save_students(&self.registry.students)?;
            self.dirty_students = false;
        }
        if self.dirty_enrollments {
            self.store.save_enrollments(&self.registry.enrollments)?;
            self.dirty_enrollments = false;
        }
        Ok(())
    }

    /// Flush and hand back the store
    pub fn close(mut self) -> Result<S> {
        if self.is_dirty() {
            warn!("Flushing unsaved changes on close");
        }
        self.flush()?;
        info!("Session closed");
        Ok(self.store)
    }

    fn track(dirty: &mut bool, result: Result<Decision>) -> Result<Decision> {
        match &result {
            Ok(decision) if decision.is_applied() => *dirty = false,
            Err(e) if e.is_unsaved() => *dirty = true,
            _ => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Enrollment, MemoryStore};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn create_test_session() -> Session<MemoryStore> {
        let store = MemoryStore::new(
            vec![Student::new("alee0", "Ann", "Lee"), Student::new("alee1", "Al", "Lee")],
            vec![Course {
                ticket: 40123,
                code: "CS1A".to_string(),
                name: "Intro to Python".to_string(),
                credit_hours: Decimal::from(3),
                day: "MW".to_string(),
                time: "9:00-10:20".to_string(),
                instructor: "Smith".to_string(),
            }],
            Vec::new(),
        );
        Session::open(store, Limits::default(), MalformedRows::Reject).unwrap()
    }

    #[test]
    fn test_add_student_generates_id() {
        let mut session = create_test_session();
        let student = session.add_student("Ann", "Lee").unwrap();
        assert_eq!(student.id.as_str(), "alee2");
        assert_eq!(session.store().students.len(), 3);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_failed_save_then_flush() {
        let mut session = create_test_session();
        session.store.set_fail_saves(true);

        let err = session.register(&StudentId::new("alee0"), 40123).unwrap_err();
        assert!(err.is_unsaved());
        assert!(session.is_dirty());
        assert!(session.flush().is_err());

        session.store.set_fail_saves(false);
        let store = session.close().unwrap();
        assert_eq!(store.enrollments, vec![Enrollment::new("alee0", 40123)]);
    }

    #[test]
    fn test_failed_student_save_keeps_student() {
        let mut session = create_test_session();
        session.store.set_fail_saves(true);

        assert!(session.add_student("Bo", "Kim").unwrap_err().is_unsaved());
        assert!(session
            .registry()
            .has_student(&StudentId::new("bkim0")));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_later_success_clears_dirty() {
        let mut session = create_test_session();
        session.store.set_fail_saves(true);
        session.register(&StudentId::new("alee0"), 40123).unwrap_err();

        session.store.set_fail_saves(false);
        session.register(&StudentId::new("alee1"), 40123).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.store().enrollments.len(), 2);
    }
}
