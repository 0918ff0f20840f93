use pretty_assertions::assert_eq;
use registrar::config::{Limits, MalformedRows};
use registrar::store::{Course, Enrollment, MemoryStore, Student, StudentId};
use registrar::{Decision, Rejection, Session};
use rust_decimal::Decimal;
use std::str::FromStr;

fn course(ticket: u32, units: &str) -> Course {
    Course {
        ticket,
        code: format!("C{}", ticket),
        name: format!("Course {}", ticket),
        credit_hours: Decimal::from_str(units).unwrap(),
        day: "MW".to_string(),
        time: "9:00-10:20".to_string(),
        instructor: "Staff".to_string(),
    }
}

fn students(count: usize) -> Vec<Student> {
    (0..count)
        .map(|n| Student::new(format!("s{}", n), "First", "Last"))
        .collect()
}

fn open(students: Vec<Student>, courses: Vec<Course>, enrollments: Vec<Enrollment>) -> Session<MemoryStore> {
    let store = MemoryStore::new(students, courses, enrollments);
    Session::open(store, Limits::default(), MalformedRows::Reject).unwrap()
}

fn id(raw: &str) -> StudentId {
    StudentId::new(raw)
}

fn assert_invariants(session: &Session<MemoryStore>) {
    let registry = session.registry();
    let limits = session.limits();

    for course in registry.catalog.all_sorted_by_id() {
        assert!(registry.occupancy(course.ticket) <= limits.capacity);
    }
    for student in &registry.students {
        assert!(registry.load(&student.id) <= limits.unit_ceiling);
    }
    for (i, a) in registry.enrollments.iter().enumerate() {
        for b in &registry.enrollments[i + 1..] {
            assert!(!(a.student == b.student && a.ticket == b.ticket));
        }
    }
}

#[test]
fn test_invariants_hold_over_operation_sequence() {
    let courses = vec![
        course(1, "5"),
        course(2, "4"),
        course(3, "3"),
        course(4, "1.5"),
    ];
    let mut session = open(students(20), courses, Vec::new());

    // Deterministic pseudo-random walk over register/drop requests
    let mut seed: u64 = 7;
    for _ in 0..500 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let student = id(&format!("s{}", (seed >> 33) % 22));
        let ticket = ((seed >> 17) % 5) as u32;
        let register = (seed >> 7) % 3 != 0;

        let decision = if register {
            session.register(&student, ticket).unwrap()
        } else {
            session.drop(&student, ticket).unwrap()
        };
        if let Some(rejection) = decision.rejection() {
            assert!(!decision.is_applied(), "{}", rejection);
        }
        assert_invariants(&session);
    }

    assert_eq!(
        session.store().enrollments,
        session.registry().enrollments
    );
}

#[test]
fn test_register_then_drop_restores_collection() {
    let existing = vec![Enrollment::new("s1", 2)];
    let mut session = open(students(2), vec![course(1, "3"), course(2, "3")], existing.clone());

    let registered = session.register(&id("s0"), 1).unwrap();
    assert!(registered.is_applied());
    let dropped = session.drop(&id("s0"), 1).unwrap();
    assert!(dropped.is_applied());

    assert_eq!(session.registry().enrollments, existing);
    assert_eq!(session.store().enrollments, existing);
}

#[test]
fn test_already_registered_does_not_duplicate() {
    let mut session = open(students(1), vec![course(1, "3")], vec![Enrollment::new("s0", 1)]);

    let decision = session.register(&id("S0"), 1).unwrap();
    assert_eq!(
        decision.rejection(),
        Some(&Rejection::AlreadyRegistered {
            student: id("s0"),
            ticket: 1
        })
    );
    assert_eq!(session.registry().enrollments.len(), 1);
    assert_eq!(session.store().save_count(), 0);
}

#[test]
fn test_drop_when_not_registered_changes_nothing() {
    let mut session = open(students(2), vec![course(1, "3")], vec![Enrollment::new("s1", 1)]);

    let decision = session.drop(&id("s0"), 1).unwrap();
    assert_eq!(decision.to_string(), "s0 is not registered for 1.");
    assert_eq!(session.registry().enrollments, vec![Enrollment::new("s1", 1)]);
    assert_eq!(session.store().save_count(), 0);
}

#[test]
fn test_course_full_at_capacity() {
    let enrollments: Vec<Enrollment> = (0..15)
        .map(|n| Enrollment::new(format!("s{}", n).as_str(), 9))
        .collect();
    let mut session = open(students(16), vec![course(9, "3")], enrollments);

    let decision = session.register(&id("s15"), 9).unwrap();
    assert_eq!(
        decision,
        Decision::Rejected(Rejection::CourseFull {
            ticket: 9,
            occupancy: 15,
            capacity: 15
        })
    );
    assert_eq!(decision.to_string(), "9 is full.");
    assert_eq!(session.registry().occupancy(9), 15);
}

#[test]
fn test_unit_ceiling_exceeded() {
    let mut session = open(
        students(1),
        vec![course(1, "5"), course(2, "5"), course(3, "3")],
        vec![Enrollment::new("s0", 1), Enrollment::new("s0", 2)],
    );

    let decision = session.register(&id("s0"), 3).unwrap();
    assert!(matches!(
        decision.rejection(),
        Some(Rejection::UnitLimitExceeded { ticket: 3, .. })
    ));
    assert_eq!(
        decision.to_string(),
        "Cannot register for 3. Exceeds maximum unit limit."
    );
    assert_eq!(session.registry().load(&id("s0")), Decimal::from(10));
}

#[test]
fn test_reaching_the_ceiling_exactly() {
    let mut session = open(
        students(1),
        vec![course(1, "3"), course(2, "9"), course(3, "1")],
        vec![Enrollment::new("s0", 1)],
    );

    assert!(session.register(&id("s0"), 2).unwrap().is_applied());
    assert_eq!(session.registry().load(&id("s0")), Decimal::from(12));

    let decision = session.register(&id("s0"), 3).unwrap();
    assert!(matches!(
        decision.rejection(),
        Some(Rejection::UnitLimitExceeded { .. })
    ));
}

#[test]
fn test_unknown_student_reported_before_unknown_course() {
    let mut session = open(students(1), vec![course(1, "3")], Vec::new());

    let decision = session.register(&id("ghost"), 404).unwrap();
    assert_eq!(
        decision.rejection(),
        Some(&Rejection::StudentNotFound {
            student: id("ghost")
        })
    );

    let decision = session.drop(&id("s0"), 404).unwrap();
    assert_eq!(decision.to_string(), "404 not found.");
}

#[test]
fn test_failed_save_keeps_change_and_flushes_later() {
    let mut store = MemoryStore::new(students(1), vec![course(1, "3")], Vec::new());
    store.set_fail_saves(true);
    let mut session = Session::open(store, Limits::default(), MalformedRows::Reject).unwrap();

    let err = session.register(&id("s0"), 1).unwrap_err();
    assert!(err.is_unsaved());
    assert!(session.is_dirty());
    assert_eq!(session.registry().enrollments, vec![Enrollment::new("s0", 1)]);
    assert!(session.store().enrollments.is_empty());
    assert!(session.close().is_err());
}

#[test]
fn test_flush_after_recovered_store() {
    let mut session = open(students(1), vec![course(1, "3")], Vec::new());
    assert!(session.register(&id("s0"), 1).unwrap().is_applied());
    assert!(!session.is_dirty());

    let store = session.close().unwrap();
    assert_eq!(store.enrollments, vec![Enrollment::new("s0", 1)]);
    assert_eq!(store.save_count(), 1);
}
