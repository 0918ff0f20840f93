//! Text and JSON rendering of query results and decisions

use super::app::OutputFormat;
use crate::engine::Decision;
use crate::query::{Roster, Schedule};
use crate::store::{Course, Student};
use crate::Result;
use serde_json::json;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "Ticket")]
    ticket: u32,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Course Name")]
    name: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Instructor")]
    instructor: String,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            ticket: course.ticket,
            code: course.code.clone(),
            name: course.name.clone(),
            units: format!("{:.1}", course.credit_hours),
            day: course.day.clone(),
            time: course.time.clone(),
            instructor: course.instructor.clone(),
        }
    }
}

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "Student ID")]
    id: String,
    #[tabled(rename = "First Name")]
    first_name: String,
    #[tabled(rename = "Last Name")]
    last_name: String,
}

impl From<&Student> for StudentRow {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.to_string(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
        }
    }
}

fn course_table(courses: &[Course]) -> String {
    let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
    Table::new(rows).with(Style::psql()).to_string()
}

fn write_json<W: Write + ?Sized>(out: &mut W, value: &impl serde::Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn listing<W: Write + ?Sized>(out: &mut W, courses: &[Course], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &courses),
        OutputFormat::Text => {
            writeln!(out, "Course Listing by Ticket")?;
            writeln!(out, "{}", course_table(courses))?;
            writeln!(out, "{} Courses", courses.len())?;
            Ok(())
        }
    }
}

pub fn schedule<W: Write + ?Sized>(out: &mut W, schedule: &Schedule, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, schedule),
        OutputFormat::Text => {
            let student = &schedule.student;
            writeln!(out, "Student id: {}", student.id)?;
            writeln!(out, "{}, {}", student.first_name, student.last_name)?;
            writeln!(out, "Registered Courses")?;
            writeln!(out, "{}", course_table(&schedule.courses))?;
            writeln!(out, "{} Course(s) Registered", schedule.courses.len())?;
            writeln!(out, "Units: {:.1}", schedule.total_units)?;
            Ok(())
        }
    }
}

pub fn roster<W: Write + ?Sized>(out: &mut W, roster: &Roster, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, roster),
        OutputFormat::Text => {
            let course = &roster.course;
            writeln!(out, "Code: {} Course Name: {}", course.code, course.name)?;
            writeln!(
                out,
                "Units: {:.1} Day: {} Time: {}",
                course.credit_hours, course.day, course.time
            )?;
            writeln!(out, "Instructor: {}", course.instructor)?;
            if roster.students.is_empty() {
                writeln!(out, "No students registered for this course.")?;
            } else {
                let rows: Vec<StudentRow> = roster.students.iter().map(StudentRow::from).collect();
                writeln!(out, "{}", Table::new(rows).with(Style::psql()))?;
                writeln!(out, "Total Students Registered: {}", roster.students.len())?;
            }
            Ok(())
        }
    }
}

pub fn decision<W: Write + ?Sized>(out: &mut W, decision: &Decision, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(
            out,
            &json!({
                "outcome": decision.code(),
                "applied": decision.is_applied(),
                "message": decision.to_string(),
            }),
        ),
        OutputFormat::Text => {
            writeln!(out, "{}", decision)?;
            Ok(())
        }
    }
}

pub fn student_added<W: Write + ?Sized>(out: &mut W, student: &Student, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, student),
        OutputFormat::Text => {
            writeln!(out, "Student {} has been added.", student.id)?;
            Ok(())
        }
    }
}
