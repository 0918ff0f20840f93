//! Tab-delimited record files
//!
//! One record per line, fields separated by a tab, surrounding whitespace trimmed.
//! Saves replace the whole file: the new contents are written to a temporary file
//! beside the target and renamed over it, so a crash leaves either the old or the
//! new file, never a truncated one.

use super::types::{Course, Enrollment, Student, StudentId, Ticket};
use super::RecordStore;
use crate::config::MalformedRows;
use crate::io::DataPaths;
use crate::{RegistrarError, Result};
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub const STUDENT_FIELDS: usize = 3;
pub const COURSE_FIELDS: usize = 7;
pub const ENROLLMENT_FIELDS: usize = 2;

/// Record store backed by three tab-delimited files
#[derive(Debug, Clone)]
pub struct DelimitedStore {
    paths: DataPaths,
    malformed_rows: MalformedRows,
}

impl DelimitedStore {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            malformed_rows: MalformedRows::default(),
        }
    }

    pub fn with_malformed_rows(mut self, policy: MalformedRows) -> Self {
        self.malformed_rows = policy;
        self
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    fn read_records<T>(
        &self,
        path: &Path,
        expected: usize,
        policy: MalformedRows,
        mut parse: impl FnMut(&[&str], u64) -> Result<T>,
    ) -> Result<Vec<T>> {
        let file = File::open(path).map_err(|source| RegistrarError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            // A whitespace-only line trims down to one empty field
            if row.len() == 1 && row[0].is_empty() {
                continue;
            }

            if row.len() != expected {
                match policy {
                    MalformedRows::Reject => {
                        return Err(RegistrarError::MalformedRow {
                            path: path.to_path_buf(),
                            line,
                            expected,
                            found: row.len(),
                        });
                    }
                    MalformedRows::Skip => {
                        warn!(
                            "Skipping row {} of {:?}: expected {} fields, found {}",
                            line,
                            path,
                            expected,
                            row.len()
                        );
                        continue;
                    }
                }
            }

            let fields: Vec<&str> = row.iter().collect();
            records.push(parse(&fields, line)?);
        }

        debug!("Read {} records from {:?}", records.len(), path);
        Ok(records)
    }
}

impl RecordStore for DelimitedStore {
    fn load_students(&self) -> Result<Vec<Student>> {
        let path = &self.paths.students;
        // Never skipped: the next full rewrite would erase the row from disk
        let policy = MalformedRows::Reject;
        let students = self.read_records(path, STUDENT_FIELDS, policy, |fields, line| {
            if fields[0].is_empty() {
                return Err(parse_error(path, line, "empty student identifier"));
            }
            Ok(Student::new(fields[0], fields[1], fields[2]))
        })?;
        info!("Loaded {} students from {:?}", students.len(), path);
        Ok(students)
    }

    fn load_courses(&self) -> Result<Vec<Course>> {
        let path = &self.paths.courses;
        let policy = self.malformed_rows;
        let courses = self.read_records(path, COURSE_FIELDS, policy, |fields, line| {
            Ok(Course {
                ticket: parse_ticket(path, line, fields[0])?,
                code: fields[1].to_string(),
                name: fields[2].to_string(),
                credit_hours: parse_credit_hours(path, line, fields[3])?,
                day: fields[4].to_string(),
                time: fields[5].to_string(),
                instructor: fields[6].to_string(),
            })
        })?;
        info!("Loaded {} courses from {:?}", courses.len(), path);
        Ok(courses)
    }

    fn load_enrollments(&self) -> Result<Vec<Enrollment>> {
        let path = &self.paths.enrollments;
        // Nothing has been registered yet on a fresh data directory
        if !path.exists() {
            info!("No enrollments file at {:?}, starting empty", path);
            return Ok(Vec::new());
        }

        let policy = self.malformed_rows;
        let enrollments = self.read_records(path, ENROLLMENT_FIELDS, policy, |fields, line| {
            if fields[0].is_empty() {
                return Err(parse_error(path, line, "empty student identifier"));
            }
            Ok(Enrollment {
                student: StudentId::new(fields[0]),
                ticket: parse_ticket(path, line, fields[1])?,
            })
        })?;
        info!("Loaded {} enrollments from {:?}", enrollments.len(), path);
        Ok(enrollments)
    }

    fn save_students(&mut self, students: &[Student]) -> Result<()> {
        write_atomically(&self.paths.students, |writer| {
            for student in students {
                writer.write_record([
                    student.id.as_str(),
                    student.first_name.as_str(),
                    student.last_name.as_str(),
                ])?;
            }
            Ok(())
        })?;
        debug!("Wrote {} students to {:?}", students.len(), self.paths.students);
        Ok(())
    }

    fn save_enrollments(&mut self, enrollments: &[Enrollment]) -> Result<()> {
        write_atomically(&self.paths.enrollments, |writer| {
            for enrollment in enrollments {
                let ticket = enrollment.ticket.to_string();
                writer.write_record([enrollment.student.as_str(), ticket.as_str()])?;
            }
            Ok(())
        })?;
        debug!(
            "Wrote {} enrollments to {:?}",
            enrollments.len(),
            self.paths.enrollments
        );
        Ok(())
    }
}

fn parse_error(path: &Path, line: u64, message: impl Into<String>) -> RegistrarError {
    RegistrarError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn parse_ticket(path: &Path, line: u64, raw: &str) -> Result<Ticket> {
    raw.parse::<Ticket>()
        .map_err(|_| parse_error(path, line, format!("invalid ticket number '{}'", raw)))
}

fn parse_credit_hours(path: &Path, line: u64, raw: &str) -> Result<Decimal> {
    let hours = Decimal::from_str(raw)
        .map_err(|_| parse_error(path, line, format!("invalid credit hours '{}'", raw)))?;
    if hours.is_sign_negative() && !hours.is_zero() {
        return Err(parse_error(
            path,
            line,
            format!("credit hours must not be negative, got {}", raw),
        ));
    }
    Ok(hours)
}

fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut csv::Writer<&mut NamedTempFile>) -> csv::Result<()>,
) -> Result<()> {
    let write_error = |source: std::io::Error| RegistrarError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut tmp = NamedTempFile::new_in(&dir).map_err(write_error)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(&mut tmp);
        write(&mut writer).map_err(|e| write_error(e.into()))?;
        writer.flush().map_err(write_error)?;
    }

    tmp.as_file().sync_all().map_err(write_error)?;

    // Keep the permissions of the file being replaced
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions()).map_err(write_error)?;
    }

    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
