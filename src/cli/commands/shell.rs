//! Interactive registration session
//!
//! Prompts for a student identifier (or `add` to create one), then runs a
//! menu of info/list/detail/register/drop until `exit` or end of input.

use super::add::validate_name;
use super::{CommandHandler, CommandResult};
use crate::cli::app::OutputFormat;
use crate::cli::render;
use crate::engine::{Decision, Rejection};
use crate::session::Session;
use crate::store::{RecordStore, StudentId, Ticket};
use crate::{RegistrarError, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const LOGIN_PROMPT: &str =
    "Enter Student ID (or 'add' to add a new student, or 'exit' to exit the application): ";
const TICKET_PROMPT: &str = "Enter course ticket # (or 'exit'): ";

const MENU: &str = "\
info     - Student information
list     - Course listing
detail   - Course detail
register - Register for a class
drop     - Drop class
menu     - Menu
exit     - Exit
";

/// Handler for the `shell` command, reading from stdin
pub struct ShellCommand;

impl CommandHandler for ShellCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        Shell::new(&mut input, out).run(session)?;
        Ok(CommandResult::Success)
    }

    fn name(&self) -> &'static str {
        "shell"
    }
}

/// Line-oriented session over any input and output
pub struct Shell<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(input: &'a mut R, out: &'a mut W) -> Self {
        Self { input, out }
    }

    pub fn run<S: RecordStore>(&mut self, session: &mut Session<S>) -> Result<()> {
        writeln!(self.out, "Course Registration")?;
        writeln!(self.out)?;

        loop {
            let Some(entry) = self.prompt(LOGIN_PROMPT)? else {
                break;
            };

            let student = match entry.to_lowercase().as_str() {
                "" => continue,
                "exit" => break,
                "add" => match self.add_student(session)? {
                    Some(id) => id,
                    None => break,
                },
                _ => {
                    let id = StudentId::new(entry.as_str());
                    match session.query().find_student(&id) {
                        Some(student) => student.id.clone(),
                        None => {
                            writeln!(self.out, "{} was not found.", entry)?;
                            writeln!(self.out)?;
                            continue;
                        }
                    }
                }
            };

            // Leaving the menu ends the session
            self.menu(session, &student)?;
            break;
        }

        writeln!(self.out, "Session ended.")?;
        Ok(())
    }

    /// Read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_student<S: RecordStore>(&mut self, session: &mut Session<S>) -> Result<Option<StudentId>> {
        loop {
            writeln!(self.out)?;
            let Some(last_name) = self.prompt("Enter Student's Last Name: ")? else {
                return Ok(None);
            };
            let Some(first_name) = self.prompt("Enter Student's First Name: ")? else {
                return Ok(None);
            };
            writeln!(self.out)?;

            if let Err(e) = validate_name(&first_name).and_then(|_| validate_name(&last_name)) {
                writeln!(self.out, "{}", validation_message(&e))?;
                continue;
            }

            return match session.add_student(&first_name, &last_name) {
                Ok(student) => {
                    writeln!(self.out, "Student {} has been added.", student.id)?;
                    Ok(Some(student.id))
                }
                Err(e) if e.is_unsaved() => {
                    writeln!(self.out, "{}", e)?;
                    // The student exists in memory even though the file is stale
                    Ok(session.registry().students.last().map(|s| s.id.clone()))
                }
                Err(e) => Err(e),
            };
        }
    }

    fn menu<S: RecordStore>(
        &mut self,
        session: &mut Session<S>,
        student: &StudentId,
    ) -> Result<()> {
        if let Some(record) = session.query().find_student(student) {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "Welcome {}, what would you like to do today?",
                record.first_name
            )?;
        }
        writeln!(self.out)?;
        write!(self.out, "{}", MENU)?;
        writeln!(self.out)?;

        loop {
            let Some(selection) = self.prompt("Enter your selection: ")? else {
                return Ok(());
            };
            debug!("Shell selection: {}", selection);

            match selection.to_lowercase().as_str() {
                "info" => {
                    let schedule = session.student_schedule(student)?;
                    writeln!(self.out)?;
                    render::schedule(self.out, &schedule, OutputFormat::Text)?;
                }
                "list" => {
                    writeln!(self.out)?;
                    render::listing(self.out, &session.course_listing(), OutputFormat::Text)?;
                }
                "detail" => {
                    if let Some(ticket) = self.ticket(session)? {
                        let roster = session.course_roster(ticket)?;
                        writeln!(self.out)?;
                        render::roster(self.out, &roster, OutputFormat::Text)?;
                    }
                }
                "register" => {
                    if let Some(decision) =
                        self.mutate(session, |session, ticket| session.register(student, ticket))?
                    {
                        writeln!(self.out, "{}", decision)?;
                    }
                }
                "drop" => {
                    if let Some(decision) =
                        self.mutate(session, |session, ticket| session.drop(student, ticket))?
                    {
                        writeln!(self.out, "{}", decision)?;
                    }
                }
                "menu" => {
                    writeln!(self.out)?;
                    write!(self.out, "{}", MENU)?;
                }
                "exit" => return Ok(()),
                _ => writeln!(self.out, "Invalid selection, please try again.")?,
            }
            writeln!(self.out)?;
        }
    }

    /// Prompt until a ticket in the catalog is entered; `None` on exit or end of input
    fn ticket<S: RecordStore>(&mut self, session: &Session<S>) -> Result<Option<Ticket>> {
        loop {
            let Some(entry) = self.prompt(TICKET_PROMPT)? else {
                return Ok(None);
            };
            if entry.eq_ignore_ascii_case("exit") {
                return Ok(None);
            }
            match entry.parse::<Ticket>() {
                Ok(ticket) if session.registry().catalog.contains(ticket) => {
                    return Ok(Some(ticket))
                }
                _ => writeln!(self.out, "{} not found.", entry)?,
            }
        }
    }

    /// Ask for a ticket and apply `apply`; an unsaved change is reported, not fatal
    fn mutate<S: RecordStore>(
        &mut self,
        session: &mut Session<S>,
        apply: impl Fn(&mut Session<S>, Ticket) -> Result<Decision>,
    ) -> Result<Option<Decision>> {
        let Some(ticket) = self.ticket(session)? else {
            return Ok(None);
        };
        match apply(session, ticket) {
            Ok(Decision::Rejected(Rejection::CourseNotFound { ticket })) => {
                writeln!(self.out, "{} not found.", ticket)?;
                Ok(None)
            }
            Ok(decision) => Ok(Some(decision)),
            Err(e) if e.is_unsaved() => {
                writeln!(self.out, "{}", e)?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn validation_message(error: &RegistrarError) -> String {
    match error {
        RegistrarError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}
