use crate::store::{Course, Ticket};
use crate::{RegistrarError, Result};
use std::collections::HashMap;

/// In-memory lookup of courses by ticket number
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_ticket: HashMap<Ticket, Course>,
    /// Tickets in ascending order, for listings
    ordered: Vec<Ticket>,
}

impl CatalogIndex {
    /// Build the index. A ticket that appears twice is an integrity error.
    pub fn build(courses: Vec<Course>) -> Result<Self> {
        let mut by_ticket = HashMap::with_capacity(courses.len());
        for course in courses {
            let ticket = course.ticket;
            if by_ticket.insert(ticket, course).is_some() {
                return Err(RegistrarError::Integrity(format!(
                    "course ticket {} appears more than once",
                    ticket
                )));
            }
        }

        let mut ordered: Vec<Ticket> = by_ticket.keys().copied().collect();
        ordered.sort_unstable();

        Ok(Self { by_ticket, ordered })
    }

    pub fn by_id(&self, ticket: Ticket) -> Option<&Course> {
        self.by_ticket.get(&ticket)
    }

    /// Like [`by_id`](Self::by_id) but with a NotFound error
    pub fn require(&self, ticket: Ticket) -> Result<&Course> {
        self.by_id(ticket)
            .ok_or(RegistrarError::CourseNotFound(ticket))
    }

    pub fn contains(&self, ticket: Ticket) -> bool {
        self.by_ticket.contains_key(&ticket)
    }

    /// All courses, ascending by ticket
    pub fn all_sorted_by_id(&self) -> impl Iterator<Item = &Course> + '_ {
        self.ordered.iter().filter_map(|ticket| self.by_ticket.get(ticket))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
