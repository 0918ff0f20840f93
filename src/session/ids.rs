use crate::store::StudentId;
use crate::{RegistrarError, Result};
use std::collections::HashSet;

/// Build an identifier from the first initial and last name plus the smallest
/// non-negative suffix not already taken, e.g. `Ann Lee` -> `alee0`.
///
/// Identifiers are ASCII-lowercased; the in-use check ignores ASCII case like
/// every other identifier comparison.
pub fn generate_student_id<'a, I>(first_name: &str, last_name: &str, existing: I) -> Result<StudentId>
where
    I: IntoIterator<Item = &'a StudentId>,
{
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    let initial = first_name
        .chars()
        .next()
        .ok_or_else(|| RegistrarError::Validation("first name cannot be blank".to_string()))?;
    if last_name.is_empty() {
        return Err(RegistrarError::Validation(
            "last name cannot be blank".to_string(),
        ));
    }

    let base = format!("{}{}", initial, last_name).to_ascii_lowercase();
    let taken: HashSet<&StudentId> = existing.into_iter().collect();

    let mut number: u64 = 0;
    loop {
        let candidate = StudentId::new(format!("{}{}", base, number));
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
        number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<StudentId> {
        raw.iter().map(|id| StudentId::new(*id)).collect()
    }

    #[test]
    fn test_first_free_suffix() {
        let existing = ids(&["alee0", "alee1"]);
        let id = generate_student_id("Ann", "Lee", &existing).unwrap();
        assert_eq!(id.as_str(), "alee2");
    }

    #[test]
    fn test_fills_gaps() {
        let existing = ids(&["alee0", "alee2"]);
        let id = generate_student_id("Alan", "Lee", &existing).unwrap();
        assert_eq!(id.as_str(), "alee1");
    }

    #[test]
    fn test_no_collision_starts_at_zero() {
        let id = generate_student_id("Bo", "Kim", &ids(&["alee0"])).unwrap();
        assert_eq!(id.as_str(), "bkim0");
    }

    #[test]
    fn test_existing_uppercase_counts_as_taken() {
        let existing = ids(&["ALee0"]);
        let id = generate_student_id("ann", "lee", &existing).unwrap();
        assert_eq!(id.as_str(), "alee1");
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(generate_student_id("  ", "Lee", &ids(&[])).is_err());
        assert!(generate_student_id("Ann", "", &ids(&[])).is_err());
    }

    #[test]
    fn test_lowercases_ascii_only() {
        let id = generate_student_id("Élise", "Lee", &ids(&[])).unwrap();
        assert_eq!(id.as_str(), "Élee0");

        // Differs from `élee0` outside ASCII, so the two are distinct identifiers
        let existing = ids(&["élee0"]);
        let id = generate_student_id("Élise", "Lee", &existing).unwrap();
        assert_eq!(id.as_str(), "Élee0");
        assert!(id != existing[0]);
    }
}
