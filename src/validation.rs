//! Consistency audit for booked state.
//!
//! Checks that the timeline and the artist directory agree and that the
//! timeline is conflict-free. Detects:
//! - Overlapping slots
//! - Directory entries pointing at performances no longer booked
//! - Directory entries filed under the wrong artist name
//! - Directory entries that are not the latest booking for their name
//! - Booked artists missing from the directory
//!
//! The engine never produces these states; the audit exists so callers
//! and tests can verify that after any sequence of operations.

use std::collections::HashMap;

use crate::models::PerformanceId;
use crate::timeline::Timeline;
use crate::views::ArtistDirectory;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two booked performances overlap in time.
    OverlappingSlots,
    /// The directory points at a performance that is not in the timeline.
    DanglingDirectoryEntry,
    /// The directory files a performance under another artist's name.
    MismatchedArtist,
    /// The directory points at an older booking than the latest one.
    StaleDirectoryEntry,
    /// A booked artist has no directory entry.
    MissingDirectoryEntry,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audits a timeline against its directory.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_state(timeline: &Timeline, directory: &ArtistDirectory) -> ValidationResult {
    let mut errors = Vec::new();

    // Pairwise overlap check
    let performances: Vec<_> = timeline.iter().collect();
    for (i, a) in performances.iter().enumerate() {
        for b in &performances[i + 1..] {
            if a.conflicts_with(b) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingSlots,
                    format!("{} ({}) overlaps {} ({})", a.id(), a.slot(), b.id(), b.slot()),
                ));
            }
        }
    }

    // Ids are assigned in booking order, so the highest id is the latest booking
    let mut latest: HashMap<&str, PerformanceId> = HashMap::new();
    for p in &performances {
        let entry = latest.entry(p.artist().name()).or_insert(p.id());
        if p.id() > *entry {
            *entry = p.id();
        }
    }

    for (name, id) in directory.iter() {
        match timeline.get(id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::DanglingDirectoryEntry,
                format!("Directory entry '{name}' points at unbooked performance {id}"),
            )),
            Some(p) if p.artist().name() != name => errors.push(ValidationError::new(
                ValidationErrorKind::MismatchedArtist,
                format!(
                    "Directory entry '{name}' points at {id} booked for '{}'",
                    p.artist().name()
                ),
            )),
            Some(_) => {
                if let Some(&newest) = latest.get(name) {
                    if newest != id {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::StaleDirectoryEntry,
                            format!("Directory entry '{name}' points at {id}, latest is {newest}"),
                        ));
                    }
                }
            }
        }
    }

    for name in latest.keys() {
        if directory.lookup(name).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingDirectoryEntry,
                format!("Booked artist '{name}' has no directory entry"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artist, Performance, TimeSlot};
    use std::sync::Arc;

    fn perf(id: u64, name: &str, start: i64, end: i64) -> Performance {
        Performance::new(
            PerformanceId::new(id),
            Arc::new(Artist::new(name, "Rock", 50)),
            TimeSlot::new(start, end).unwrap(),
        )
    }

    fn booked(entries: &[(u64, &str, i64, i64)]) -> (Timeline, ArtistDirectory) {
        let mut timeline = Timeline::new();
        let mut directory = ArtistDirectory::new();
        for &(id, name, start, end) in entries {
            let p = perf(id, name, start, end);
            directory.register(&p);
            timeline.insert(p).unwrap();
        }
        (timeline, directory)
    }

    #[test]
    fn test_valid_state() {
        let (timeline, directory) = booked(&[(1, "A", 14, 16), (2, "B", 16, 18), (3, "A", 18, 19)]);
        assert!(validate_state(&timeline, &directory).is_ok());
    }

    #[test]
    fn test_empty_state() {
        assert!(validate_state(&Timeline::new(), &ArtistDirectory::new()).is_ok());
    }

    #[test]
    fn test_dangling_entry() {
        let (mut timeline, directory) = booked(&[(1, "A", 14, 16)]);
        timeline.remove(PerformanceId::new(1)).unwrap();

        let errors = validate_state(&timeline, &directory).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingDirectoryEntry));
    }

    #[test]
    fn test_missing_entry() {
        let (timeline, _) = booked(&[(1, "A", 14, 16)]);
        let errors = validate_state(&timeline, &ArtistDirectory::new()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingDirectoryEntry);
    }

    #[test]
    fn test_stale_entry() {
        let (timeline, _) = booked(&[(1, "A", 14, 16), (2, "A", 16, 18)]);
        let mut directory = ArtistDirectory::new();
        directory.register(timeline.get(PerformanceId::new(1)).unwrap());

        let errors = validate_state(&timeline, &directory).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::StaleDirectoryEntry));
    }

    #[test]
    fn test_mismatched_artist() {
        let (timeline, _) = booked(&[(1, "A", 14, 16)]);
        let mut directory = ArtistDirectory::new();
        // Same id, different name: simulates a corrupted index
        directory.register(&perf(1, "B", 1, 2));

        let errors = validate_state(&timeline, &directory).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MismatchedArtist));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingDirectoryEntry));
    }
}
