//! Input validation for timetabling problems.
//!
//! Checks structural integrity of modules, lecturers, and rooms before
//! the engine starts searching. Detects:
//! - Duplicate codes/ids/names
//! - Odd or zero weekly hours
//! - Modules with no audience
//! - Modules with no qualified lecturer
//! - Modules no room can ever host
//!
//! The driver runs these checks and fails fast; callers are expected to
//! have validated already, but the engine never loops on impossible
//! input.

use std::collections::HashSet;

use crate::ga::TimetableProblem;

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
    /// Two entities share the same code/id/name.
    DuplicateId,
    /// Weekly hours are zero or odd.
    InvalidHours,
    /// A module has no target groups.
    EmptyAudience,
    /// A lecturer's qualification references an unknown module.
    UnknownModuleReference,
    /// No lecturer is qualified for a module.
    NoQualifiedLecturer,
    /// No room can ever host a module.
    NoFeasibleRoom,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a timetabling problem.
///
/// Checks:
/// 1. No duplicate module codes, lecturer ids, or room names
/// 2. Every module has even, non-zero weekly hours
/// 3. Every module has at least one target group
/// 4. Lecturer qualifications reference existing modules
/// 5. Every module has at least one qualified lecturer
/// 6. Every module fits at least one room (capacity and programs)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(problem: &TimetableProblem) -> ValidationResult {
    let mut errors = Vec::new();

    let mut module_codes = HashSet::new();
    for m in &problem.modules {
        if !module_codes.insert(m.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate module code: {}", m.code),
            ));
        }
        if m.weekly_hours == 0 || m.weekly_hours % 2 != 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "Module '{}' has {} weekly hours (must be even and ≥ 2)",
                    m.code, m.weekly_hours
                ),
            ));
        }
        if m.target_groups.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyAudience,
                format!("Module '{}' has no target groups", m.code),
            ));
        }
    }

    let mut lecturer_ids = HashSet::new();
    for l in &problem.lecturers {
        if !lecturer_ids.insert(l.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lecturer id: {}", l.id),
            ));
        }
        for code in &l.qualified_modules {
            if !module_codes.contains(code.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownModuleReference,
                    format!("Lecturer '{}' references unknown module '{}'", l.id, code),
                ));
            }
        }
    }

    let mut room_names = HashSet::new();
    for r in &problem.rooms {
        if !room_names.insert(r.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room name: {}", r.name),
            ));
        }
    }

    for code in problem.unteachable_modules() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoQualifiedLecturer,
            format!("Module '{code}' has no qualified lecturer"),
        ));
    }

    for code in problem.unroomable_modules() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoFeasibleRoom,
            format!("Module '{code}' fits no room (capacity or program restrictions)"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
