use crate::domain::{ClassRecord, Semester};
use crate::error::{CoreError, Result};

/// Raw class row as typed into a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassInput {
    pub name: String,
    pub earned: String,
    pub total: String,
}

impl ClassInput {
    pub fn new(name: impl Into<String>, earned: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            earned: earned.into(),
            total: total.into(),
        }
    }
}

impl From<&ClassRecord> for ClassInput {
    fn from(record: &ClassRecord) -> Self {
        Self::new(
            record.name.clone(),
            record.earned.to_string(),
            record.total.to_string(),
        )
    }
}

/// Commands that can be sent to the grade service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a semester from a name and its class rows
    AddSemester { name: String, classes: Vec<ClassInput> },

    /// Apply a revised class list to an existing semester
    ReviseSemester { name: String, classes: Vec<ClassInput> },

    /// Remove one class from a semester and persist
    RemoveClass { semester: String, class: String },

    /// Delete every semester with this name
    DeleteSemester { name: String },

    /// Re-read the backing file
    Reload,

    /// Quit the application
    Quit,
}

/// Parse form rows into class records.
///
/// Rows with an empty class name are ignored. If any remaining row has a
/// non-integer earned or total, the whole batch is rejected.
pub fn parse_class_batch(inputs: &[ClassInput]) -> Result<Vec<ClassRecord>> {
    let mut records = Vec::with_capacity(inputs.len());

    for input in inputs {
        let name = input.name.trim();
        if name.is_empty() {
            continue;
        }

        let parse = |value: &str| {
            value.trim().parse::<i64>().map_err(|_| CoreError::InvalidScore {
                class: name.to_string(),
                value: value.to_string(),
            })
        };
        let earned = parse(&input.earned)?;
        let total = parse(&input.total)?;
        records.push(ClassRecord::new(name, earned, total));
    }

    Ok(records)
}

/// Build a new semester from a submitted form
pub fn build_semester(name: &str, inputs: &[ClassInput]) -> Result<Semester> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::EmptySemesterName);
    }

    let mut semester = Semester::new(name);
    semester.apply_classes(&parse_class_batch(inputs)?);
    Ok(semester)
}
