use crate::domain::{ClassRecord, Grade, Semester};
use crate::store::GradeStore;

/// One graded class, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassView {
    pub name: String,
    pub earned: i64,
    pub total: i64,
    pub grade: Grade,
}

impl ClassView {
    pub fn line(&self) -> String {
        format!("{}: {}/{} - Grade: {}", self.name, self.earned, self.total, self.grade)
    }
}

impl From<&ClassRecord> for ClassView {
    fn from(record: &ClassRecord) -> Self {
        Self {
            name: record.name.clone(),
            earned: record.earned,
            total: record.total,
            grade: record.grade(),
        }
    }
}

/// A semester with grades computed for every class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterView {
    pub name: String,
    pub classes: Vec<ClassView>,
}

impl From<&Semester> for SemesterView {
    fn from(semester: &Semester) -> Self {
        Self {
            name: semester.name.clone(),
            classes: semester.classes().iter().map(ClassView::from).collect(),
        }
    }
}

/// Read-only projection of the store for UI consumption
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadProjection {
    /// Semesters in store order, duplicates included
    pub semesters: Vec<SemesterView>,
}

impl ReadProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_store(store: &GradeStore) -> Self {
        Self {
            semesters: store.semesters().iter().map(SemesterView::from).collect(),
        }
    }

    pub fn semester_names(&self) -> Vec<&str> {
        self.semesters.iter().map(|s| s.name.as_str()).collect()
    }

    /// First semester with this name
    pub fn semester(&self, name: &str) -> Option<&SemesterView> {
        self.semesters.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::HeaderStyle;
    use crate::ports::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_projection_from_store() -> crate::Result<()> {
        let mut store = GradeStore::new(Arc::new(MemoryStorage::new()), HeaderStyle::Substring);
        let mut fall = Semester::new("Fall Semester");
        fall.add_class("Math", 95, 100);
        fall.add_class("Art", 55, 100);
        store.add_semester(fall)?;
        store.add_semester(Semester::new("Spring Semester"))?;

        let projection = ReadProjection::from_store(&store);
        assert_eq!(projection.semester_names(), vec!["Fall Semester", "Spring Semester"]);

        let fall = projection.semester("Fall Semester").map(|s| s.classes.clone());
        let lines: Vec<String> = fall.unwrap_or_default().iter().map(ClassView::line).collect();
        assert_eq!(lines, vec!["Math: 95/100 - Grade: A", "Art: 55/100 - Grade: F"]);
        Ok(())
    }

    #[test]
    fn test_empty_projection() {
        let projection = ReadProjection::new();
        assert!(projection.is_empty());
        assert_eq!(projection.len(), 0);
        assert!(projection.semester("Fall Semester").is_none());
    }
}
