use crate::domain::{ClassRecord, Grade, Semester};
use crate::error::{CoreError, Result};
use crate::format::{self, HeaderStyle, SkippedLine};
use crate::ports::SnapshotStorage;
use std::sync::Arc;

/// What a load found in the backing storage
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub semesters: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Authoritative in-memory collection of semesters with snapshot persistence.
///
/// Collection-level mutations (`add_semester`, `delete_semester`,
/// `update_semester`, `update_classes`) rewrite the whole snapshot.
/// Per-class edits (`add_class`, `remove_class`) do not; call [`GradeStore::save`]
/// after a batch of them.
///
/// Semester names are not unique. Lookups and `update_semester` act on the
/// first match, `delete_semester` removes every match.
pub struct GradeStore {
    storage: Arc<dyn SnapshotStorage>,
    style: HeaderStyle,
    semesters: Vec<Semester>,
}

impl GradeStore {
    /// Create an empty store without touching storage
    pub fn new(storage: Arc<dyn SnapshotStorage>, style: HeaderStyle) -> Self {
        Self {
            storage,
            style,
            semesters: Vec::new(),
        }
    }

    /// Create a store and load whatever is in storage
    pub fn open(storage: Arc<dyn SnapshotStorage>, style: HeaderStyle) -> Result<(Self, LoadReport)> {
        let mut store = Self::new(storage, style);
        let report = store.load()?;
        Ok((store, report))
    }

    /// Replace the in-memory collection with the stored snapshot.
    ///
    /// Missing storage yields an empty collection. Malformed class lines are
    /// skipped and listed in the report.
    pub fn load(&mut self) -> Result<LoadReport> {
        let decoded = match self.storage.read().map_err(CoreError::storage)? {
            Some(text) => format::decode(&text, self.style),
            None => format::Decoded::default(),
        };

        self.semesters = decoded.semesters;
        Ok(LoadReport {
            semesters: self.semesters.len(),
            skipped: decoded.skipped,
        })
    }

    /// Overwrite storage with the full collection
    pub fn save(&self) -> Result<()> {
        self.storage
            .write(&self.snapshot())
            .map_err(CoreError::storage)
    }

    /// The exact text `save` writes
    pub fn snapshot(&self) -> String {
        format::encode(&self.semesters, self.style)
    }

    /// On-disk block for one semester
    pub fn serialize(&self, semester: &Semester) -> String {
        format::encode_semester(semester, self.style)
    }

    pub fn header_style(&self) -> HeaderStyle {
        self.style
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn semester_names(&self) -> Vec<&str> {
        self.semesters.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn semester(&self, name: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.name == name)
    }

    pub fn semester_mut(&mut self, name: &str) -> Option<&mut Semester> {
        self.semesters.iter_mut().find(|s| s.name == name)
    }

    /// Append a semester and persist. Duplicate names are kept as separate entries.
    pub fn add_semester(&mut self, semester: Semester) -> Result<()> {
        self.semesters.push(semester);
        self.save()
    }

    /// Remove every semester named `name` and persist. Returns how many were removed.
    pub fn delete_semester(&mut self, name: &str) -> Result<usize> {
        let before = self.semesters.len();
        self.semesters.retain(|s| s.name != name);
        let removed = before - self.semesters.len();
        self.save()?;
        Ok(removed)
    }

    /// Replace the first semester named `name` and persist.
    /// Returns whether a replacement happened.
    pub fn update_semester(&mut self, name: &str, updated: Semester) -> Result<bool> {
        let replaced = match self.semester_mut(name) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        };
        self.save()?;
        Ok(replaced)
    }

    /// Upsert a class in the named semester. Not persisted.
    pub fn add_class(&mut self, semester: &str, class: &str, earned: i64, total: i64) -> bool {
        match self.semester_mut(semester) {
            Some(s) => {
                s.add_class(class, earned, total);
                true
            }
            None => false,
        }
    }

    /// Remove a class from the named semester if present. Not persisted.
    pub fn remove_class(&mut self, semester: &str, class: &str) -> bool {
        self.semester_mut(semester)
            .is_some_and(|s| s.remove_class(class))
    }

    /// Upsert a batch of classes into the named semester, then persist once.
    /// Returns `false` without saving if the semester does not exist.
    pub fn update_classes(&mut self, semester: &str, classes: &[ClassRecord]) -> Result<bool> {
        let Some(target) = self.semester_mut(semester) else {
            return Ok(false);
        };
        target.apply_classes(classes);
        self.save()?;
        Ok(true)
    }

    /// Grade for every class of the named semester, in class order
    pub fn calculate_grades(&self, semester: &str) -> Option<Vec<(String, Grade)>> {
        self.semester(semester).map(Semester::calculate_grades)
    }
}

impl std::fmt::Debug for GradeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradeStore")
            .field("location", &self.storage.location())
            .field("style", &self.style)
            .field("semesters", &self.semesters)
            .finish()
    }
}
