use anyhow::Result;
use gradecalc_core::app::{build_semester, parse_class_batch, ClassInput, Command, ReadProjection};
use gradecalc_core::format::HeaderStyle;
use gradecalc_core::ports::SnapshotStorage;
use gradecalc_core::{CoreError, Event, GradeStore, LoadReport, Semester};
use std::sync::Arc;
use tracing::{info, warn};

/// Executes commands against the grade store and reports the outcome as an event.
///
/// Validation failures come back as `Event::Rejected` and leave the store
/// untouched. Storage failures are returned as errors for the caller to surface.
pub struct GradeService {
    store: GradeStore,
    projection: ReadProjection,
}

impl GradeService {
    pub fn new(store: GradeStore) -> Self {
        let projection = ReadProjection::from_store(&store);
        Self { store, projection }
    }

    /// Open the store over `storage` and load it
    pub fn open(storage: Arc<dyn SnapshotStorage>, style: HeaderStyle) -> Result<(Self, Event)> {
        let (store, report) = GradeStore::open(storage, style)?;
        log_load_report(&store, &report);
        let event = Event::Loaded {
            semesters: report.semesters,
            skipped: report.skipped.len(),
        };
        Ok((Self::new(store), event))
    }

    /// Current read projection (for UI queries)
    pub fn projection(&self) -> &ReadProjection {
        &self.projection
    }

    pub fn store(&self) -> &GradeStore {
        &self.store
    }

    /// Handle a command (CQRS Command side)
    pub fn handle_command(&mut self, cmd: Command) -> Result<Event> {
        let event = match cmd {
            Command::AddSemester { name, classes } => self.add_semester(&name, &classes)?,
            Command::ReviseSemester { name, classes } => self.revise_semester(&name, &classes)?,
            Command::RemoveClass { semester, class } => self.remove_class(&semester, &class)?,
            Command::DeleteSemester { name } => self.delete_semester(&name)?,
            Command::Reload => {
                let report = self.store.load()?;
                log_load_report(&self.store, &report);
                Event::Loaded {
                    semesters: report.semesters,
                    skipped: report.skipped.len(),
                }
            }
            Command::Quit => {
                info!("Quit command received");
                Event::QuitRequested
            }
        };

        self.projection = ReadProjection::from_store(&self.store);
        Ok(event)
    }

    fn add_semester(&mut self, name: &str, classes: &[ClassInput]) -> Result<Event> {
        let semester = match build_semester(name, classes) {
            Ok(semester) => semester,
            Err(err) => return rejection(err),
        };

        self.warn_on_ambiguous_names(&semester);
        let name = semester.name.clone();
        self.store.add_semester(semester)?;
        info!("Added semester '{}'", name);
        Ok(Event::SemesterAdded { name })
    }

    fn revise_semester(&mut self, name: &str, classes: &[ClassInput]) -> Result<Event> {
        let records = match parse_class_batch(classes) {
            Ok(records) => records,
            Err(err) => return rejection(err),
        };

        if !self.store.update_classes(name, &records)? {
            return Ok(Event::SemesterNotFound { name: name.to_string() });
        }
        if let Some(semester) = self.store.semester(name) {
            self.warn_on_ambiguous_names(semester);
        }

        info!("Revised {} class(es) in '{}'", records.len(), name);
        Ok(Event::SemesterRevised { name: name.to_string() })
    }

    fn remove_class(&mut self, semester: &str, class: &str) -> Result<Event> {
        if self.store.semester(semester).is_none() {
            return Ok(Event::SemesterNotFound { name: semester.to_string() });
        }

        if !self.store.remove_class(semester, class) {
            return Ok(Event::ClassNotFound {
                semester: semester.to_string(),
                class: class.to_string(),
            });
        }

        self.store.save()?;
        info!("Removed class '{}' from '{}'", class, semester);
        Ok(Event::ClassRemoved {
            semester: semester.to_string(),
            class: class.to_string(),
        })
    }

    fn delete_semester(&mut self, name: &str) -> Result<Event> {
        let removed = self.store.delete_semester(name)?;
        if removed == 0 {
            return Ok(Event::SemesterNotFound { name: name.to_string() });
        }

        info!("Deleted {} semester(s) named '{}'", removed, name);
        Ok(Event::SemesterDeleted {
            name: name.to_string(),
            removed,
        })
    }

    /// Names the file format cannot read back faithfully are accepted but logged
    fn warn_on_ambiguous_names(&self, semester: &Semester) {
        let style = self.store.header_style();
        if !style.header_round_trips(&semester.name) {
            warn!(
                "Semester '{}' will not be recognised as a header on reload ({} header style)",
                semester.name, style
            );
        }
        for class in semester.classes() {
            if style.class_collides(&class.name) {
                warn!(
                    "Class '{}' in '{}' will be read back as a semester header ({} header style)",
                    class.name, semester.name, style
                );
            } else if !style.class_round_trips(&class.name) {
                warn!(
                    "Class '{}' in '{}' will be skipped as malformed on reload",
                    class.name, semester.name
                );
            }
        }
    }
}

fn rejection(err: CoreError) -> Result<Event> {
    warn!("Rejected submission: {}", err);
    Ok(Event::Rejected { reason: err.reason() })
}

fn log_load_report(store: &GradeStore, report: &LoadReport) {
    for skipped in &report.skipped {
        warn!("Skipping {} in {}", skipped, store.location());
    }
    info!(
        "Loaded {} semester(s) from {}",
        report.semesters,
        store.location()
    );
}
