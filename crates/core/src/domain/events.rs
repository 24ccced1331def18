/// Domain events emitted after a command has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new semester was appended and persisted
    SemesterAdded { name: String },

    /// Every semester with this name was removed
    SemesterDeleted { name: String, removed: usize },

    /// A batch of class edits was applied to a semester and persisted
    SemesterRevised { name: String },

    /// A single class was removed from a semester
    ClassRemoved { semester: String, class: String },

    /// A class removal named a class the semester does not have
    ClassNotFound { semester: String, class: String },

    /// A command referenced a semester that does not exist
    SemesterNotFound { name: String },

    /// A command was rejected without changing anything
    Rejected { reason: String },

    /// An action needed a selected semester but none was selected
    NothingSelected,

    /// The backing file was (re)loaded
    Loaded { semesters: usize, skipped: usize },

    /// User requested to quit the application
    QuitRequested,
}

impl Event {
    /// Short notice to show the user, if this event warrants one
    pub fn notice(&self) -> Option<String> {
        match self {
            Event::SemesterAdded { name } => Some(format!("Semester '{name}' added!")),
            Event::SemesterDeleted { name, .. } => Some(format!("{name} deleted!")),
            Event::SemesterRevised { .. } => Some("Semester updated!".to_string()),
            Event::ClassRemoved { class, .. } => Some(format!("{class} removed!")),
            Event::ClassNotFound { class, .. } => Some(format!("Class '{class}' not found")),
            Event::SemesterNotFound { .. } => Some("Semester not found".to_string()),
            Event::Rejected { reason } => Some(reason.clone()),
            Event::NothingSelected => Some("No semester selected".to_string()),
            Event::Loaded { skipped, .. } if *skipped > 0 => {
                Some(format!("Skipped {skipped} malformed line(s) while loading"))
            }
            Event::Loaded { .. } | Event::QuitRequested => None,
        }
    }
}
