use gradecalc_core::app::{ClassInput, ReadProjection, SemesterView};
use gradecalc_core::domain::Event;
use std::time::{Duration, Instant};

/// Entries on the start page, in display order
pub const START_MENU: [&str; 3] = ["Add Semester", "View Past Semesters", "Exit"];

/// The TUI Model - this represents the complete UI state
/// This is separate from the core ReadProjection to allow UI-specific state
#[derive(Debug)]
pub struct TuiModel {
    /// Core data from the grade service
    pub projection: ReadProjection,

    /// Current page
    pub mode: ViewMode,

    /// Cursor position in the start menu or semester list
    pub cursor: usize,

    /// Form being edited on the add and revise pages
    pub form: FormState,

    /// Transient notice shown at the bottom of the screen
    pub notice: Option<Notice>,

    /// Errors that need acknowledging (storage failures)
    pub errors: Vec<String>,

    /// How long a notice stays visible
    pub notice_ttl: Duration,

    /// Number of blank class rows in a new add form
    pub class_rows: usize,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// Pages of the TUI
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ViewMode {
    #[default]
    Start,

    /// Form for a new semester
    AddSemester,

    /// List of stored semesters
    SemesterList,

    /// Graded classes of one semester
    SemesterDetails { name: String },

    /// Form for revising the classes of one semester
    Revise { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub shown_at: Instant,
}

/// Column of a class row in a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassColumn {
    Name,
    Earned,
    Total,
}

impl ClassColumn {
    const ALL: [ClassColumn; 3] = [ClassColumn::Name, ClassColumn::Earned, ClassColumn::Total];
}

/// A focusable field in a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    SemesterName,
    Class { row: usize, column: ClassColumn },
}

/// Text entry state for the add and revise forms
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormState {
    /// Semester name entry; `None` when revising an existing semester
    pub semester_name: Option<String>,

    /// Class rows as typed
    pub rows: Vec<ClassInput>,

    /// Class names as stored when the revise form was opened, per row
    pub original_names: Vec<Option<String>>,

    /// Index of the focused field
    pub focus: usize,
}

impl FormState {
    /// Blank form for a new semester
    pub fn for_new_semester(rows: usize) -> Self {
        Self {
            semester_name: Some(String::new()),
            rows: vec![ClassInput::default(); rows],
            original_names: vec![None; rows],
            focus: 0,
        }
    }

    /// Form prefilled with a semester's classes plus one blank row
    pub fn for_revision(semester: &SemesterView) -> Self {
        let mut rows: Vec<ClassInput> = semester
            .classes
            .iter()
            .map(|c| ClassInput::new(c.name.clone(), c.earned.to_string(), c.total.to_string()))
            .collect();
        let mut original_names: Vec<Option<String>> =
            semester.classes.iter().map(|c| Some(c.name.clone())).collect();

        rows.push(ClassInput::default());
        original_names.push(None);

        Self {
            semester_name: None,
            rows,
            original_names,
            focus: 0,
        }
    }

    pub fn field_count(&self) -> usize {
        usize::from(self.semester_name.is_some()) + self.rows.len() * ClassColumn::ALL.len()
    }

    /// Field at a flat focus index
    pub fn field_at(&self, index: usize) -> Option<FormField> {
        if index >= self.field_count() {
            return None;
        }

        let index = match self.semester_name {
            Some(_) if index == 0 => return Some(FormField::SemesterName),
            Some(_) => index - 1,
            None => index,
        };
        Some(FormField::Class {
            row: index / ClassColumn::ALL.len(),
            column: ClassColumn::ALL[index % ClassColumn::ALL.len()],
        })
    }

    pub fn focused_field(&self) -> Option<FormField> {
        self.field_at(self.focus)
    }

    pub fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Text of a field
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::SemesterName => self.semester_name.as_deref().unwrap_or_default(),
            FormField::Class { row, column } => match self.rows.get(row) {
                Some(input) => match column {
                    ClassColumn::Name => &input.name,
                    ClassColumn::Earned => &input.earned,
                    ClassColumn::Total => &input.total,
                },
                None => "",
            },
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused_field()? {
            FormField::SemesterName => self.semester_name.as_mut(),
            FormField::Class { row, column } => {
                let input = self.rows.get_mut(row)?;
                Some(match column {
                    ClassColumn::Name => &mut input.name,
                    ClassColumn::Earned => &mut input.earned,
                    ClassColumn::Total => &mut input.total,
                })
            }
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Row of the focused field, if it is a class field
    pub fn focused_row(&self) -> Option<usize> {
        match self.focused_field()? {
            FormField::Class { row, .. } => Some(row),
            FormField::SemesterName => None,
        }
    }

    /// Stored class name behind the focused row, if it came from the store
    pub fn focused_original_name(&self) -> Option<&str> {
        let row = self.focused_row()?;
        self.original_names.get(row)?.as_deref()
    }
}

impl Default for TuiModel {
    fn default() -> Self {
        Self {
            projection: ReadProjection::default(),
            mode: ViewMode::default(),
            cursor: 0,
            form: FormState::default(),
            notice: None,
            errors: Vec::new(),
            notice_ttl: Duration::from_secs(3),
            class_rows: 7,
            should_quit: false,
        }
    }
}

impl TuiModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(notice_ttl: Duration, class_rows: usize) -> Self {
        Self {
            notice_ttl,
            class_rows,
            ..Self::default()
        }
    }

    /// Update the model with a new projection from the grade service
    pub fn update_projection(&mut self, projection: ReadProjection) {
        self.projection = projection;
        self.clamp_cursor();
    }

    /// Apply an event to update the UI state
    pub fn apply_event(&mut self, event: &Event) {
        if let Some(text) = event.notice() {
            self.show_notice(text);
        }

        match event {
            Event::SemesterAdded { .. } => {
                self.go_to(ViewMode::Start);
            }

            Event::SemesterRevised { name } => {
                self.go_to(ViewMode::SemesterDetails { name: name.clone() });
            }

            Event::ClassRemoved { semester, .. } => {
                // Rebuild the form so the removed row disappears
                if let Some(view) = self.projection.semester(semester) {
                    self.form = FormState::for_revision(view);
                }
            }

            Event::SemesterDeleted { .. } => {
                self.mode = ViewMode::SemesterList;
                self.clamp_cursor();
            }

            Event::SemesterNotFound { .. } => {
                if matches!(
                    self.mode,
                    ViewMode::SemesterDetails { .. } | ViewMode::Revise { .. }
                ) {
                    self.go_to(ViewMode::Start);
                }
            }

            Event::QuitRequested => {
                self.should_quit = true;
            }

            Event::Rejected { .. }
            | Event::NothingSelected
            | Event::ClassNotFound { .. }
            | Event::Loaded { .. } => {}
        }
    }

    /// Switch pages, resetting page-local state
    pub fn go_to(&mut self, mode: ViewMode) {
        self.form = match &mode {
            ViewMode::AddSemester => FormState::for_new_semester(self.class_rows),
            ViewMode::Revise { name } => self
                .projection
                .semester(name)
                .map(FormState::for_revision)
                .unwrap_or_default(),
            _ => FormState::default(),
        };

        if !matches!(mode, ViewMode::SemesterList) {
            self.cursor = 0;
        }
        self.mode = mode;
        self.clamp_cursor();
    }

    /// Number of selectable items on the current page
    pub fn item_count(&self) -> usize {
        match self.mode {
            ViewMode::Start => START_MENU.len(),
            ViewMode::SemesterList => self.projection.len(),
            _ => 0,
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.item_count() {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let count = self.item_count();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }

    /// Name of the semester under the cursor on the list page
    pub fn selected_semester(&self) -> Option<&str> {
        self.projection
            .semesters
            .get(self.cursor)
            .map(|s| s.name.as_str())
    }

    pub fn show_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            shown_at: Instant::now(),
        });
    }

    /// Drop the notice once it has been visible for `notice_ttl`
    pub fn clear_expired_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.saturating_duration_since(notice.shown_at) >= self.notice_ttl {
                self.notice = None;
            }
        }
    }

    /// Add an error message
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }

    /// Clear all error messages
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradecalc_core::app::ClassView;
    use gradecalc_core::Grade;

    fn projection(names: &[&str]) -> ReadProjection {
        ReadProjection {
            semesters: names
                .iter()
                .map(|name| SemesterView {
                    name: name.to_string(),
                    classes: vec![ClassView {
                        name: "Math".to_string(),
                        earned: 95,
                        total: 100,
                        grade: Grade::A,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn test_model_new() {
        let model = TuiModel::new();
        assert_eq!(model.mode, ViewMode::Start);
        assert_eq!(model.item_count(), START_MENU.len());
        assert!(model.notice.is_none());
        assert!(!model.should_quit);
    }

    #[test]
    fn test_add_form_fields() {
        let form = FormState::for_new_semester(2);
        assert_eq!(form.field_count(), 7);
        assert_eq!(form.field_at(0), Some(FormField::SemesterName));
        assert_eq!(
            form.field_at(1),
            Some(FormField::Class { row: 0, column: ClassColumn::Name })
        );
        assert_eq!(
            form.field_at(6),
            Some(FormField::Class { row: 1, column: ClassColumn::Total })
        );
        assert_eq!(form.field_at(7), None);
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = FormState::for_new_semester(1);
        form.focus_prev();
        assert_eq!(form.focus, 3);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_form_typing_goes_to_focused_field() {
        let mut form = FormState::for_new_semester(1);
        for c in "Fall Semesterr".chars() {
            form.push_char(c);
        }
        form.pop_char();
        form.focus_next();
        form.push_char('M');

        assert_eq!(form.semester_name.as_deref(), Some("Fall Semester"));
        assert_eq!(form.rows[0].name, "M");
        assert_eq!(form.text(FormField::SemesterName), "Fall Semester");
    }

    #[test]
    fn test_revision_form_is_prefilled() {
        let projection = projection(&["Fall Semester"]);
        let form = FormState::for_revision(&projection.semesters[0]);

        assert_eq!(form.semester_name, None);
        assert_eq!(form.rows[0], ClassInput::new("Math", "95", "100"));
        assert_eq!(form.rows[1], ClassInput::default());
        assert_eq!(form.focused_original_name(), Some("Math"));
        assert_eq!(form.field_at(0), Some(FormField::Class { row: 0, column: ClassColumn::Name }));
    }

    #[test]
    fn test_cursor_bounds_on_list() {
        let mut model = TuiModel::new();
        model.update_projection(projection(&["A Semester", "B Semester"]));
        model.go_to(ViewMode::SemesterList);

        model.cursor_up();
        assert_eq!(model.cursor, 0);
        for _ in 0..5 {
            model.cursor_down();
        }
        assert_eq!(model.cursor, 1);
        assert_eq!(model.selected_semester(), Some("B Semester"));
    }

    #[test]
    fn test_delete_clamps_cursor() {
        let mut model = TuiModel::new();
        model.update_projection(projection(&["A Semester", "B Semester"]));
        model.go_to(ViewMode::SemesterList);
        model.cursor_down();

        model.update_projection(projection(&["A Semester"]));
        model.apply_event(&Event::SemesterDeleted { name: "B Semester".to_string(), removed: 1 });

        assert_eq!(model.cursor, 0);
        assert_eq!(model.notice.as_ref().map(|n| n.text.as_str()), Some("B Semester deleted!"));
    }

    #[test]
    fn test_added_returns_to_start() {
        let mut model = TuiModel::new();
        model.go_to(ViewMode::AddSemester);
        model.apply_event(&Event::SemesterAdded { name: "Fall Semester".to_string() });
        assert_eq!(model.mode, ViewMode::Start);
    }

    #[test]
    fn test_rejection_keeps_form() {
        let mut model = TuiModel::new();
        model.go_to(ViewMode::AddSemester);
        model.form.push_char('X');

        model.apply_event(&Event::Rejected { reason: "earned/total must be an integer".to_string() });
        assert_eq!(model.mode, ViewMode::AddSemester);
        assert_eq!(model.form.semester_name.as_deref(), Some("X"));
    }

    #[test]
    fn test_notice_expires() {
        let mut model = TuiModel::with_settings(Duration::from_secs(3), 7);
        model.show_notice("hello".to_string());
        let shown_at = model.notice.as_ref().map(|n| n.shown_at).unwrap_or_else(Instant::now);

        model.clear_expired_notice(shown_at + Duration::from_secs(1));
        assert!(model.notice.is_some());
        model.clear_expired_notice(shown_at + Duration::from_secs(3));
        assert!(model.notice.is_none());
    }
}
