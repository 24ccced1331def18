use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use gradecalc_core::app::Command;
use gradecalc_core::domain::Event;
use super::model::{TuiModel, ViewMode};

/// Messages that can be sent from the TUI to the grade service
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// Send a command to the grade service
    Command(Command),

    /// Apply an event locally without involving the service
    Event(Event),

    /// No action needed
    None,
}

/// The Update function - handles user input and updates the model
/// This is the core of the MVU pattern's Update component
pub struct TuiUpdate;

impl TuiUpdate {
    /// Handle a key press and update the model accordingly
    /// Returns a TuiMessage that should be sent to the grade service
    pub fn handle_key(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(TuiMessage::Command(Command::Quit));
        }

        // Any key acknowledges pending errors
        if !model.errors.is_empty() {
            model.clear_errors();
            return Ok(TuiMessage::None);
        }

        match model.mode.clone() {
            ViewMode::Start => Self::handle_start_keys(model, key),
            ViewMode::AddSemester => Self::handle_add_keys(model, key, modifiers),
            ViewMode::SemesterList => Self::handle_list_keys(model, key),
            ViewMode::SemesterDetails { name } => Self::handle_details_keys(model, key, name),
            ViewMode::Revise { name } => Self::handle_revise_keys(model, key, modifiers, name),
        }
    }

    fn handle_start_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                model.cursor_up();
                Ok(TuiMessage::None)
            }

            KeyCode::Down | KeyCode::Char('j') => {
                model.cursor_down();
                Ok(TuiMessage::None)
            }

            KeyCode::Enter => {
                let item = model.cursor;
                Ok(Self::activate_start_item(model, item))
            }

            KeyCode::Char('a') => Ok(Self::activate_start_item(model, 0)),
            KeyCode::Char('v') => Ok(Self::activate_start_item(model, 1)),
            KeyCode::Char('q') | KeyCode::Esc => Ok(Self::activate_start_item(model, 2)),

            _ => Ok(TuiMessage::None),
        }
    }

    fn activate_start_item(model: &mut TuiModel, item: usize) -> TuiMessage {
        match item {
            0 => {
                model.go_to(ViewMode::AddSemester);
                TuiMessage::None
            }
            1 => {
                model.go_to(ViewMode::SemesterList);
                TuiMessage::None
            }
            _ => TuiMessage::Command(Command::Quit),
        }
    }

    /// Keys shared by both forms. Returns `None` if the key is not a form key.
    fn handle_form_keys(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Option<TuiMessage> {
        match key {
            KeyCode::Tab | KeyCode::Down => model.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => model.form.focus_prev(),
            KeyCode::Backspace => model.form.pop_char(),
            // Control chords are shortcuts, never text
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => return None,
            KeyCode::Char(c) => model.form.push_char(c),
            _ => return None,
        }
        Some(TuiMessage::None)
    }

    fn handle_add_keys(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        match key {
            KeyCode::Enter => {
                let name = model.form.semester_name.clone().unwrap_or_default();
                Ok(TuiMessage::Command(Command::AddSemester {
                    name,
                    classes: model.form.rows.clone(),
                }))
            }

            KeyCode::Esc => {
                model.go_to(ViewMode::Start);
                Ok(TuiMessage::None)
            }

            _ => Ok(Self::handle_form_keys(model, key, modifiers).unwrap_or(TuiMessage::None)),
        }
    }

    fn handle_list_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                model.cursor_up();
                Ok(TuiMessage::None)
            }

            KeyCode::Down | KeyCode::Char('j') => {
                model.cursor_down();
                Ok(TuiMessage::None)
            }

            KeyCode::Enter | KeyCode::Char('v') => match model.selected_semester() {
                Some(name) => {
                    let name = name.to_string();
                    model.go_to(ViewMode::SemesterDetails { name });
                    Ok(TuiMessage::None)
                }
                None => Ok(TuiMessage::Event(Event::NothingSelected)),
            },

            KeyCode::Char('d') | KeyCode::Delete => match model.selected_semester() {
                Some(name) => Ok(TuiMessage::Command(Command::DeleteSemester {
                    name: name.to_string(),
                })),
                None => Ok(TuiMessage::Event(Event::NothingSelected)),
            },

            KeyCode::Char('R') => Ok(TuiMessage::Command(Command::Reload)),

            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                model.go_to(ViewMode::Start);
                Ok(TuiMessage::None)
            }

            _ => Ok(TuiMessage::None),
        }
    }

    fn handle_details_keys(model: &mut TuiModel, key: KeyCode, name: String) -> Result<TuiMessage> {
        match key {
            KeyCode::Char('r') => {
                if model.projection.semester(&name).is_none() {
                    return Ok(TuiMessage::Event(Event::SemesterNotFound { name }));
                }
                model.go_to(ViewMode::Revise { name });
                Ok(TuiMessage::None)
            }

            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
                model.go_to(ViewMode::SemesterList);
                Ok(TuiMessage::None)
            }

            _ => Ok(TuiMessage::None),
        }
    }

    fn handle_revise_keys(
        model: &mut TuiModel,
        key: KeyCode,
        modifiers: KeyModifiers,
        name: String,
    ) -> Result<TuiMessage> {
        match key {
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                match model.form.focused_original_name() {
                    Some(class) => Ok(TuiMessage::Command(Command::RemoveClass {
                        semester: name,
                        class: class.to_string(),
                    })),
                    None => Ok(TuiMessage::None),
                }
            }

            KeyCode::Enter => Ok(TuiMessage::Command(Command::ReviseSemester {
                name,
                classes: model.form.rows.clone(),
            })),

            KeyCode::Esc => {
                model.go_to(ViewMode::SemesterDetails { name });
                Ok(TuiMessage::None)
            }

            _ => Ok(Self::handle_form_keys(model, key, modifiers).unwrap_or(TuiMessage::None)),
        }
    }
}
