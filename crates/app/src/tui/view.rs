use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use super::model::{ClassColumn, FormField, FormState, TuiModel, ViewMode, START_MENU};

/// The View component of MVU - responsible for rendering the model
pub struct TuiView;

impl TuiView {
    /// Render the entire TUI based on the current model state
    pub fn render(model: &TuiModel, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(0),    // Main content
                Constraint::Length(2), // Notice + key hints
            ])
            .split(size);

        Self::render_title_bar(model, frame, chunks[0]);

        match &model.mode {
            ViewMode::Start => Self::render_start_page(model, frame, chunks[1]),
            ViewMode::AddSemester => Self::render_form(model, frame, chunks[1], "Add Semester"),
            ViewMode::SemesterList => Self::render_semester_list(model, frame, chunks[1]),
            ViewMode::SemesterDetails { name } => Self::render_semester_details(model, frame, chunks[1], name),
            ViewMode::Revise { name } => {
                let title = format!("Editing {name}");
                Self::render_form(model, frame, chunks[1], &title)
            }
        }

        Self::render_status_bar(model, frame, chunks[2]);

        if !model.errors.is_empty() {
            Self::render_error_overlay(model, frame, size);
        }
    }

    fn render_title_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let title = match &model.mode {
            ViewMode::Start => "GradeCalc".to_string(),
            ViewMode::AddSemester => "GradeCalc - Add Semester".to_string(),
            ViewMode::SemesterList => "GradeCalc - Past Semesters".to_string(),
            ViewMode::SemesterDetails { name } => format!("GradeCalc - {name}"),
            ViewMode::Revise { name } => format!("GradeCalc - Revise {name}"),
        };

        let title_paragraph = Paragraph::new(title)
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .alignment(Alignment::Center);

        frame.render_widget(title_paragraph, area);
    }

    fn highlight(selected: bool) -> Style {
        if selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    fn render_start_page(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to the GradeCalc",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (index, item) in START_MENU.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("  {item}  "),
                Self::highlight(index == model.cursor),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }

    fn render_semester_list(model: &TuiModel, frame: &mut Frame, area: Rect) {
        if model.projection.is_empty() {
            let paragraph = Paragraph::new("No semesters saved yet. Press 'b' to go back and add one.")
                .block(Block::default().borders(Borders::ALL).title("Select Semester to View"))
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });

            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = model
            .projection
            .semesters
            .iter()
            .enumerate()
            .map(|(index, semester)| {
                let line = Line::from(vec![
                    Span::raw(semester.name.clone()),
                    Span::styled(
                        format!("  ({} classes)", semester.classes.len()),
                        Style::default().fg(Color::Gray),
                    ),
                ]);
                ListItem::new(line).style(Self::highlight(index == model.cursor))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Select Semester to View"));

        frame.render_widget(list, area);
    }

    fn render_semester_details(model: &TuiModel, frame: &mut Frame, area: Rect, name: &str) {
        let mut lines = vec![
            Line::from(Span::styled(format!("{name}:"), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];

        match model.projection.semester(name) {
            Some(semester) if semester.classes.is_empty() => {
                lines.push(Line::from("No classes recorded."));
            }
            Some(semester) => {
                for class in &semester.classes {
                    lines.push(Line::from(vec![
                        Span::raw(format!("{}: {}/{} - Grade: ", class.name, class.earned, class.total)),
                        Span::styled(
                            class.grade.to_string(),
                            Style::default().fg(Self::grade_color(class.grade)).add_modifier(Modifier::BOLD),
                        ),
                    ]));
                }
            }
            None => lines.push(Line::from("Semester not found")),
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Semester"))
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }

    fn grade_color(grade: gradecalc_core::Grade) -> Color {
        use gradecalc_core::Grade;
        match grade {
            Grade::A => Color::Green,
            Grade::B => Color::LightGreen,
            Grade::C => Color::Yellow,
            Grade::D => Color::LightRed,
            Grade::F => Color::Red,
        }
    }

    fn field_span(form: &FormState, field: FormField, width: usize) -> Span<'static> {
        let text = form.text(field);
        let style = if form.focused_field() == Some(field) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        };
        Span::styled(format!("{text:<width$}"), style)
    }

    fn render_form(model: &TuiModel, frame: &mut Frame, area: Rect, title: &str) {
        let form = &model.form;
        let mut lines = Vec::new();
        let first_row_line = if form.semester_name.is_some() { 2 } else { 0 };

        if form.semester_name.is_some() {
            lines.push(Line::from(vec![
                Span::raw("Enter Semester Name: "),
                Self::field_span(form, FormField::SemesterName, 25),
            ]));
            lines.push(Line::from(""));
        }

        for row in 0..form.rows.len() {
            let field = |column| FormField::Class { row, column };
            lines.push(Line::from(vec![
                Span::raw(format!("Class {} Name: ", row + 1)),
                Self::field_span(form, field(ClassColumn::Name), 20),
                Span::raw("  Earned/Total: "),
                Self::field_span(form, field(ClassColumn::Earned), 5),
                Span::raw(" / "),
                Self::field_span(form, field(ClassColumn::Total), 5),
            ]));
        }

        // Keep the focused row on screen when the form is taller than the area
        let focused_line = form.focused_row().map_or(0, |row| first_row_line + row);
        let available_height = area.height.saturating_sub(2) as usize; // Minus borders
        let start = Self::scroll_start(lines.len(), focused_line, available_height);
        let visible_lines: Vec<Line> = lines.into_iter().skip(start).collect();

        let paragraph = Paragraph::new(visible_lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));

        frame.render_widget(paragraph, area);
    }

    /// First line to draw so that `focused` falls inside a window of `height` lines
    fn scroll_start(total: usize, focused: usize, height: usize) -> usize {
        if height == 0 || total <= height || focused < height {
            return 0;
        }
        (focused + 1 - height).min(total - height)
    }

    /// Render the notice line and key hints at the bottom
    fn render_status_bar(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let notice = model.notice.as_ref().map(|n| n.text.as_str()).unwrap_or("");
        frame.render_widget(
            Paragraph::new(notice.to_string()).style(Style::default().fg(Color::Yellow)),
            chunks[0],
        );

        frame.render_widget(
            Paragraph::new(Self::get_key_hints(model)).style(Style::default().fg(Color::Gray)),
            chunks[1],
        );
    }

    /// Get key hints for current mode
    fn get_key_hints(model: &TuiModel) -> String {
        match &model.mode {
            ViewMode::Start => "↑↓ Move | Enter Select | a Add | v View | q Quit",
            ViewMode::AddSemester => "Tab/↑↓ Field | Enter Save Semester | Esc Back",
            ViewMode::SemesterList => "↑↓ Move | Enter View | d Delete | R Reload | b Back",
            ViewMode::SemesterDetails { .. } => "r Revise | b Back",
            ViewMode::Revise { .. } => "Tab/↑↓ Field | Enter Save Changes | Ctrl+D Remove Class | Esc Back",
        }
        .to_string()
    }

    fn render_error_overlay(model: &TuiModel, frame: &mut Frame, area: Rect) {
        let popup_area = Self::centered_rect(60, 20, area);

        frame.render_widget(Clear, popup_area);

        let error_text: Vec<Line> = model.errors.iter()
            .map(|error| Line::from(error.as_str()))
            .collect();

        let error_popup = Paragraph::new(error_text)
            .block(Block::default().borders(Borders::ALL).title("Errors (any key to dismiss)"))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });

        frame.render_widget(error_popup, popup_area);
    }

    /// Helper to create centered rectangle
    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradecalc_core::app::{ClassView, ReadProjection, SemesterView};
    use gradecalc_core::Grade;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(model: &TuiModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test backend");
        terminal
            .draw(|frame| TuiView::render(model, frame))
            .expect("draw to test backend");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn fall_projection() -> ReadProjection {
        ReadProjection {
            semesters: vec![SemesterView {
                name: "Fall Semester".to_string(),
                classes: vec![ClassView {
                    name: "Math".to_string(),
                    earned: 95,
                    total: 100,
                    grade: Grade::A,
                }],
            }],
        }
    }

    #[test]
    fn test_start_page_shows_menu() {
        let screen = render_to_string(&TuiModel::new());
        assert!(screen.contains("Welcome to the GradeCalc"));
        for item in START_MENU {
            assert!(screen.contains(item));
        }
    }

    #[test]
    fn test_details_page_shows_grades() {
        let mut model = TuiModel::new();
        model.update_projection(fall_projection());
        model.go_to(ViewMode::SemesterDetails { name: "Fall Semester".to_string() });

        let screen = render_to_string(&model);
        assert!(screen.contains("Math: 95/100 - Grade: A"));
    }

    #[test]
    fn test_list_page_and_notice() {
        let mut model = TuiModel::new();
        model.update_projection(fall_projection());
        model.go_to(ViewMode::SemesterList);
        model.show_notice("Semester 'Fall Semester' added!".to_string());

        let screen = render_to_string(&model);
        assert!(screen.contains("Fall Semester"));
        assert!(screen.contains("Semester 'Fall Semester' added!"));
    }

    #[test]
    fn test_add_form_renders_rows() {
        let mut model = TuiModel::new();
        model.go_to(ViewMode::AddSemester);

        let screen = render_to_string(&model);
        assert!(screen.contains("Enter Semester Name:"));
        assert!(screen.contains("Class 7 Name:"));
    }

    #[test]
    fn test_scroll_start_keeps_focus_visible() {
        assert_eq!(TuiView::scroll_start(9, 8, 20), 0);
        assert_eq!(TuiView::scroll_start(30, 3, 10), 0);
        assert_eq!(TuiView::scroll_start(30, 10, 10), 1);
        assert_eq!(TuiView::scroll_start(30, 29, 10), 20);
        assert_eq!(TuiView::scroll_start(30, 29, 0), 0);
    }

    #[test]
    fn test_long_form_scrolls_to_focused_row() -> anyhow::Result<()> {
        let mut model = TuiModel::with_settings(std::time::Duration::from_secs(3), 20);
        model.go_to(ViewMode::AddSemester);
        model.form.focus = model.form.field_count() - 1;

        let mut terminal = Terminal::new(TestBackend::new(100, 12))?;
        terminal.draw(|frame| TuiView::render(&model, frame))?;
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(screen.contains("Class 20 Name:"));
        assert!(!screen.contains("Enter Semester Name:"));
        Ok(())
    }

    #[test]
    fn test_error_overlay() {
        let mut model = TuiModel::new();
        model.add_error("Failed to write data file".to_string());

        let screen = render_to_string(&model);
        assert!(screen.contains("Failed to write data file"));
    }
}
