// Composition root: wires config, storage, the grade service and the MVU TUI

use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gradecalc_core::domain::Event;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::adapters::FileSnapshotStorage;
use crate::cli::CliCommand;
use crate::config::Config;
use crate::services::GradeService;
use crate::tui::{TuiMessage, TuiModel, TuiUpdate, TuiView};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Open the grade service over the configured data file
pub fn open_service(config: &Config) -> Result<(GradeService, Event)> {
    let storage = Arc::new(FileSnapshotStorage::with_path(config.data_file.clone()));
    info!("Using data file {}", config.data_file.display());
    GradeService::open(storage, config.storage.header_style)
}

/// Run one headless subcommand, writing its output to `out`
pub fn run_command(service: &GradeService, command: &CliCommand, out: &mut impl Write) -> Result<()> {
    match command {
        CliCommand::List => {
            for name in service.projection().semester_names() {
                writeln!(out, "{name}")?;
            }
        }
        CliCommand::Grades { semester } => match service.projection().semester(semester) {
            Some(view) => {
                for class in &view.classes {
                    writeln!(out, "{}", class.line())?;
                }
            }
            None => writeln!(out, "Semester not found")?,
        },
    }
    Ok(())
}

/// Start the TUI and block until the user quits
pub fn run_tui(config: &Config, mut service: GradeService, loaded: Event) -> Result<()> {
    let mut model = TuiModel::with_settings(
        Duration::from_secs(config.ui.notice_seconds),
        config.ui.class_rows,
    );
    model.update_projection(service.projection().clone());
    model.apply_event(&loaded);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_main_loop(&mut model, &mut terminal, &mut service);

    shutdown(&mut terminal)?;
    result
}

fn run_main_loop(model: &mut TuiModel, terminal: &mut Term, service: &mut GradeService) -> Result<()> {
    loop {
        model.clear_expired_notice(Instant::now());
        terminal.draw(|frame| TuiView::render(model, frame))?;

        if model.should_quit {
            info!("Quit requested, exiting main loop");
            break;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let TermEvent::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        match TuiUpdate::handle_key(model, key_event.code, key_event.modifiers)? {
            TuiMessage::Command(cmd) => {
                debug!("Executing command: {:?}", cmd);
                match service.handle_command(cmd) {
                    Ok(event) => {
                        model.update_projection(service.projection().clone());
                        model.apply_event(&event);
                    }
                    Err(e) => {
                        error!("Command failed: {:#}", e);
                        model.update_projection(service.projection().clone());
                        model.add_error(format!("{e:#}"));
                    }
                }
            }
            TuiMessage::Event(event) => model.apply_event(&event),
            TuiMessage::None => {}
        }
    }

    Ok(())
}

fn shutdown(terminal: &mut Term) -> Result<()> {
    info!("Shutting down GradeCalc");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> Config {
        Config {
            data_file: temp_dir.path().join("classes.txt"),
            ..Config::default()
        }
    }

    fn output(service: &GradeService, command: CliCommand) -> Result<String> {
        let mut out = Vec::new();
        run_command(service, &command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_headless_list_and_grades() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = config_in(&temp_dir);
        std::fs::write(
            &config.data_file,
            "Fall Semester\nMath: 95/100\nHistory: 65/100\n\nSpring Semester\n\n",
        )?;

        let (service, _) = open_service(&config)?;
        assert_eq!(output(&service, CliCommand::List)?, "Fall Semester\nSpring Semester\n");
        assert_eq!(
            output(&service, CliCommand::Grades { semester: "Fall Semester".to_string() })?,
            "Math: 95/100 - Grade: A\nHistory: 65/100 - Grade: D\n"
        );
        Ok(())
    }

    #[test]
    fn test_headless_grades_unknown_semester() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let (service, loaded) = open_service(&config_in(&temp_dir))?;

        assert_eq!(loaded, Event::Loaded { semesters: 0, skipped: 0 });
        assert_eq!(
            output(&service, CliCommand::Grades { semester: "Winter Semester".to_string() })?,
            "Semester not found\n"
        );
        Ok(())
    }
}
