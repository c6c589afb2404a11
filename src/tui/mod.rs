//! TUI module - Terminal week view with ratatui

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{stdout, Stdout};

use crate::schedule::{DaySchedule, DayState, WeekSchedule};
use crate::store::ScheduleStore;
use crate::week::WeekDay;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App {
    store: ScheduleStore,
    week: WeekSchedule,
    should_quit: bool,
}

impl App {
    pub fn new(store: ScheduleStore) -> Result<Self> {
        let week = store.load_or_default()?;
        Ok(Self {
            store,
            week,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        let result = self.event_loop(&mut terminal);
        restore_terminal()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new("weekplan - Weekly Workout Schedule")
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let today = WeekDay::today();
        let rows: Vec<Row> = self.week.days().map(|d| day_row(d, d.day() == today)).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(11),
                Constraint::Length(9),
                Constraint::Length(24),
                Constraint::Min(30),
            ],
        )
        .header(Row::new(vec!["Day", "Status", "Muscles", "Exercises"])
            .style(Style::default().bold()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.store.path().display().to_string()),
        );

        frame.render_widget(table, chunks[1]);

        let footer = Paragraph::new("q: quit | r: reload")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                        KeyCode::Char('r') => {
                            self.week = self.store.load_or_default()?;
                        }
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn day_row(day: &DaySchedule, is_today: bool) -> Row<'static> {
    let (status, color) = match day.state() {
        DayState::Rest => ("Rest", Color::DarkGray),
        DayState::WorkoutUnassigned => ("Workout", Color::Yellow),
        DayState::WorkoutAssigned => ("Workout", Color::Green),
    };
    let muscles = if day.muscle_groups().is_empty() {
        "-".to_string()
    } else {
        day.muscle_groups().iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let exercises = if day.exercises().is_empty() {
        "-".to_string()
    } else {
        day.exercises().iter().map(|e| e.descriptor()).collect::<Vec<_>>().join("\n")
    };
    let height = day.exercises().len().max(1) as u16;

    let row = Row::new(vec![
        Cell::from(day.day().name()),
        Cell::from(status).style(Style::default().fg(color)),
        Cell::from(muscles),
        Cell::from(exercises),
    ])
    .height(height);

    if is_today {
        row.style(Style::default().bold())
    } else {
        row
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
