use crate::calendar::{Calendar, WeekPager};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::Instant;
use time::OffsetDateTime;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    pager: WeekPager,
    state: AppState,
}

impl App {
    pub(crate) fn new(pager: WeekPager) -> App {
        App {
            pager,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.pager.set_now(OffsetDateTime::now_utc());
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(event) => self.handle_mouse(event, Instant::now()),
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down => self.pager.one_week_forwards().is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.pager.one_week_backwards().is_ok(),
                KeyCode::Char('z') | KeyCode::PageDown => self.pager.one_page_forwards().is_ok(),
                KeyCode::Char('w') | KeyCode::PageUp => self.pager.one_page_backwards().is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.pager.move_selection(1).is_ok(),
                KeyCode::Char('h') | KeyCode::Left => self.pager.move_selection(-1).is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.pager.jump_to_today();
                    true
                }
                KeyCode::Char('s') => {
                    self.pager.cycle_week_start();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, at: Instant) {
        if self.state != AppState::Calendar {
            return;
        }
        let MouseEvent { column, row, .. } = event;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pager.press(column, row, at),
            MouseEventKind::Up(MouseButton::Left) => {
                self.pager.release(column, row, at);
            }
            MouseEventKind::Moved => {
                self.pager.hover(column, row);
            }
            MouseEventKind::ScrollDown => {
                let _ = self.pager.one_week_forwards();
            }
            MouseEventKind::ScrollUp => {
                let _ = self.pager.one_week_backwards();
            }
            _ => (),
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Calendar.render(area, buf, &mut self.pager);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{AdapterParams, TimeZone, WeeksAdapter};
    use std::time::Duration;
    use time::macros::{date, datetime};

    fn app() -> App {
        let adapter = WeeksAdapter::new(date!(2025 - 01 - 22), &AdapterParams::default());
        let pager = WeekPager::new(adapter, TimeZone::utc(), datetime!(2025-01-22 12:00 UTC));
        App::new(pager)
    }

    fn render(app: &mut App) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_scroll_keys() {
        let mut app = app();
        render(&mut app);
        assert!(app.handle_key(KeyCode::Char('j')));
        let lines = render(&mut app);
        assert_eq!(
            lines[2].trim_end(),
            "        2025    5     ┆6     ┆7     ┆8     ┆9     ┆10    ┆11       January"
        );
        assert!(app.handle_key(KeyCode::PageUp));
        assert!(app.handle_key(KeyCode::Home));
        let lines = render(&mut app);
        assert!(lines[2].contains("┃Jan 1 ┆2"));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(!app.handle_key(KeyCode::F(1)));
    }

    #[test]
    fn test_move_selection_keys() {
        let mut app = app();
        render(&mut app);
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert!(app.handle_key(KeyCode::Char('h')));
        let lines = render(&mut app);
        assert!(lines[23].contains("Thursday, January 23, 2025"));
    }

    #[test]
    fn test_cycle_week_start_key() {
        let mut app = app();
        render(&mut app);
        assert!(app.handle_key(KeyCode::Char('s')));
        let lines = render(&mut app);
        assert!(lines[0].trim_start().starts_with("Mo"));
        assert!(lines[0].trim_end().ends_with("Su"));
    }

    #[test]
    fn test_help() {
        let mut app = app();
        render(&mut app);
        assert!(app.handle_key(KeyCode::Char('?')));
        let lines = render(&mut app);
        assert!(lines.iter().any(|ln| ln.contains(" Commands ")));
        assert!(lines.iter().any(|ln| ln.contains("Press the Any Key to dismiss.")));
        // Mouse input is ignored while the help is up
        app.handle_mouse(mouse(MouseEventKind::Moved, 16, 2), Instant::now());
        assert!(app.handle_key(KeyCode::Char('j')));
        assert_eq!(app.state, AppState::Calendar);
        let lines = render(&mut app);
        assert!(lines.iter().all(|ln| !ln.contains(" Commands ")));
        assert!(lines[23].contains("Wednesday, January 22, 2025"));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
        assert!(!app.handle_key(KeyCode::Char('j')));
    }

    #[test]
    fn test_tap() {
        let mut app = app();
        render(&mut app);
        let t0 = Instant::now();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 45, 5), t0);
        app.handle_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), 45, 5),
            t0 + Duration::from_millis(120),
        );
        let lines = render(&mut app);
        assert!(lines[23].contains("Thursday, January 9, 2025"));
    }

    #[test]
    fn test_hover() {
        let mut app = app();
        render(&mut app);
        app.handle_mouse(mouse(MouseEventKind::Moved, 16, 2), Instant::now());
        let lines = render(&mut app);
        assert!(lines[23].contains("Sunday, December 29, 2024"));
    }

    #[test]
    fn test_scroll_wheel() {
        let mut app = app();
        render(&mut app);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 30, 8), Instant::now());
        let lines = render(&mut app);
        assert!(lines[2].contains("5     ┆6"));
    }
}
