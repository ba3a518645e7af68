use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use timefield::terminal::{CursorPos, Frame, KeyCode, KeyEvent, Terminal, TerminalEvent};
use timefield::ui::{line_width, Color, Span, SpanLine, Style};
use timefield::{HourMode, TimeField};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    terminal.enter()?;

    let result = event_loop(&mut terminal);

    terminal.exit()?;
    result
}

fn event_loop(terminal: &mut Terminal) -> io::Result<()> {
    let mut demo = Demo::new();
    let mut render_requested = true;

    loop {
        match terminal.poll_event(Duration::from_millis(100))? {
            TerminalEvent::Key(key) => {
                demo.handle_key(key);
                render_requested = true;
            }
            TerminalEvent::Resize(_) => {
                render_requested = true;
            }
            TerminalEvent::Tick => {}
        }

        if render_requested {
            terminal.render(&demo.frame())?;
            render_requested = false;
        }

        if demo.should_exit {
            break;
        }
    }

    Ok(())
}

struct Demo {
    labels: [&'static str; 2],
    fields: [TimeField; 2],
    focused: usize,
    last_change: Arc<Mutex<String>>,
    should_exit: bool,
}

impl Demo {
    fn new() -> Self {
        let last_change = Arc::new(Mutex::new(String::from("(none yet)")));
        let mut wall = TimeField::new(HourMode::Hour12).with_value(" 9:30:00 AM");
        let mut elapsed = TimeField::new(HourMode::Hour24).with_value("00:42:17");
        for field in [&mut wall, &mut elapsed] {
            let sink = Arc::clone(&last_change);
            field.on_value_changed(move |text| {
                if let Ok(mut slot) = sink.lock() {
                    *slot = text.to_string();
                }
            });
        }
        wall.focus();
        Self {
            labels: ["Departure", "Elapsed"],
            fields: [wall, elapsed],
            focused: 0,
            last_change,
            should_exit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.should_exit = true;
            return;
        }
        let result = self.fields[self.focused].handle_key(key);
        if result.handled {
            return;
        }
        // Tab past either end of a field moves focus to the other one.
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Enter => self.switch_focus(),
            _ => {}
        }
    }

    fn switch_focus(&mut self) {
        self.fields[self.focused].blur();
        self.focused = (self.focused + 1) % self.fields.len();
        self.fields[self.focused].focus();
    }

    fn frame(&self) -> Frame {
        let mut lines: Vec<SpanLine> = Vec::new();
        let mut cursor = None;

        lines.push(vec![Span::styled("Time entry", Style::new().bold())]);
        lines.push(Vec::new());

        for (idx, field) in self.fields.iter().enumerate() {
            let marker = if idx == self.focused { "> " } else { "  " };
            let mut line = vec![
                Span::new(marker),
                Span::new(format!("{:<10}", self.labels[idx])),
            ];
            let prefix = line_width(&line);
            line.extend(field.render_spans());
            if idx == self.focused && field.selection().is_none() {
                cursor = Some(CursorPos {
                    col: (prefix + field.cursor()) as u16,
                    row: lines.len() as u16,
                });
            }
            lines.push(line);
        }

        lines.push(Vec::new());
        let (hour, minute, second) = self.fields[self.focused].time_components();
        let dim = Style::new().color(Color::DarkGrey);
        lines.push(vec![Span::styled(
            format!("canonical    {hour:02}:{minute:02}:{second:02}"),
            dim,
        )]);
        let last = self
            .last_change
            .lock()
            .map(|slot| slot.clone())
            .unwrap_or_default();
        lines.push(vec![Span::styled(format!("last change  {last}"), dim)]);
        lines.push(Vec::new());
        lines.push(vec![Span::styled(
            "Tab: next cell  Left/Right: move  Shift+arrow: select  Up/Down: step  Esc: quit",
            dim,
        )]);

        Frame { lines, cursor }
    }
}
