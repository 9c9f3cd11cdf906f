use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, terminal,
};
use gridlife::{Grid, Pos2};
use std::{io, time::Duration};

/// A user intent decoded from a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Exit,
    TogglePause,
    Step,
    Randomize,
    Clear,
    SelectRule(usize),
    Faster,
    Slower,
    Toggle(Pos2),
    Resize { cols: u16, rows: u16 },
    Handled,
}

pub struct ConsoleRender {
    tl: Pos2,
    report: String,
    rule_label: String,
    delay: Option<Duration>,
}
impl ConsoleRender {
    pub fn new(rule_label: String) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide, EnableMouseCapture)?;
        Ok(Self {
            tl: Pos2::default(),
            report: String::new(),
            rule_label,
            delay: None,
        })
    }

    pub fn render(&self, grid: &Grid, paused: bool) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last row is the footer
        let br = self.tl
            + Pos2 {
                x: cols as i32,
                y: rows.saturating_sub(1) as i32,
            };
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in grid.window(self.tl, br).iter() {
            let cell = cell - self.tl;
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            io::Write::write_all(&mut stdout, "█".as_bytes())?;
        }

        // write footer
        let status = if paused { " [paused]" } else { "" };
        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
        let footer = format!(
            "{} | {} | {}{}",
            self.rule_label,
            delay_label(self.delay),
            self.report,
            status
        );
        io::Write::write_all(&mut stdout, footer.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Reads one pending event, waiting at most `timeout` for it
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is preset for us to take
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(Some(self.handle(event::read()?)))
    }

    fn handle(&mut self, ev: event::Event) -> ConsoleCommand {
        match ev {
            event::Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => ConsoleCommand::Toggle(
                self.tl
                    + Pos2 {
                        x: column as i32,
                        y: row as i32,
                    },
            ),
            event::Event::Resize(cols, rows) => ConsoleCommand::Resize { cols, rows },
            _ => ConsoleCommand::Handled,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ConsoleCommand {
        match key.code {
            // CTRL+C
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ConsoleCommand::Exit
            }
            KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
            KeyCode::Char(' ') => ConsoleCommand::TogglePause,
            KeyCode::Char('n') => ConsoleCommand::Step,
            KeyCode::Char('r') => ConsoleCommand::Randomize,
            KeyCode::Char('c') => ConsoleCommand::Clear,
            KeyCode::Char('+' | '=') => ConsoleCommand::Faster,
            KeyCode::Char('-') => ConsoleCommand::Slower,
            // 1..9 pick the first nine catalog entries, 0 the tenth
            KeyCode::Char(d @ '0'..='9') => {
                let digit = d.to_digit(10).unwrap_or_default() as usize;
                ConsoleCommand::SelectRule((digit + 9) % 10)
            }
            // arrows to move grid
            KeyCode::Up => {
                self.tl.y -= 1;
                ConsoleCommand::Handled
            }
            KeyCode::Down => {
                self.tl.y += 1;
                ConsoleCommand::Handled
            }
            KeyCode::Left => {
                self.tl.x -= 1;
                ConsoleCommand::Handled
            }
            KeyCode::Right => {
                self.tl.x += 1;
                ConsoleCommand::Handled
            }
            _ => ConsoleCommand::Handled,
        }
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
    pub fn set_rule_label(&mut self, label: String) {
        self.rule_label = label;
    }
    pub fn set_delay(&mut self, delay: Option<Duration>) {
        self.delay = delay;
    }
}

fn delay_label(delay: Option<Duration>) -> String {
    match delay {
        Some(delay) => format!("{}ms", delay.as_millis()),
        None => "unpaced".to_string(),
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture, cursor::Show) {
            tracing::warn!(error = %e, "failed to restore terminal cursor");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
    }
}
