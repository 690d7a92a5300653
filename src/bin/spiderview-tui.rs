use std::io::{self, stdout};
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use spiderview::config::SpiderConfig;
use spiderview::controller::{Activation, NavigationController};
use spiderview::tree_view::StyleSlot;

fn slot_color(slot: StyleSlot) -> Color {
    match slot {
        StyleSlot::FolderName => Color::Green,
        StyleSlot::FolderSymbol => Color::LightGreen,
        StyleSlot::TreeGlyph => Color::DarkGray,
        StyleSlot::FileName => Color::Yellow,
    }
}

struct App {
    controller: NavigationController,
    path_input: String,
    input_mode: bool,
    scroll: u16,
    tree_area: Option<Rect>,
    should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            controller: NavigationController::new(SpiderConfig::default()),
            path_input: String::from("."),
            input_mode: true,
            scroll: 0,
            tree_area: None,
            should_quit: false,
        }
    }
}

impl App {
    fn scan(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        self.scroll = 0;
        self.controller.open_root(Path::new(&path));
    }

    fn clamp_scroll(&mut self, viewport: u16) {
        let total = self
            .controller
            .tree_view()
            .map(|v| v.len())
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let max_scroll = total.saturating_sub(viewport);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        if self.input_mode {
            match key.code {
                KeyCode::Enter => {
                    self.input_mode = false;
                    self.scan();
                }
                KeyCode::Esc => {
                    self.input_mode = false;
                }
                KeyCode::Backspace => {
                    self.path_input.pop();
                }
                KeyCode::Char(ch) => {
                    self.path_input.push(ch);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.input_mode = true,
            KeyCode::Char('r') => self.controller.rescan(),
            KeyCode::Char('b') | KeyCode::Backspace => {
                self.controller.back();
                self.scroll = 0;
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(area) = self.tree_area else { return };
                let inside = mouse.column >= area.x
                    && mouse.column < area.x + area.width
                    && mouse.row >= area.y
                    && mouse.row < area.y + area.height;
                if !inside {
                    return;
                }
                let line_no = (mouse.row - area.y) as usize + self.scroll as usize;
                let node = self
                    .controller
                    .tree_view()
                    .and_then(|view| view.node_at_line(line_no));
                if let Some(id) = node {
                    // Folder clicks re-root; file clicks only matter to the
                    // graphical canvas, which this front-end does not draw.
                    if let Activation::Navigated = self.controller.activate(id) {
                        self.scroll = 0;
                    }
                }
            }
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(3),
            _ => {}
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let input_style = if app.input_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };
    let path = Paragraph::new(app.path_input.as_str()).style(input_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("PATH (/ edit, Enter scan, b back, r rescan, q quit)"),
    );
    frame.render_widget(path, chunks[0]);

    let tree_block = Block::default().borders(Borders::ALL).title("TREE");
    let inner = tree_block.inner(chunks[1]);
    app.tree_area = Some(inner);
    app.clamp_scroll(inner.height);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(view) = app.controller.tree_view() {
        for line in view
            .lines
            .iter()
            .skip(app.scroll as usize)
            .take(inner.height as usize)
        {
            let spans: Vec<Span> = line
                .segments()
                .into_iter()
                .map(|(text, slot)| Span::styled(text, Style::default().fg(slot_color(slot))))
                .collect();
            lines.push(Line::from(spans));
        }
    }
    frame.render_widget(Paragraph::new(lines).block(tree_block), chunks[1]);

    let status =
        Paragraph::new(app.controller.status()).style(Style::default().fg(Color::Green));
    frame.render_widget(status, chunks[2]);
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.controller.poll();
        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
