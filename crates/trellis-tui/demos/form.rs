//! Small interactive form: two inputs, a list and a text view.
//!
//! Run with `cargo run -p trellis-tui --example form`. Tab moves focus,
//! Enter submits the name, Ctrl+Q quits. Set `TRELLIS_LOG=debug` to write a
//! log to `form.log`.
//!
//! Frames are drawn by a [`FrameTicker`] at the configured interval and
//! again right after each input event.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use parking_lot::Mutex;
use trellis_tui::layout::{Align, LayoutParams};
use trellis_tui::view::{hstack, padded, styled, text, vstack, zstack, Mount, ViewExt};
use trellis_tui::widgets::{SelectList, TextInput, TextView};
use trellis_tui::{
    AnyView, Color, Edges, FrameTicker, MemoryClipboard, Style, TerminalWriter, TuiConfig, Ui,
};

struct Form {
    name: Arc<Mutex<TextInput>>,
    password: Arc<Mutex<TextInput>>,
    colors: Arc<Mutex<SelectList>>,
    notes: Arc<Mutex<TextView>>,
    status: String,
    started: Instant,
}

impl Form {
    fn new(config: &TuiConfig) -> Self {
        let clipboard = Arc::new(MemoryClipboard::new());
        Self {
            name: Arc::new(Mutex::new(
                TextInput::new("name")
                    .placeholder("your name")
                    .options(config.input_options(false))
                    .clipboard(clipboard.clone()),
            )),
            password: Arc::new(Mutex::new(
                TextInput::new("password").mask(config.input.mask_char),
            )),
            colors: Arc::new(Mutex::new(SelectList::new(
                "colors",
                ["red", "green", "blue", "magenta"],
            ))),
            notes: Arc::new(Mutex::new(
                TextView::new("notes")
                    .config(&config.text_view)
                    .line_numbers(true)
                    .clipboard(clipboard)
                    .params(LayoutParams::new().grow(1))
                    .text("Drag to select.\nDouble-click a word, triple-click a line.\nCtrl+C copies."),
            )),
            status: "Tab to move, Ctrl+Q to quit".into(),
            started: Instant::now(),
        }
    }

    fn view(&self) -> AnyView {
        let label = |s: &str| styled(s.to_string(), Style::new().bold());
        vstack([
            hstack([label("Name:     "), Mount::focusable(&self.name)]).boxed(),
            hstack([label("Password: "), Mount::focusable(&self.password)]).boxed(),
            hstack([label("Color:    "), Mount::focusable(&self.colors)]).boxed(),
            Mount::focusable(&self.notes),
            zstack([text(self.status.clone())])
                .layer(
                    styled(
                        format!("trellis {}s", self.started.elapsed().as_secs()),
                        Style::new().fg(Color::DarkGrey),
                    ),
                    Align::End,
                    Align::Start,
                )
                .boxed(),
        ])
        .gap(1)
        .boxed()
    }

    fn after_event(&mut self) {
        if let Some(name) = self.name.lock().take_submitted() {
            self.status = format!("hello, {name}");
        }
        if let Some(index) = self.colors.lock().take_chosen() {
            self.status = format!("picked color #{index}");
        }
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(filter) = std::env::var("TRELLIS_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create("form.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!("trellis_tui={filter}")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn enter(stdout: &mut Stdout) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
}

fn exit(stdout: &mut Stdout) -> io::Result<()> {
    execute!(stdout, DisableBracketedPaste, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Everything a frame needs, shared between the ticker and the input loop.
struct Screen {
    form: Form,
    ui: Ui,
    writer: TerminalWriter<Stdout>,
    error: Option<io::Error>,
}

impl Screen {
    fn draw(&mut self) {
        self.ui.render(&padded(Edges::all(1), self.form.view()));
        if let Err(err) = self.writer.draw(self.ui.buffer()) {
            self.error.get_or_insert(err);
        }
    }
}

fn run(screen: &Mutex<Screen>) -> io::Result<()> {
    loop {
        let event = event::read()?;
        let mut screen = screen.lock();
        match event {
            Event::Key(key)
                if key.code == KeyCode::Char('q') && key.modifiers == KeyModifiers::CONTROL =>
            {
                return Ok(());
            }
            Event::Resize(width, height) => {
                screen.ui.resize(width, height);
                screen.writer.invalidate()?;
            }
            event => {
                screen.ui.dispatch(&event);
            }
        }
        screen.form.after_event();
        screen.draw();
        if let Some(err) = screen.error.take() {
            return Err(err);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    let config = match std::env::var("TRELLIS_CONFIG") {
        Ok(path) => TuiConfig::load(path)?,
        Err(_) => TuiConfig::default(),
    };

    let (width, height) = terminal::size()?;
    let screen = Arc::new(Mutex::new(Screen {
        form: Form::new(&config),
        ui: Ui::new(width, height),
        writer: TerminalWriter::new(io::stdout()),
        error: None,
    }));

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let mut stdout = io::stdout();
    enter(&mut stdout)?;
    let mut ticker = FrameTicker::start(screen.clone(), config.tick_interval(), Screen::draw);
    let result = run(&screen);
    ticker.stop();
    exit(&mut stdout)?;
    Ok(result?)
}
