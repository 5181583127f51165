use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::search::highlighted;
use super::{open_collection, open_site, OutputConfig};
use crate::content::Collection;
use crate::http::client::Client;
use crate::search::{
    ControllerSettings, Key, PointerTarget, SuggestionController, SuggestionItem,
    SuggestionPanel, SuggestionView,
};

const IDLE_TICK: Duration = Duration::from_millis(250);
const PROMPT: &str = "Search videos: ";

#[derive(Args)]
pub struct BrowseArgs {
    /// Site directory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Record source URL (default: `search.source_url`, or `<site.base_url>/api/videos.json`)
    #[arg(long, short = 's')]
    source: Option<String>,
}

/// Where the session ended up
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Navigate(String),
    Submit(String),
}

/// Suggestion box state as the terminal shows it
#[derive(Debug, Default)]
struct TerminalView {
    panel: Option<SuggestionPanel>,
    visible: bool,
    active: Option<usize>,
    focused: bool,
    outcome: Option<Outcome>,
}

impl SuggestionView for TerminalView {
    fn show(&mut self, panel: &SuggestionPanel) {
        self.panel = Some(panel.clone());
        self.visible = true;
        self.active = None;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.active = None;
    }

    fn set_active(&mut self, index: Option<usize>) {
        self.active = index;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn navigate(&mut self, href: &str) {
        self.outcome = Some(Outcome::Navigate(href.to_string()));
    }

    fn submit(&mut self, query: &str) {
        self.outcome = Some(Outcome::Submit(query.to_string()));
    }
}

impl TerminalView {
    /// Screen lines below the prompt
    fn lines(&self) -> Vec<String> {
        let Some(ref panel) = self.panel else {
            return Vec::new();
        };
        if !self.visible {
            return Vec::new();
        }

        let mut lines = Vec::new();
        if panel.no_results {
            lines.push(format!("  No videos found for \"{}\"", panel.query).dimmed().to_string());
        }
        for (i, item) in panel.items.iter().enumerate() {
            let marker = if self.active == Some(i) { ">" } else { " " };
            let line = match item {
                SuggestionItem::Video {
                    title,
                    author,
                    category,
                    ..
                } => format!(
                    "{marker} {}  {}",
                    highlighted(panel.highlighter(), title),
                    format!("by {author} • {category}").dimmed()
                ),
                SuggestionItem::ViewAll { query, .. } => {
                    format!("{marker} {}", format!("View all results for \"{query}\"").italic())
                }
            };
            lines.push(line);
        }
        lines
    }

    /// Rows (0-based, prompt on row 0) the panel occupies
    fn panel_rows(&self) -> u16 {
        self.lines().len() as u16
    }
}

/// What a terminal event means for the session
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Type(char),
    Backspace,
    Key(Key),
    Focus,
    /// Refocus, then type the character
    FocusAndType(char),
    Quit,
    Ignore,
}

fn map_key(key: KeyEvent, focused: bool) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if !focused {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            KeyCode::Tab => Action::Focus,
            KeyCode::Char(c) => Action::FocusAndType(c),
            _ => Action::Ignore,
        };
    }
    match key.code {
        KeyCode::Char(c) => Action::Type(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Down => Action::Key(Key::ArrowDown),
        KeyCode::Up => Action::Key(Key::ArrowUp),
        KeyCode::Enter => Action::Key(Key::Enter),
        KeyCode::Esc => Action::Key(Key::Escape),
        _ => Action::Key(Key::Other),
    }
}

/// Restores the terminal even if the loop bails out
struct RawTerminal;

impl RawTerminal {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
        let _ = disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, input: &str, view: &TerminalView) -> Result<()> {
    queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
    let prompt = if view.focused {
        PROMPT.bold().to_string()
    } else {
        PROMPT.dimmed().to_string()
    };
    queue!(out, Print(prompt), Print(input))?;

    for (row, line) in view.lines().into_iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16 + 1), Print(line))?;
    }

    let help = "↑/↓ select  Enter open  Esc close  Ctrl-C quit".dimmed();
    queue!(
        out,
        cursor::MoveTo(0, view.panel_rows() + 2),
        Print(help),
        cursor::MoveTo((PROMPT.len() + input.chars().count()) as u16, 0)
    )?;
    out.flush()?;
    Ok(())
}

fn event_loop(controller: &mut SuggestionController<TerminalView>) -> Result<()> {
    let mut out = stdout();
    let mut input = String::new();

    loop {
        draw(&mut out, &input, controller.view())?;

        let timeout = controller
            .next_deadline()
            .map_or(IDLE_TICK, |due| due.saturating_duration_since(Instant::now()));

        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => map_key(key, controller.view().focused),
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    let inside = mouse.row <= controller.view().panel_rows();
                    controller.on_pointer(if inside {
                        PointerTarget::Inside
                    } else {
                        PointerTarget::Outside
                    });
                    Action::Ignore
                }
                _ => Action::Ignore,
            };

            match action {
                Action::Type(c) => {
                    input.push(c);
                    controller.on_input(&input, Instant::now());
                }
                Action::Backspace => {
                    input.pop();
                    controller.on_input(&input, Instant::now());
                }
                Action::Key(key) => controller.on_key(key),
                Action::Focus => {
                    controller.view_mut().focused = true;
                    controller.on_focus(&input);
                }
                Action::FocusAndType(c) => {
                    controller.view_mut().focused = true;
                    controller.on_focus(&input);
                    input.push(c);
                    controller.on_input(&input, Instant::now());
                }
                Action::Quit => return Ok(()),
                Action::Ignore => {}
            }
        }

        controller.poll(Instant::now());

        if controller.view().outcome.is_some() {
            return Ok(());
        }
    }
}

pub async fn run(args: BrowseArgs, output: OutputConfig) -> Result<()> {
    let (site_root, config) = open_site(&args.path)?;

    let source_url = args.source.unwrap_or_else(|| config.source_url());
    let client = Client::new(&source_url);
    let page = open_collection(&site_root, &config).unwrap_or_else(|e| {
        tracing::warn!("{:#}", e);
        Collection::default()
    });

    let view = TerminalView {
        focused: true,
        ..TerminalView::default()
    };
    let controller = SuggestionController::load(
        &client,
        &page,
        view,
        ControllerSettings::from(&config.search),
    )
    .await;
    if controller.index().is_empty() && !output.quiet {
        eprintln!(
            "{} No videos to search (source {} unreachable and no local posts)",
            "!".yellow(),
            client.url()
        );
    }

    // Terminal reads block, so the session runs off the async runtime.
    let controller = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut controller = controller;
        let _terminal = RawTerminal::enter()?;
        event_loop(&mut controller)?;
        Ok(controller)
    })
    .await
    .context("Terminal session panicked")??;

    let view = controller.teardown();
    let base = config.site.base_url.trim_end_matches('/');
    match view.outcome {
        Some(Outcome::Navigate(href)) => {
            let url = if href.starts_with('/') {
                format!("{base}{href}")
            } else {
                href
            };
            if output.json {
                println!("{}", serde_json::json!({ "action": "navigate", "url": url }));
            } else {
                println!("{} {}", "→".green(), url);
            }
        }
        Some(Outcome::Submit(query)) => {
            let url = format!("{base}{}", crate::search::render::search_href(&query));
            if output.json {
                println!(
                    "{}",
                    serde_json::json!({ "action": "submit", "query": query, "url": url })
                );
            } else {
                println!("{} {}", "→".green(), url);
            }
        }
        None => {}
    }

    Ok(())
}
