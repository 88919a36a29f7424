use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::model::{ShelfConfig, Tool};
use crate::ops::filter::{all_tags, visible_tools};
use crate::session::{AuthEvent, ConfigIdentity, IdentityProvider};
use crate::store::file::FileStore;
use crate::sync::ShelfSession;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    TagFilter,
    Move,
    Form,
    Confirm,
}

/// A reorder in progress: the grabbed tool, the order it started from,
/// and the order currently previewed on screen. Nothing is persisted
/// until the move is confirmed.
#[derive(Debug, Clone)]
pub struct MoveState {
    pub tool_id: String,
    pub original: Vec<Tool>,
    pub working: Vec<Tool>,
}

/// Pending delete confirmation
#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub tool_id: String,
    pub name: String,
}

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Links,
    Pr,
    Tags,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Links,
            FormField::Links => FormField::Pr,
            FormField::Pr => FormField::Tags,
            FormField::Tags => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Tags,
            FormField::Links => FormField::Name,
            FormField::Pr => FormField::Links,
            FormField::Tags => FormField::Pr,
        }
    }
}

/// The add/edit form. Links and tags are edited as comma-separated text
/// and parsed on submit.
#[derive(Debug, Clone)]
pub struct FormState {
    /// Tool being edited, or None when adding
    pub editing: Option<String>,
    pub name: String,
    pub links: String,
    pub pr: String,
    pub tags: String,
    pub field: FormField,
    /// Byte offset of the cursor within the focused field
    pub cursor: usize,
    /// Validation error from the last submit attempt
    pub error: Option<String>,
}

impl FormState {
    pub fn blank() -> Self {
        FormState {
            editing: None,
            name: String::new(),
            links: String::new(),
            pr: String::new(),
            tags: String::new(),
            field: FormField::Name,
            cursor: 0,
            error: None,
        }
    }

    pub fn for_tool(tool: &Tool) -> Self {
        let links = tool
            .effective_links()
            .iter()
            .map(|l| match &l.label {
                Some(label) => format!("{label}|{}", l.url),
                None => l.url.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let name = tool.name.clone();
        let cursor = name.len();
        FormState {
            editing: Some(tool.id.clone()),
            name,
            links,
            pr: tool.pr_link.clone().unwrap_or_default(),
            tags: tool.tags.join(", "),
            field: FormField::Name,
            cursor,
            error: None,
        }
    }

    pub fn focused(&self) -> &String {
        match self.field {
            FormField::Name => &self.name,
            FormField::Links => &self.links,
            FormField::Pr => &self.pr,
            FormField::Tags => &self.tags,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Links => &mut self.links,
            FormField::Pr => &mut self.pr,
            FormField::Tags => &mut self.tags,
        }
    }

    /// Switch focus and park the cursor at the end of the new field.
    pub fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.focused().len();
    }
}

/// Main application state
pub struct App {
    pub session: ShelfSession,
    pub identity: ConfigIdentity,
    pub config: ShelfConfig,
    pub shelf_dir: PathBuf,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible list
    pub cursor: usize,
    /// Scroll offset (first visible row)
    pub scroll_offset: usize,
    /// Search text being typed (Search mode)
    pub search_input: String,
    /// Committed search term filtering the list
    pub search: String,
    /// Tags selected in the filter bar (AND semantics)
    pub selected_tags: Vec<String>,
    /// Cursor in the tag bar (TagFilter mode)
    pub tag_cursor: usize,
    pub move_state: Option<MoveState>,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub show_help: bool,
    pub status_message: Option<String>,
    /// Search history (most recent first, max 200)
    pub search_history: Vec<String>,
}

impl App {
    pub fn new(session: ShelfSession, identity: ConfigIdentity, config: ShelfConfig, shelf_dir: PathBuf) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            session,
            identity,
            config,
            shelf_dir,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            search_input: String::new(),
            search: String::new(),
            selected_tags: Vec::new(),
            tag_cursor: 0,
            move_state: None,
            form: None,
            confirm: None,
            show_help: false,
            status_message: None,
            search_history: Vec::new(),
        }
    }

    /// The rows on screen: the move preview while a move is in progress,
    /// otherwise the session's list narrowed by search and tags.
    pub fn visible(&self) -> Vec<&Tool> {
        if let Some(ms) = &self.move_state {
            return ms.working.iter().collect();
        }
        visible_tools(self.session.tools(), &self.search, &self.selected_tags)
    }

    /// The filter bar's tag universe
    pub fn tags(&self) -> Vec<String> {
        all_tags(self.session.tools())
    }

    pub fn filters_active(&self) -> bool {
        !self.search.is_empty() || !self.selected_tags.is_empty()
    }

    /// Tool id under the cursor, if any
    pub fn cursor_tool_id(&self) -> Option<String> {
        self.visible().get(self.cursor).map(|t| t.id.clone())
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Commit the typed search term and remember it in history.
    pub fn commit_search(&mut self) {
        self.search = self.search_input.clone();
        if !self.search.is_empty() {
            self.search_history.retain(|s| s != &self.search);
            self.search_history.insert(0, self.search.clone());
            self.search_history.truncate(200);
        }
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Drain identity and store events; returns true if state changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for event in self.identity.poll() {
            match event {
                AuthEvent::SignedIn(user) => self.session.set_identity(Some(user)),
                AuthEvent::SignedOut => self.session.set_identity(None),
            }
            changed = true;
        }
        if self.session.poll() {
            changed = true;
            self.on_snapshot();
        }
        if let Some(error) = self.session.take_error() {
            self.set_status(format!("sync error: {error}"));
            changed = true;
        }
        changed
    }

    /// React to a fresh snapshot: keep the cursor in range and restart
    /// any in-progress move from the new order (the grabbed tool may
    /// have moved or vanished under us).
    fn on_snapshot(&mut self) {
        if let Some(ms) = &self.move_state {
            let tool_id = ms.tool_id.clone();
            let tools = self.session.tools().to_vec();
            if tools.iter().any(|t| t.id == tool_id) {
                let working = tools.clone();
                self.move_state = Some(MoveState {
                    tool_id,
                    original: tools,
                    working,
                });
                self.set_status("shelf changed, move restarted");
            } else {
                self.move_state = None;
                self.mode = Mode::Navigate;
                self.set_status("tool was deleted, move cancelled");
            }
        }
        self.clamp_cursor();
    }
}

/// Restore persisted UI state into the app
fn restore_ui_state(app: &mut App) {
    if let Some(state) = read_ui_state(&app.shelf_dir) {
        app.selected_tags = state.selected_tags;
        app.search = state.last_search.unwrap_or_default();
        app.search_input = app.search.clone();
        app.search_history = state.search_history;
        app.cursor = state.cursor;
        app.scroll_offset = state.scroll_offset;
    }
}

/// Save UI state to .state.json (best effort)
fn save_ui_state(app: &App) {
    let state = UiState {
        selected_tags: app.selected_tags.clone(),
        last_search: (!app.search.is_empty()).then(|| app.search.clone()),
        search_history: app.search_history.clone(),
        cursor: app.cursor,
        scroll_offset: app.scroll_offset,
    };
    let _ = write_ui_state(&app.shelf_dir, &state);
}

pub fn run(shelf_dir_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    // Discover the shelf and open the store
    let root = match shelf_dir_flag {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => config_io::discover_shelf(&std::env::current_dir()?)?,
    };
    let shelf_dir = root.join("shelf");
    let (config, _) = config_io::read_config(&shelf_dir)?;
    let store = FileStore::open(&shelf_dir)?;

    let identity = ConfigIdentity::new(config.profile.user.clone());
    let session = ShelfSession::new(Box::new(store));
    let mut app = App::new(session, identity, config, shelf_dir);

    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        app.tick();

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
