//! Browser main loop.
//!
//! Fetches run as tokio tasks and report back over an unbounded channel. The
//! loop applies completions, handles keys, advances scroll animation and
//! redraws.

mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use zenflix_api::catalog::{CatalogApi, CatalogItem};

use crate::details::{self, DetailsError, DetailsState, DetailsView};
use crate::hero::{self, HeroError, HeroSelection, HeroState, REVEAL_DELAY};
use crate::load::LoadTicket;
use crate::page::{BrowsePage, DetailsPage, Fetch, HomePage, InputMode, ProfilesPage, RowSlot};
use crate::route::Route;
use crate::row::{self, ScrollDirection};

/// Idle wait between frames.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait between frames while a row is scrolling.
const ANIMATION_FRAME: Duration = Duration::from_millis(30);

/// Browser start-up options.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// First page shown.
    pub start: Route,
    /// Hero entrance delay.
    pub reveal_delay: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            start: Route::Home,
            reveal_delay: REVEAL_DELAY,
        }
    }
}

/// Completion of a spawned fetch.
#[derive(Debug)]
pub enum LoadEvent {
    /// Hero load finished.
    Hero {
        /// Ticket the fetch was issued with.
        ticket: LoadTicket,
        /// Selection or error.
        result: Result<HeroSelection, HeroError>,
    },
    /// Row load finished. Failures arrive as an empty list.
    Row {
        /// Row the fetch belongs to.
        slot: RowSlot,
        /// Ticket the fetch was issued with.
        ticket: LoadTicket,
        /// Loaded items.
        items: Vec<CatalogItem>,
    },
    /// Details load finished.
    Details {
        /// Ticket the fetch was issued with.
        ticket: LoadTicket,
        /// View or error.
        result: Result<DetailsView, DetailsError>,
    },
}

/// What the loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the state change already made.
    None,
    /// Leave the browser.
    Quit,
    /// Switch pages.
    Navigate(Route),
    /// Run one fetch for the current page.
    Fetch(Fetch),
    /// Open a URL in the system browser.
    Open(String),
}

/// Page currently shown.
#[derive(Debug)]
pub enum Screen {
    /// Hero and rows.
    Home(Box<HomePage>),
    /// One title.
    Details(Box<DetailsPage>),
    /// Fixture catalog.
    Browse(BrowsePage),
    /// Fixture profiles.
    Profiles(ProfilesPage),
    /// Unknown path.
    NotFound(String),
}

/// Browser state.
#[derive(Debug)]
pub struct App {
    route: Route,
    screen: Screen,
    reveal_delay: Duration,
    /// One-line message shown in the footer.
    pub status: Option<String>,
}

impl App {
    /// App showing `route`. Call [`Self::mount`] to start its fetches.
    #[must_use]
    pub fn new(route: Route, reveal_delay: Duration) -> Self {
        let screen = build_screen(&route, reveal_delay);
        Self {
            route,
            screen,
            reveal_delay,
            status: None,
        }
    }

    /// Current route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Current page.
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Starts the current page's fetches.
    pub fn mount(&mut self) -> Vec<Fetch> {
        match &mut self.screen {
            Screen::Home(home) => home.mount(),
            Screen::Details(page) => vec![page.mount()],
            Screen::Browse(_) | Screen::Profiles(_) | Screen::NotFound(_) => Vec::new(),
        }
    }

    /// Leaves the current page and mounts the page for `route`.
    pub fn navigate(&mut self, route: Route) -> Vec<Fetch> {
        tracing::info!(path = %route.to_path(), "navigate");
        self.unmount();
        self.screen = build_screen(&route, self.reveal_delay);
        self.route = route;
        self.status = None;
        self.mount()
    }

    fn unmount(&mut self) {
        match &mut self.screen {
            Screen::Home(home) => home.unmount(),
            Screen::Details(page) => page.loader.unmount(),
            Screen::Browse(_) | Screen::Profiles(_) | Screen::NotFound(_) => {}
        }
    }

    /// Applies a fetch completion to the current page.
    pub fn apply(&mut self, event: LoadEvent, now: Instant) {
        match (event, &mut self.screen) {
            (LoadEvent::Hero { ticket, result }, Screen::Home(home)) => {
                home.hero.complete(ticket, result, now);
            }
            (
                LoadEvent::Row {
                    slot,
                    ticket,
                    items,
                },
                Screen::Home(home),
            ) => {
                if let Some(row) = home.row_mut(slot) {
                    row.complete(ticket, items);
                }
            }
            (LoadEvent::Details { ticket, result }, Screen::Details(page)) => {
                if page.loader.complete(ticket, result) {
                    page.sync_similar();
                }
            }
            (event, _) => tracing::debug!(?event, "dropping completion for another page"),
        }
    }

    /// Records the usable row width.
    pub fn set_viewport(&mut self, width: usize) {
        match &mut self.screen {
            Screen::Home(home) => {
                for row in home.all_rows_mut() {
                    row.scroll_mut().set_viewport(width);
                }
            }
            Screen::Details(page) => page.similar_mut().scroll_mut().set_viewport(width),
            Screen::Browse(_) | Screen::Profiles(_) | Screen::NotFound(_) => {}
        }
    }

    /// Advances scroll animation by one frame.
    pub fn tick(&mut self) {
        match &mut self.screen {
            Screen::Home(home) => {
                for row in home.all_rows_mut() {
                    row.scroll_mut().tick();
                }
            }
            Screen::Details(page) => {
                page.similar_mut().scroll_mut().tick();
            }
            Screen::Browse(_) | Screen::Profiles(_) | Screen::NotFound(_) => {}
        }
    }

    /// Whether any row is mid-scroll.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        match &self.screen {
            Screen::Home(home) => home
                .search_row()
                .into_iter()
                .chain(home.rows())
                .any(|row| row.scroll().is_animating()),
            Screen::Details(page) => page.similar().scroll().is_animating(),
            Screen::Browse(_) | Screen::Profiles(_) | Screen::NotFound(_) => false,
        }
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Action {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        if let Screen::Home(home) = &mut self.screen
            && home.input_mode == InputMode::Search
        {
            return handle_search_input(home, key);
        }
        match key {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('1') => return Action::Navigate(Route::Home),
            KeyCode::Char('2') => return Action::Navigate(Route::Browse),
            KeyCode::Char('3') => return Action::Navigate(Route::Profiles),
            _ => {}
        }
        match &mut self.screen {
            Screen::Home(home) => handle_home_input(home, key),
            Screen::Details(page) => handle_details_input(page, key),
            Screen::Browse(page) => handle_browse_input(page, key),
            Screen::Profiles(page) => handle_profiles_input(page, key),
            Screen::NotFound(_) => match key {
                KeyCode::Enter | KeyCode::Esc => Action::Navigate(Route::Home),
                _ => Action::None,
            },
        }
    }
}

fn build_screen(route: &Route, reveal_delay: Duration) -> Screen {
    match route {
        Route::Home => Screen::Home(Box::new(HomePage::new(reveal_delay))),
        Route::Details { kind, id } => Screen::Details(Box::new(DetailsPage::new(*kind, *id))),
        Route::Browse => Screen::Browse(BrowsePage::default()),
        Route::Profiles => Screen::Profiles(ProfilesPage::default()),
        Route::NotFound(path) => Screen::NotFound(path.clone()),
    }
}

fn handle_search_input(home: &mut HomePage, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => {
            home.input_mode = InputMode::Normal;
            home.clear_search();
        }
        KeyCode::Enter => {
            if let Some(fetch) = home.submit_search() {
                return Action::Fetch(fetch);
            }
        }
        KeyCode::Backspace => {
            home.query.pop();
        }
        KeyCode::Char(c) => home.query.push(c),
        _ => {}
    }
    Action::None
}

fn handle_home_input(home: &mut HomePage, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => home.focus_down(),
        KeyCode::Up | KeyCode::Char('k') => home.focus_up(),
        KeyCode::Left | KeyCode::Char('h') => home.move_cursor(ScrollDirection::Left),
        KeyCode::Right | KeyCode::Char('l') => home.move_cursor(ScrollDirection::Right),
        KeyCode::Char('[') => home.scroll_row(ScrollDirection::Left),
        KeyCode::Char(']') => home.scroll_row(ScrollDirection::Right),
        KeyCode::Char('/') => home.input_mode = InputMode::Search,
        KeyCode::Esc => home.clear_search(),
        KeyCode::Char('r') if matches!(home.hero.state(), HeroState::Error(_)) => {
            return Action::Fetch(Fetch::Hero(home.hero.retry()));
        }
        KeyCode::Char('r') => return Action::Navigate(Route::Home),
        KeyCode::Enter => {
            if let Some(route) = home.activate() {
                return Action::Navigate(route);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_details_input(page: &mut DetailsPage, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Action::Navigate(Route::Home),
        KeyCode::Left | KeyCode::Char('h') => {
            page.similar_mut().move_cursor(ScrollDirection::Left);
            Action::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            page.similar_mut().move_cursor(ScrollDirection::Right);
            Action::None
        }
        KeyCode::Char('[') => {
            page.similar_mut().scroll_mut().scroll(ScrollDirection::Left);
            Action::None
        }
        KeyCode::Char(']') => {
            page.similar_mut().scroll_mut().scroll(ScrollDirection::Right);
            Action::None
        }
        KeyCode::Char('p' | 'o') => page
            .trailer_url()
            .map_or(Action::None, |url| Action::Open(String::from(url))),
        KeyCode::Char('r') if matches!(page.loader.state(), DetailsState::Error(_)) => {
            Action::Fetch(page.mount())
        }
        KeyCode::Enter => page.activate().map_or(Action::None, Action::Navigate),
        _ => Action::None,
    }
}

fn handle_browse_input(page: &mut BrowsePage, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => return Action::Navigate(Route::Home),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            page.cycle_category(ScrollDirection::Left);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            page.cycle_category(ScrollDirection::Right);
        }
        KeyCode::Down | KeyCode::Char('j') => page.move_cursor(true),
        KeyCode::Up | KeyCode::Char('k') => page.move_cursor(false),
        _ => {}
    }
    Action::None
}

fn handle_profiles_input(page: &mut ProfilesPage, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => return Action::Navigate(Route::Home),
        KeyCode::Left | KeyCode::Char('h') => page.move_cursor(ScrollDirection::Left),
        KeyCode::Right | KeyCode::Char('l') => page.move_cursor(ScrollDirection::Right),
        KeyCode::Char('m') => page.toggle_editing(),
        KeyCode::Enter if !page.editing => return Action::Navigate(Route::Home),
        _ => {}
    }
    Action::None
}

/// Runs the terminal browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing or event handling fails.
/// Catalog failures are shown in the UI and never end the loop.
pub async fn run_browser<C>(api: Arc<C>, options: BrowserOptions) -> Result<()>
where
    C: CatalogApi + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(options.start, options.reveal_delay);
    for fetch in app.mount() {
        spawn_fetch(&api, &tx, fetch);
    }

    let result = run_event_loop(&mut terminal, &mut app, &api, &tx, &mut rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &Arc<C>,
    tx: &UnboundedSender<LoadEvent>,
    rx: &mut UnboundedReceiver<LoadEvent>,
) -> Result<()>
where
    C: CatalogApi + Sync + 'static,
{
    loop {
        let size = terminal.size().context("failed to read terminal size")?;
        app.set_viewport(ui::row_viewport(size.width));
        terminal
            .draw(|frame| ui::draw(frame, app, Instant::now()))
            .context("failed to draw TUI")?;

        let wait = if app.is_animating() {
            ANIMATION_FRAME
        } else {
            POLL_INTERVAL
        };
        tokio::select! {
            Some(event) = rx.recv() => app.apply(event, Instant::now()),
            () = tokio::time::sleep(wait) => {}
        }

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
            {
                match app.handle_key(key.code, key.modifiers) {
                    Action::Quit => return Ok(()),
                    Action::Navigate(route) => {
                        for fetch in app.navigate(route) {
                            spawn_fetch(api, tx, fetch);
                        }
                    }
                    Action::Fetch(fetch) => spawn_fetch(api, tx, fetch),
                    Action::Open(url) => open_url(app, &url),
                    Action::None => {}
                }
            }
        }

        app.tick();
    }
}

/// Runs one fetch on the runtime and reports its completion.
fn spawn_fetch<C>(api: &Arc<C>, tx: &UnboundedSender<LoadEvent>, fetch: Fetch)
where
    C: CatalogApi + Sync + 'static,
{
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = match fetch {
            Fetch::Hero(ticket) => LoadEvent::Hero {
                ticket,
                result: hero::load_hero(api.as_ref()).await,
            },
            Fetch::Row {
                slot,
                ticket,
                title,
                query,
            } => LoadEvent::Row {
                slot,
                ticket,
                items: row::load_items(&title, || query.fetch(api.as_ref())).await,
            },
            Fetch::Details { ticket, kind, id } => LoadEvent::Details {
                ticket,
                result: details::load_details(api.as_ref(), kind, id).await,
            },
        };
        if tx.send(event).is_err() {
            tracing::debug!("browser closed before fetch completed");
        }
    });
}

fn open_url(app: &mut App, url: &str) {
    tracing::info!(url, "opening in browser");
    if let Err(e) = open::that(url) {
        tracing::warn!("failed to open {url}: {e}");
        app.status = Some(format!("Could not open {url}"));
    }
}
