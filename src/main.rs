use clap::{Parser, Subcommand};
use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::{column, opaque, scrollable, stack, Space};
use iced::{time, Element, Length, Subscription, Task, Theme};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod assets;
mod config;
mod error;
mod pages;
mod router;
mod scaffold;
mod state;
mod ui;

use assets::{AssetError, AssetResolver, Tier};
use config::{Config, ThemeChoice};
use pages::{Page, PageIndex};
use router::{History, Location, Route};
use state::carousel::{CarouselError, CarouselState};
use state::catalog::Catalog;
use state::data::{ImageRef, ItemId};
use state::expansion::{ClickTarget, ExpansionController, ExpansionError, Presentation, ScrollLatch, TimerId};
use state::filter::FilterController;
use state::gate::{Access, AccessGate};
use state::storage::{KeyValueStore, MemoryStore, SqliteStore};
use ui::images::ImageCache;

/// Portfolio viewer
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory that image paths resolve against
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Content pages directory
    #[arg(long, global = true)]
    pages: Option<PathBuf>,

    /// Catalog JSON to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "folio=trace" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Location to open, e.g. "/?filter=adventures"
    #[arg(long, default_value = "/")]
    location: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write content page templates into the pages directory
    GeneratePages {
        /// Page id (file name without extension)
        #[arg(long, requires = "title", requires = "description")]
        id: Option<String>,

        #[arg(long, requires = "id")]
        title: Option<String>,

        #[arg(long, requires = "id")]
        description: Option<String>,
    },
}

/// One step of a carousel control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
    GoTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    Step(Step),
    /// Click on the card body
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Step(Step),
    Click(ClickTarget),
    Close,
    Unzoom,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    PasswordChanged(String),
    PasswordSubmitted,
    Navigate(Location),
    Back,
    Forward,
    ClearFilter,
    Card(ItemId, CardEvent),
    Overlay(OverlayEvent),
    /// Auto-advance tick from the timer with this id
    AutoAdvance(TimerId),
    /// Escape key
    Escape,
    ImageLoaded(ImageRef, Tier, Result<iced::widget::image::Handle, AssetError>),
}

enum PageView {
    Loaded(Page),
    Failed(String),
}

/// Main application state
struct Folio {
    catalog: Catalog,
    filter: FilterController,
    /// Inline carousel position per visible card
    cards: HashMap<ItemId, CarouselState>,
    expansion: ExpansionController,
    scroll: ScrollLatch,
    gate: AccessGate<Box<dyn KeyValueStore>>,
    /// Current contents of the password field
    password: String,
    history: History,
    pages: PageIndex,
    page: Option<PageView>,
    resolver: AssetResolver,
    images: ImageCache,
    theme: ThemeChoice,
}

impl Folio {
    fn new(config: &Config, catalog: Catalog, start: Location) -> Self {
        let store: Box<dyn KeyValueStore> = match SqliteStore::open_default() {
            Ok(store) => {
                tracing::debug!("Using key/value store at {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!("⚠️  Falling back to in-memory storage: {e}");
                Box::new(MemoryStore::new())
            }
        };

        let scroll = ScrollLatch::new();
        Self {
            catalog,
            filter: FilterController::new(start.filter.clone()),
            cards: HashMap::new(),
            expansion: ExpansionController::new(scroll.clone(), config.auto_advance_interval()),
            scroll,
            gate: AccessGate::open(store),
            password: String::new(),
            history: History::new(start),
            pages: PageIndex::scan(&config.pages_dir),
            page: None,
            resolver: AssetResolver::with_system_cache(&config.assets_dir),
            images: ImageCache::new(),
            theme: config.theme,
        }
    }

    fn boot(mut self) -> (Self, Task<Message>) {
        self.enter();
        tracing::info!(
            "🎨 Folio initialized with {} work items ({})",
            self.catalog.len(),
            if self.gate.is_unlocked() { "unlocked" } else { "locked" }
        );
        let task = self.request_images();
        (self, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        self.apply(message);
        self.request_images()
    }

    fn apply(&mut self, message: Message) {
        match message {
            Message::PasswordChanged(password) => {
                self.password = password;
                self.gate.edit();
            }
            Message::PasswordSubmitted => {
                if self.gate.check(&self.password) == Access::Granted {
                    tracing::info!("🔓 Portfolio unlocked");
                    self.password.clear();
                }
            }
            Message::ImageLoaded(image, tier, result) => self.images.finish(image, tier, result),
            // Everything else is behind the gate
            _ if !self.gate.is_unlocked() => {}
            Message::Navigate(location) => self.navigate(location),
            Message::Back => {
                if self.history.back().is_some() {
                    self.enter();
                }
            }
            Message::Forward => {
                if self.history.forward().is_some() {
                    self.enter();
                }
            }
            Message::ClearFilter => self.navigate(Location::home(None)),
            Message::Card(id, event) => self.card_event(id, event),
            Message::Overlay(event) => self.overlay_event(event),
            Message::AutoAdvance(id) => {
                self.expansion.tick(id);
            }
            Message::Escape => {
                if self.expansion.presentation() != Presentation::Closed {
                    report(self.expansion.dismiss());
                }
            }
        }
    }

    fn navigate(&mut self, location: Location) {
        if self.history.push(location) {
            self.enter();
        }
    }

    /// Apply the current history entry
    fn enter(&mut self) {
        while self.expansion.presentation() != Presentation::Closed {
            if self.expansion.dismiss().is_err() {
                break;
            }
        }

        let location = self.history.current().clone();
        tracing::debug!(%location, "entering location");
        match &location.route {
            Route::Home => {
                self.page = None;
                self.filter.set_filter(location.filter.clone());
                // Cards that drop out of view start from their first image next time
                let (catalog, filter) = (&self.catalog, &self.filter);
                self.cards
                    .retain(|id, _| catalog.get(*id).is_some_and(|item| filter.matches(item)));
            }
            Route::About => self.page = Some(self.load_page("about")),
            Route::Page(id) => self.page = Some(self.load_page(id)),
        }
    }

    fn load_page(&self, id: &str) -> PageView {
        match self.pages.load(id) {
            Ok(page) => PageView::Loaded(page),
            Err(e) => {
                tracing::warn!("Failed to load page: {e}");
                PageView::Failed(e.to_string())
            }
        }
    }

    fn card_event(&mut self, id: ItemId, event: CardEvent) {
        let Some(item) = self.catalog.get(id).cloned() else {
            tracing::warn!("Event for unknown work item {id}");
            return;
        };
        let carousel = self
            .cards
            .entry(id)
            .or_insert_with(|| CarouselState::new(item.image_count()));

        match event {
            CardEvent::Step(step) => {
                if let Err(e) = apply_step(carousel, step) {
                    tracing::debug!(item = %id, "Ignoring card step: {e}");
                }
            }
            CardEvent::Open => {
                let from = carousel.index();
                report(self.expansion.expand(item, from));
            }
        }
    }

    fn overlay_event(&mut self, event: OverlayEvent) {
        let result = match event {
            OverlayEvent::Step(Step::Next) => self.expansion.next(),
            OverlayEvent::Step(Step::Prev) => self.expansion.prev(),
            OverlayEvent::Step(Step::GoTo(index)) => self.expansion.go_to(index),
            OverlayEvent::Click(target) => self.expansion.click(target),
            OverlayEvent::Close => self.expansion.close(),
            OverlayEvent::Unzoom => self.expansion.unzoom(),
        };
        report(result);
    }

    /// Start loads for every image the current screen shows
    fn request_images(&mut self) -> Task<Message> {
        if !self.gate.is_unlocked() {
            return Task::none();
        }

        let mut wanted: Vec<(ImageRef, Tier)> = Vec::new();
        if self.page.is_none() {
            for item in self.filter.visible(&self.catalog) {
                let carousel = self
                    .cards
                    .get(&item.id)
                    .copied()
                    .unwrap_or_else(|| CarouselState::new(item.image_count()));
                wanted.push((item.avatar.clone(), Tier::Card));
                if let Some(image) = carousel.current(&item.images) {
                    wanted.push((image.clone(), Tier::Card));
                }
            }
        }
        if let Some(image) = self.expansion.detail_image() {
            wanted.push((image.clone(), Tier::Detail));
        }
        if let Some(image) = self.expansion.zoomed_image() {
            wanted.push((image.clone(), Tier::Full));
        }

        let tasks: Vec<Task<Message>> = wanted
            .into_iter()
            .filter_map(|(image, tier)| self.load_image(image, tier))
            .collect();
        Task::batch(tasks)
    }

    fn load_image(&mut self, image: ImageRef, tier: Tier) -> Option<Task<Message>> {
        if !self.images.begin(&image, tier) {
            return None;
        }

        match self.resolver.resolve(&image) {
            Ok(source) => {
                let cache_root = self.resolver.cache_root().map(|root| root.to_path_buf());
                Some(Task::perform(assets::load(source, cache_root, tier), move |result| {
                    Message::ImageLoaded(image.clone(), tier, result.map(ui::images::to_handle))
                }))
            }
            Err(e) => {
                self.images.finish(image, tier, Err(e));
                None
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if !self.gate.is_unlocked() {
            return ui::gate::view(&self.password, self.gate.error());
        }

        let current = self.history.current();
        let body: Element<Message> = match &self.page {
            None => ui::grid::view(
                self.filter.visible(&self.catalog).collect(),
                self.filter.active(),
                &self.cards,
                &self.images,
            ),
            Some(PageView::Loaded(page)) => ui::page::view(page, self.pages.entries()),
            Some(PageView::Failed(error)) => ui::page::missing(error),
        };

        let base = column![
            ui::nav::view(current, self.history.can_go_back(), self.history.can_go_forward()),
            scrollable(column![body, ui::footer()]).height(Length::Fill),
        ];

        let mut layers = stack![base].width(Length::Fill).height(Length::Fill);

        if self.scroll.is_locked() {
            layers = layers.push(opaque(Space::new(Length::Fill, Length::Fill)));
        }
        if let (Some(item), Some(carousel)) = (self.expansion.expanded_item(), self.expansion.carousel()) {
            layers = layers.push(ui::overlay::detail(item, *carousel, &self.images));
            if let Some(image) = self.expansion.zoomed_image() {
                layers = layers.push(ui::overlay::zoom(image, *carousel, &self.images));
            }
        }

        layers.into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(shortcut);

        match self.expansion.timer() {
            Some(lease) => Subscription::batch([
                keys,
                time::every(lease.interval())
                    .with(lease.id())
                    .map(|(id, _)| Message::AutoAdvance(id)),
            ]),
            None => keys,
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.theme {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

fn shortcut(key: Key, modifiers: Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(key::Named::Escape) => Some(Message::Escape),
        Key::Named(key::Named::ArrowLeft) if modifiers.alt() => Some(Message::Back),
        Key::Named(key::Named::ArrowRight) if modifiers.alt() => Some(Message::Forward),
        Key::Named(key::Named::ArrowLeft) => Some(Message::Overlay(OverlayEvent::Step(Step::Prev))),
        Key::Named(key::Named::ArrowRight) => Some(Message::Overlay(OverlayEvent::Step(Step::Next))),
        _ => None,
    }
}

fn apply_step(carousel: &mut CarouselState, step: Step) -> Result<(), CarouselError> {
    match step {
        Step::Next => carousel.next(),
        Step::Prev => carousel.prev(),
        Step::GoTo(index) => return carousel.go_to(index),
    }
    Ok(())
}

/// Ignored transitions are expected (e.g. arrow keys with nothing open)
fn report(result: Result<(), ExpansionError>) {
    if let Err(e) = result {
        tracing::debug!("Ignoring overlay event: {e}");
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn load_config(cli: &Cli) -> error::Result<Config> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    if let Some(assets) = &cli.assets {
        config.assets_dir = assets.clone();
    }
    if let Some(pages) = &cli.pages {
        config.pages_dir = pages.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> error::Result<()> {
    let config = load_config(&cli)?;

    if let Some(Command::GeneratePages { id, title, description }) = cli.command {
        let specs = match (id, title, description) {
            (Some(id), Some(title), Some(description)) => {
                vec![scaffold::PageSpec::new(&id, &title, &description)]
            }
            _ => scaffold::default_pages(),
        };
        let report = scaffold::generate(&config.pages_dir, &specs)?;
        println!(
            "📊 Pages: {} created, {} skipped",
            report.created.len(),
            report.skipped.len()
        );
        return Ok(());
    }

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::embedded()?,
    };

    let folio = Folio::new(&config, catalog, Location::parse(&cli.location));

    iced::application("Folio", Folio::update, Folio::view)
        .subscription(Folio::subscription)
        .theme(Folio::theme)
        .centered()
        .run_with(move || folio.boot())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::data::{FilterTag, WorkItem};
    use std::sync::Arc;

    fn app() -> Folio {
        let scroll = ScrollLatch::new();
        let config = Config::default();
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        Folio {
            catalog: Catalog::embedded().unwrap(),
            filter: FilterController::default(),
            cards: HashMap::new(),
            expansion: ExpansionController::new(scroll.clone(), config.auto_advance_interval()),
            scroll,
            gate: AccessGate::with_secret(store, "open sesame"),
            password: String::new(),
            history: History::new(Location::home(None)),
            pages: PageIndex::default(),
            page: None,
            resolver: AssetResolver::new("/nonexistent", None),
            images: ImageCache::new(),
            theme: config.theme,
        }
    }

    fn unlocked() -> Folio {
        let mut folio = app();
        folio.apply(Message::PasswordChanged("open sesame".into()));
        folio.apply(Message::PasswordSubmitted);
        assert!(folio.gate.is_unlocked());
        folio
    }

    fn item_with_images(folio: &Folio, min: usize) -> Arc<WorkItem> {
        folio
            .catalog
            .items()
            .iter()
            .find(|item| item.images.len() >= min)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_locked_gate_ignores_navigation() {
        let mut folio = app();
        folio.apply(Message::Navigate(Location::about()));
        assert_eq!(*folio.history.current(), Location::home(None));

        folio.apply(Message::PasswordChanged("wrong".into()));
        folio.apply(Message::PasswordSubmitted);
        assert!(!folio.gate.is_unlocked());
        assert!(folio.gate.error().is_some());

        folio.apply(Message::PasswordChanged("wron".into()));
        assert!(folio.gate.error().is_none());
    }

    #[test]
    fn test_filter_navigation_and_clear() {
        let mut folio = unlocked();
        folio.apply(Message::Navigate(Location::parse("/my-adventures")));
        assert_eq!(folio.filter.active(), Some(&FilterTag::adventures()));
        assert_eq!(folio.filter.visible(&folio.catalog).count(), 2);

        folio.apply(Message::ClearFilter);
        assert_eq!(folio.filter.active(), None);
        assert_eq!(folio.filter.visible(&folio.catalog).count(), folio.catalog.len());

        folio.apply(Message::Back);
        assert_eq!(folio.filter.active(), Some(&FilterTag::adventures()));
        folio.apply(Message::Forward);
        assert_eq!(folio.filter.active(), None);
    }

    #[test]
    fn test_card_carousel_is_independent_of_detail() {
        let mut folio = unlocked();
        let item = item_with_images(&folio, 2);

        folio.apply(Message::Card(item.id, CardEvent::Step(Step::Next)));
        assert_eq!(folio.cards[&item.id].index(), 1);

        folio.apply(Message::Card(item.id, CardEvent::Open));
        assert_eq!(folio.expansion.presentation(), Presentation::Expanded);
        assert_eq!(folio.expansion.carousel().unwrap().index(), 1);
        assert!(folio.scroll.is_locked());

        folio.apply(Message::Overlay(OverlayEvent::Step(Step::Prev)));
        assert_eq!(folio.expansion.carousel().unwrap().index(), 0);
        assert_eq!(folio.cards[&item.id].index(), 1);
    }

    #[test]
    fn test_escape_peels_overlays() {
        let mut folio = unlocked();
        let item = item_with_images(&folio, 2);

        folio.apply(Message::Card(item.id, CardEvent::Open));
        folio.apply(Message::Overlay(OverlayEvent::Click(ClickTarget::DetailImage)));
        assert_eq!(folio.expansion.presentation(), Presentation::Zoomed);
        assert!(folio.expansion.timer().is_some());

        folio.apply(Message::Escape);
        assert_eq!(folio.expansion.presentation(), Presentation::Expanded);
        assert!(folio.expansion.timer().is_none());

        folio.apply(Message::Escape);
        assert_eq!(folio.expansion.presentation(), Presentation::Closed);
        assert!(!folio.scroll.is_locked());

        // Nothing open: a no-op
        folio.apply(Message::Escape);
        assert_eq!(folio.expansion.presentation(), Presentation::Closed);
    }

    #[test]
    fn test_navigation_closes_overlays() {
        let mut folio = unlocked();
        let item = item_with_images(&folio, 1);

        folio.apply(Message::Card(item.id, CardEvent::Open));
        folio.apply(Message::Overlay(OverlayEvent::Click(ClickTarget::DetailImage)));
        folio.apply(Message::Navigate(Location::about()));

        assert_eq!(folio.expansion.presentation(), Presentation::Closed);
        assert!(!folio.scroll.is_locked());
        assert!(matches!(folio.page, Some(PageView::Loaded(_))));
    }

    #[test]
    fn test_filtered_out_cards_reset() {
        let mut folio = unlocked();
        let item = folio
            .catalog
            .items()
            .iter()
            .find(|item| item.filter_tag == FilterTag::adventures() && item.images.len() > 1)
            .cloned()
            .unwrap();

        folio.apply(Message::Card(item.id, CardEvent::Step(Step::Next)));
        folio.apply(Message::Navigate(Location::home(Some(FilterTag::professional()))));
        assert!(!folio.cards.contains_key(&item.id));
    }

    #[test]
    fn test_shortcuts() {
        assert!(matches!(
            shortcut(Key::Named(key::Named::Escape), Modifiers::empty()),
            Some(Message::Escape)
        ));
        assert!(matches!(
            shortcut(Key::Named(key::Named::ArrowLeft), Modifiers::ALT),
            Some(Message::Back)
        ));
        assert!(matches!(
            shortcut(Key::Named(key::Named::ArrowRight), Modifiers::empty()),
            Some(Message::Overlay(OverlayEvent::Step(Step::Next)))
        ));
        assert!(shortcut(Key::Character("a".into()), Modifiers::empty()).is_none());
    }

    #[test]
    fn test_unresolvable_images_fail_without_tasks() {
        let mut folio = unlocked();
        let missing = ImageRef::missing();
        assert!(folio.load_image(missing.clone(), Tier::Card).is_none());
        assert!(!folio.images.begin(&missing, Tier::Card));
    }
}
