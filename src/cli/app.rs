//! Terminal shell hosting every screen behind a `StackRouter`.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::catalog::Catalog;
use crate::cli::book::BookingScreen;
use crate::cli::events::EventsScreen;
use crate::cli::explore::ExploreScreen;
use crate::cli::home::{HomeAction, HomeScreen};
use crate::cli::theme_details;
use crate::error::Result;
use crate::router::{Destination, Router, StackRouter};
use crate::settings::{load_settings, Settings};
use crate::tui::{run_app, App, LoopControl, Palette};
use crate::wizard::BookingWizard;

pub struct CrewbookApp {
    router: StackRouter,
    catalog: Catalog,
    settings: Settings,
    palette: Palette,
    home: HomeScreen,
    explore: ExploreScreen,
    events: EventsScreen,
    /// Live only while `BookEventFlow` is on the stack.
    booking: Option<BookingScreen>,
}

impl CrewbookApp {
    pub fn new(settings: Settings, catalog: Catalog) -> Self {
        let palette = Palette::from_settings(&settings.palette);
        Self {
            router: StackRouter::new(),
            home: HomeScreen::new(&settings.user_name, palette),
            explore: ExploreScreen::new(palette, &settings.palette.primary),
            events: EventsScreen::new(palette),
            catalog,
            settings,
            palette,
            booking: None,
        }
    }

    pub fn open(&mut self, dest: Destination) {
        self.router.navigate(dest);
        self.sync_mounts();
    }

    /// Mount a fresh wizard when the flow becomes current, and drop it once
    /// the flow is no longer on the stack.
    fn sync_mounts(&mut self) {
        if !self.router.contains(Destination::BookEventFlow.name()) {
            if let Some(screen) = self.booking.take() {
                tracing::debug!(
                    step = ?screen.wizard().current_step(),
                    depth = self.router.depth(),
                    "booking flow unmounted"
                );
            }
            return;
        }
        if self.booking.is_none() && *self.router.current() == Destination::BookEventFlow {
            let now = chrono::Local::now().naive_local();
            let wizard = BookingWizard::new(now, self.settings.model_view_mode);
            self.booking = Some(BookingScreen::new(
                wizard,
                self.palette,
                &self.settings.palette.primary,
            ));
            tracing::debug!("booking flow mounted");
        }
    }

    pub fn router(&self) -> &StackRouter {
        &self.router
    }

    pub fn booking(&self) -> Option<&BookingScreen> {
        self.booking.as_ref()
    }

    fn dispatch(&mut self, code: KeyCode) -> LoopControl {
        match self.router.current().clone() {
            Destination::Home => {
                if let HomeAction::Quit = self.home.handle_key(code, &mut self.router) {
                    return LoopControl::Quit;
                }
            }
            Destination::Explore => {
                self.explore.handle_key(code, &self.catalog, &mut self.router)
            }
            Destination::Events => self.events.handle_key(code, &mut self.router),
            Destination::BookEventFlow => {
                if let Some(booking) = self.booking.as_mut() {
                    booking.handle_key(code, &self.catalog, &mut self.router);
                }
            }
            Destination::ThemeDetails(_) => theme_details::handle_key(code, &mut self.router),
        }
        self.sync_mounts();
        LoopControl::Continue
    }
}

impl App for CrewbookApp {
    fn draw(&mut self, frame: &mut Frame) {
        frame.render_widget(
            Block::new().style(Style::new().bg(self.palette.background)),
            frame.area(),
        );
        match self.router.current() {
            Destination::Home => self.home.draw(frame),
            Destination::Explore => self.explore.draw(frame, &self.catalog),
            Destination::Events => self.events.draw(frame),
            Destination::BookEventFlow => {
                if let Some(booking) = self.booking() {
                    booking.draw(frame, &self.catalog);
                }
            }
            Destination::ThemeDetails(params) => {
                theme_details::draw(frame, params, &self.catalog, &self.palette)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> LoopControl {
        self.dispatch(key.code)
    }
}

/// Launch the TUI, optionally opening a destination on top of Home.
pub fn run(start: Option<Destination>) -> Result<()> {
    let settings = load_settings();
    let catalog_dir = settings
        .catalog_dir
        .as_deref()
        .map(|d| std::path::PathBuf::from(crate::settings::shellexpand_path(d)));
    let catalog = Catalog::load(catalog_dir.as_deref())?;

    let mut app = CrewbookApp::new(settings, catalog);
    if let Some(dest) = start {
        app.open(dest);
    }
    tracing::info!(start = app.router().current().name(), "starting tui");
    run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> CrewbookApp {
        CrewbookApp::new(Settings::default(), Catalog::embedded().unwrap())
    }

    fn keys(app: &mut CrewbookApp, codes: &[KeyCode]) {
        for c in codes {
            app.dispatch(*c);
        }
    }

    fn type_str(app: &mut CrewbookApp, s: &str) {
        for c in s.chars() {
            app.dispatch(KeyCode::Char(c));
        }
    }

    #[test]
    fn booking_mounts_on_entry_and_unmounts_on_exit() {
        let mut app = app();
        assert!(app.booking().is_none());
        app.dispatch(KeyCode::Char('b'));
        assert_eq!(app.router().current(), &Destination::BookEventFlow);
        assert!(app.booking().is_some());

        app.dispatch(KeyCode::Esc);
        assert_eq!(app.router().current(), &Destination::Home);
        assert!(app.booking().is_none());
    }

    #[test]
    fn wizard_state_survives_drill_down() {
        let mut app = app();
        app.open(Destination::BookEventFlow);
        keys(&mut app, &[KeyCode::Down, KeyCode::Down]);
        type_str(&mut app, "Launch party");
        app.dispatch(KeyCode::Enter);
        type_str(&mut app, "Jio World Centre");
        keys(&mut app, &[KeyCode::PageDown, KeyCode::Char('v')]);
        assert!(matches!(app.router().current(), Destination::ThemeDetails(_)));
        assert!(app.booking().is_some());

        app.dispatch(KeyCode::Esc);
        assert_eq!(app.router().current(), &Destination::BookEventFlow);
        let wizard = app.booking().unwrap().wizard();
        assert_eq!(wizard.state().event.venue, "Jio World Centre");
        assert_eq!(wizard.current_step().index(), 1);
    }

    #[test]
    fn reentering_the_flow_starts_fresh() {
        let mut app = app();
        app.open(Destination::BookEventFlow);
        keys(&mut app, &[KeyCode::Down, KeyCode::Down]);
        type_str(&mut app, "Sangeet");
        // back out: Esc leaves the text row unhandled, so the flow exits
        app.dispatch(KeyCode::Esc);
        assert!(app.booking().is_none());
        app.dispatch(KeyCode::Char('b'));
        let wizard = app.booking().unwrap().wizard();
        assert!(wizard.state().event.about_text.is_empty());
    }

    #[test]
    fn booking_from_events_mounts_wizard_and_finishes_home() {
        let mut app = app();
        app.dispatch(KeyCode::Char('m'));
        assert_eq!(app.router().current(), &Destination::Events);
        app.dispatch(KeyCode::Enter);
        assert_eq!(app.router().current(), &Destination::BookEventFlow);
        assert_eq!(app.router().depth(), 3);
        assert!(app.booking().is_some());

        keys(&mut app, &[KeyCode::Down, KeyCode::Down]);
        type_str(&mut app, "Reception");
        app.dispatch(KeyCode::Enter);
        type_str(&mut app, "Chancery Pavilion");
        app.dispatch(KeyCode::PageDown);
        // theme, uniform, package, model
        keys(&mut app, &[KeyCode::Enter, KeyCode::PageDown]);
        keys(&mut app, &[KeyCode::Enter, KeyCode::PageDown]);
        keys(&mut app, &[KeyCode::Enter, KeyCode::PageDown]);
        keys(&mut app, &[KeyCode::Enter, KeyCode::PageDown]);
        // billing, summary
        keys(&mut app, &[KeyCode::PageDown, KeyCode::PageDown]);
        keys(&mut app, &[KeyCode::Enter, KeyCode::PageDown]);
        assert_eq!(
            app.booking().unwrap().wizard().current_step(),
            crate::wizard::Step::Success
        );

        app.dispatch(KeyCode::PageDown);
        assert_eq!(app.router().current(), &Destination::Home);
        assert_eq!(app.router().depth(), 1);
        assert!(app.booking().is_none());
    }

    #[test]
    fn backing_out_of_booking_returns_to_events() {
        let mut app = app();
        app.open(Destination::Events);
        app.dispatch(KeyCode::Char('b'));
        assert!(app.booking().is_some());
        app.dispatch(KeyCode::Esc);
        assert_eq!(app.router().current(), &Destination::Events);
        assert!(app.booking().is_none());
    }

    #[test]
    fn quit_from_home() {
        let mut app = app();
        assert!(matches!(app.dispatch(KeyCode::Char('q')), LoopControl::Quit));
    }
}
