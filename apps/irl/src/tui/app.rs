//! Application state and event loop.
//!
//! ## Screens
//!
//! - **Main**: menu, workspace summary and recent projects
//! - **Wizard**: a new-project or adopt wizard
//!
//! A background check for new remote templates starts with the app and
//! reports on the main screen's status line when it finishes.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use super::flow::{AdoptFlow, Flow, InitFlow};
use super::menu::{Menu, MenuAction};
use super::state::{HomeState, Screen};
use super::tasks::{Job, TaskMessage, TaskPayload, TaskRunner, ThreadRunner};
use super::terminal::TerminalGuard;
use super::theme::Theme;
use super::views::{main_view, wizard_view};
use super::wizard::{PendingLaunch, Wizard, WizardContext, WizardSignal};
use crate::settings::{Config, ConfigStore};
use crate::tools::editor::detect_installed;

const POLL_TIMEOUT_MS: u64 = 100;

const DEFAULT_STATUS: &str = "n new project, a adopt folder, q quit";

pub struct App<R: TaskRunner + Clone> {
    screen: Screen,
    status_message: String,
    should_quit: bool,
    theme: Theme,
    menu: Menu,
    home: HomeState,
    store: Option<ConfigStore>,
    runner: R,
    wizard: Option<Wizard<R>>,
    /// Terminal editor to run after the TUI exits.
    pending_launch: Option<PendingLaunch>,
    template_check: Option<Receiver<TaskMessage>>,
}

impl<R: TaskRunner + Clone> App<R> {
    pub fn new(runner: R, store: Option<ConfigStore>) -> Self {
        let mut app = Self {
            screen: Screen::Main,
            status_message: DEFAULT_STATUS.to_string(),
            should_quit: false,
            theme: Theme::detect(),
            menu: Menu::new(),
            home: HomeState::default(),
            store,
            runner,
            wizard: None,
            pending_launch: None,
            template_check: None,
        };
        app.refresh_home();
        app
    }

    /// Starts counting remote templates missing from the cache.
    pub fn start_template_check(&mut self) {
        let (tx, rx) = mpsc::channel();
        self.runner.spawn(Job::CheckTemplates, 0, tx);
        self.template_check = Some(rx);
    }

    fn load_config(&mut self) -> Config {
        let Some(store) = &self.store else {
            return Config::default();
        };
        match store.load() {
            Ok(config) => config,
            Err(e) => {
                self.status_message = format!("Cannot read config: {e}");
                Config::default()
            }
        }
    }

    fn refresh_home(&mut self) {
        let workspace = self.load_config().default_directory;
        self.home.load(workspace);
    }

    fn poll_background(&mut self) {
        if let Some(wizard) = self.wizard.as_mut() {
            wizard.poll();
            wizard.tick();
        }

        let Some(receiver) = self.template_check.as_ref() else {
            return;
        };
        if let Ok(message) = receiver.try_recv() {
            self.apply_template_check(message.payload);
            self.template_check = None;
        }
    }

    fn apply_template_check(&mut self, payload: TaskPayload) {
        match payload {
            TaskPayload::NewTemplates(Ok(0)) => self.home.template_notice = None,
            TaskPayload::NewTemplates(Ok(count)) => {
                self.home.template_notice = Some(format!(
                    "{count} new template(s) available. Run 'irl update' or press r when picking a template."
                ));
            }
            TaskPayload::NewTemplates(Err(e)) => {
                tracing::debug!(error = %e, "template check failed");
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Main => self.handle_main_key(code),
            Screen::Wizard => self.handle_wizard_key(code),
        }
    }

    fn handle_main_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.menu.up(),
            KeyCode::Down | KeyCode::Char('j') => self.menu.down(),
            KeyCode::Enter => self.activate(self.menu.selected_item().action),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                if let Some(item) = Menu::find_by_key(c) {
                    self.activate(item.action);
                }
            }
            _ => {}
        }
    }

    fn handle_wizard_key(&mut self, code: KeyCode) {
        let Some(wizard) = self.wizard.as_mut() else {
            self.screen = Screen::Main;
            return;
        };
        match wizard.handle_key(code) {
            WizardSignal::Continue => {}
            WizardSignal::Exit => self.close_wizard(),
            WizardSignal::Launch(launch) => {
                self.pending_launch = Some(launch);
                self.should_quit = true;
            }
        }
    }

    fn activate(&mut self, action: MenuAction) {
        match action {
            MenuAction::NewProject => self.open_wizard(Box::new(InitFlow)),
            MenuAction::AdoptFolder => self.open_wizard(Box::new(AdoptFlow)),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn open_wizard(&mut self, flow: Box<dyn Flow>) {
        let config = self.load_config();
        let context = WizardContext {
            default_directory: config.default_directory,
            profile: config.profile,
            browse_start: browse_start(),
            store: self.store.clone(),
            tools: detect_installed(),
        };
        self.wizard = Some(Wizard::new(flow, self.runner.clone(), context));
        self.screen = Screen::Wizard;
    }

    fn close_wizard(&mut self) {
        self.wizard = None;
        self.screen = Screen::Main;
        self.status_message = DEFAULT_STATUS.to_string();
        self.refresh_home();
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match (&self.screen, &self.wizard) {
            (Screen::Wizard, Some(wizard)) => {
                wizard_view::render(frame, area, &self.theme, wizard);
            }
            _ => main_view::render(
                frame,
                area,
                &self.theme,
                &self.menu,
                &self.home,
                &self.status_message,
            ),
        }
    }
}

fn browse_start() -> PathBuf {
    std::env::current_dir()
        .ok()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// Runs the event loop until the user quits or picks a terminal editor.
///
/// Returns the pending editor launch, if any, so the caller can run it with
/// the terminal restored.
///
/// # Errors
///
/// Returns an error if drawing or reading terminal events fails.
pub fn run_app(guard: &mut TerminalGuard) -> Result<Option<PendingLaunch>> {
    let mut app = App::new(ThreadRunner, ConfigStore::open().ok());
    app.start_template_check();

    loop {
        app.poll_background();

        guard
            .terminal
            .draw(|frame| app.render(frame))
            .context("failed to draw frame")?;

        if event::poll(Duration::from_millis(POLL_TIMEOUT_MS)).context("event poll failed")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code, key.modifiers);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(app.pending_launch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::flow::Step;
    use crate::tui::tasks::testing::RecordingRunner;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::fs;

    fn temp_store() -> (ConfigStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("irl_test_{}", rand::random::<u64>()));
        let workspace = root.join("research");
        fs::create_dir_all(&workspace).unwrap();
        let store = ConfigStore::new(root.join("config.json"));
        store.set_default_directory(workspace.clone()).unwrap();
        (store, root)
    }

    fn app() -> App<RecordingRunner> {
        App::new(RecordingRunner::default(), None)
    }

    #[test]
    fn starts_on_main_screen() {
        let app = app();
        assert_eq!(app.screen, Screen::Main);
        assert!(!app.should_quit);
        assert!(app.home.workspace.is_none());
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut a = app();
        a.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(a.should_quit);

        let mut b = app();
        b.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(b.should_quit);
        assert!(b.pending_launch.is_none());
    }

    #[test]
    fn shortcut_opens_wizard_and_escape_returns() {
        let (store, root) = temp_store();
        let mut app = App::new(RecordingRunner::default(), Some(store));
        assert!(app.home.workspace.is_some());

        app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Wizard);
        let wizard = app.wizard.as_ref().unwrap();
        assert_eq!(wizard.step(), Step::Directory);
        assert!(wizard.data().directory.is_some());

        // Typing 'q' inside the wizard never quits the app.
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Main);
        assert!(app.wizard.is_none());

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn menu_enter_opens_adopt_wizard() {
        let mut app = app();
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.wizard.as_ref().map(Wizard::step), Some(Step::Source));
    }

    #[test]
    fn template_check_result_sets_notice() {
        let mut app = app();
        app.start_template_check();
        assert_eq!(
            app.runner.last().map(|(job, _)| job),
            Some(Job::CheckTemplates)
        );

        app.apply_template_check(TaskPayload::NewTemplates(Ok(3)));
        assert!(app.home.template_notice.as_deref().unwrap().starts_with("3 new"));

        app.apply_template_check(TaskPayload::NewTemplates(Err("offline".to_string())));
        assert!(app.home.template_notice.is_some());

        app.apply_template_check(TaskPayload::NewTemplates(Ok(0)));
        assert!(app.home.template_notice.is_none());
    }

    #[test]
    fn render_both_screens_does_not_panic() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("Should create terminal");
        terminal.draw(|f| app.render(f)).expect("Should render");

        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        terminal.draw(|f| app.render(f)).expect("Should render");
    }
}
