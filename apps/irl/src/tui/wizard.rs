//! Step engine shared by the new-project and adopt wizards.
//!
//! The engine owns navigation, background jobs and the result screen. What
//! the steps are and what the final action does come from a [`Flow`].
//!
//! Every backward move bumps a generation counter. Jobs carry the generation
//! they were issued under, and results from an older generation are dropped,
//! so leaving a step never lets a late result land on the wrong screen.
//!
//! At most one job runs at a time. A template load wanted while another job
//! is still running is queued and issued when that job reports back; other
//! requests are refused with a status message.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use crossterm::event::KeyCode;

use super::browser::DirBrowser;
use super::flow::{Flow, Step, WizardData};
use super::state::{Spinner, TemplateListState, TextInput};
use super::tasks::{Job, TaskMessage, TaskPayload, TaskRunner};
use crate::project::{ProjectOutcome, generate_name_today};
use crate::settings::{ConfigStore, EditorKind, Profile};
use crate::tools::editor::{LaunchRequest, Tool, find_by_key, open_target};

const BUSY_STATUS: &str = "Previous operation still running";

/// Inputs a wizard starts from.
#[derive(Debug, Clone, Default)]
pub struct WizardContext {
    /// Configured workspace, if any.
    pub default_directory: Option<PathBuf>,
    pub profile: Profile,
    /// Where browsing starts when nothing better is known.
    pub browse_start: PathBuf,
    /// Store used to remember a first workspace choice.
    pub store: Option<ConfigStore>,
    /// Tools offered on the result screen.
    pub tools: Vec<Tool>,
}

/// A terminal editor to run once the TUI has released the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLaunch {
    pub request: LaunchRequest,
    pub target: PathBuf,
}

/// What the app should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardSignal {
    Continue,
    /// Close the wizard and return to the main screen.
    Exit,
    /// Leave the TUI, run the editor, then come back.
    Launch(PendingLaunch),
}

pub struct Wizard<R: TaskRunner> {
    flow: Box<dyn Flow>,
    runner: R,
    tx: Sender<TaskMessage>,
    rx: Receiver<TaskMessage>,
    generation: u64,
    /// A job has been issued and has not reported back yet.
    in_flight: bool,
    queued: Option<Job>,
    step: usize,
    data: WizardData,
    store: Option<ConfigStore>,
    remember_directory: bool,
    browse_start: PathBuf,
    browser: Option<DirBrowser>,
    purpose: TextInput,
    templates: TemplateListState,
    spinner: Spinner,
    outcome: Option<Result<ProjectOutcome, String>>,
    return_step: usize,
    tools: Vec<Tool>,
    status: Option<String>,
}

impl<R: TaskRunner> Wizard<R> {
    pub fn new(flow: Box<dyn Flow>, runner: R, context: WizardContext) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut wizard = Self {
            flow,
            runner,
            tx,
            rx,
            generation: 0,
            in_flight: false,
            queued: None,
            step: 0,
            remember_directory: context.default_directory.is_none(),
            data: WizardData {
                directory: context.default_directory,
                profile: context.profile,
                ..WizardData::default()
            },
            store: context.store,
            browse_start: context.browse_start,
            browser: None,
            purpose: TextInput::default(),
            templates: TemplateListState::default(),
            spinner: Spinner::default(),
            outcome: None,
            return_step: 0,
            tools: context.tools,
            status: None,
        };
        wizard.enter_step();
        wizard
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.flow.title()
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.flow.steps()[self.step]
    }

    /// One-based position among the interactive steps, with their count.
    /// `None` while working or showing the result.
    #[must_use]
    pub fn progress(&self) -> Option<(usize, usize)> {
        let interactive = self
            .flow
            .steps()
            .iter()
            .filter(|s| !matches!(s, Step::Working | Step::Done))
            .count();
        (self.step < interactive).then_some((self.step + 1, interactive))
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn data(&self) -> &WizardData {
        &self.data
    }

    /// Active directory browser, if the current step is browsing.
    #[must_use]
    pub fn browser(&self) -> Option<&DirBrowser> {
        self.browser
            .as_ref()
            .filter(|_| matches!(self.step(), Step::Directory | Step::Source))
    }

    #[must_use]
    pub fn purpose(&self) -> &TextInput {
        &self.purpose
    }

    /// Folder name the purpose typed so far would produce.
    #[must_use]
    pub fn name_preview(&self) -> String {
        generate_name_today(self.purpose.trimmed())
    }

    #[must_use]
    pub fn target_name(&self) -> Option<String> {
        self.flow.target_name(&self.data)
    }

    #[must_use]
    pub fn templates(&self) -> &TemplateListState {
        &self.templates
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Result<ProjectOutcome, String>> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn spinner_frame(&self) -> &'static str {
        self.spinner.frame()
    }

    /// Advances animations. Called once per event loop iteration.
    pub fn tick(&mut self) {
        self.spinner.advance();
    }

    /// Applies every finished job.
    pub fn poll(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn handle_message(&mut self, message: TaskMessage) {
        self.in_flight = false;
        if let Some(job) = self.queued.take() {
            self.issue(job);
        }

        if message.generation != self.generation {
            tracing::debug!(
                stale = message.generation,
                current = self.generation,
                "dropping stale task result"
            );
            return;
        }

        match message.payload {
            TaskPayload::TemplatesLoaded(templates) => self.templates.set_templates(templates),
            TaskPayload::TemplatesRefreshed(Ok(templates)) if templates.is_empty() => {
                self.templates.loading = false;
                self.templates.notice = Some("No templates found remotely".to_string());
            }
            TaskPayload::TemplatesRefreshed(Ok(templates)) => {
                let count = templates.len();
                self.templates.set_templates(templates);
                self.templates.notice = Some(format!("Fetched {count} templates"));
            }
            TaskPayload::TemplatesRefreshed(Err(e)) => {
                self.templates.loading = false;
                self.templates.notice = Some(format!("Refresh failed: {e}"));
            }
            TaskPayload::ActionFinished(result) => {
                if self.step() == Step::Working {
                    self.outcome = Some(result);
                    self.go_to(Step::Done);
                }
            }
            TaskPayload::NewTemplates(_) => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> WizardSignal {
        self.status = None;
        match self.step() {
            Step::Directory => self.directory_key(code),
            Step::Source => self.source_key(code),
            Step::Purpose => self.purpose_key(code),
            Step::Template => self.template_key(code),
            Step::Working => match code {
                KeyCode::Esc | KeyCode::Left => self.back(),
                _ => WizardSignal::Continue,
            },
            Step::Done => self.done_key(code),
        }
    }

    fn directory_key(&mut self, code: KeyCode) -> WizardSignal {
        if self.browser.is_some() {
            match code {
                KeyCode::Esc => self.browser = None,
                KeyCode::Enter => {
                    if let Some(browser) = self.browser.take() {
                        self.data.directory = Some(browser.current().to_path_buf());
                    }
                }
                other => self.browse_key(other),
            }
            return WizardSignal::Continue;
        }

        match code {
            KeyCode::Enter if self.data.directory.is_some() => {
                self.remember_directory_choice();
                self.advance();
            }
            KeyCode::Enter => {
                self.status = Some("Choose a directory first: press b to browse".to_string());
            }
            KeyCode::Char('b') | KeyCode::Right => {
                let start = self
                    .data
                    .directory
                    .clone()
                    .filter(|dir| dir.is_dir())
                    .unwrap_or_else(|| self.browse_start.clone());
                self.browser = Some(DirBrowser::new(&start));
            }
            KeyCode::Esc | KeyCode::Left => return self.back(),
            _ => {}
        }
        WizardSignal::Continue
    }

    fn source_key(&mut self, code: KeyCode) -> WizardSignal {
        match code {
            KeyCode::Esc => return self.back(),
            KeyCode::Enter => {
                if let Some(browser) = &self.browser {
                    self.data.source = Some(browser.current().to_path_buf());
                    self.advance();
                }
            }
            other => self.browse_key(other),
        }
        WizardSignal::Continue
    }

    fn browse_key(&mut self, code: KeyCode) {
        let Some(browser) = self.browser.as_mut() else {
            return;
        };
        match code {
            KeyCode::Up | KeyCode::Char('k') => browser.up(),
            KeyCode::Down | KeyCode::Char('j') => browser.down(),
            KeyCode::Right | KeyCode::Char('l') => {
                browser.enter_selected();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if !browser.go_parent() {
                    self.status = Some("Already at the filesystem root".to_string());
                }
            }
            KeyCode::Char('s') => browser.toggle_sort(),
            _ => {}
        }
    }

    fn purpose_key(&mut self, code: KeyCode) -> WizardSignal {
        match code {
            KeyCode::Char(c) => self.purpose.push(c),
            KeyCode::Backspace => self.purpose.pop(),
            KeyCode::Enter => {
                self.data.purpose = self.purpose.trimmed().to_string();
                self.advance();
            }
            KeyCode::Esc => return self.back(),
            _ => {}
        }
        WizardSignal::Continue
    }

    fn template_key(&mut self, code: KeyCode) -> WizardSignal {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.templates.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.templates.select_next(),
            KeyCode::Char('r') if !self.templates.loading => {
                if self.refuse_if_busy() {
                    return WizardSignal::Continue;
                }
                self.templates.loading = true;
                self.templates.notice = None;
                self.issue(Job::RefreshTemplates);
            }
            KeyCode::Enter if self.templates.loading => {
                self.status = Some("Templates are still loading".to_string());
            }
            KeyCode::Enter => self.start_action(),
            KeyCode::Esc | KeyCode::Left => return self.back(),
            _ => {}
        }
        WizardSignal::Continue
    }

    fn done_key(&mut self, code: KeyCode) -> WizardSignal {
        let Some(Ok(outcome)) = &self.outcome else {
            return match code {
                KeyCode::Esc | KeyCode::Left => self.back(),
                _ => WizardSignal::Continue,
            };
        };

        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => WizardSignal::Exit,
            KeyCode::Char(key) => {
                let Some(tool) = find_by_key(&self.tools, key) else {
                    return WizardSignal::Continue;
                };
                let target = open_target(tool.kind, &outcome.path);
                let request = tool.request();
                match tool.kind {
                    EditorKind::Terminal => WizardSignal::Launch(PendingLaunch { request, target }),
                    EditorKind::Gui => {
                        self.status = Some(match request.launch(&target) {
                            Ok(()) => format!("Opened in {}", tool.label),
                            Err(e) => format!("Could not open {}: {e}", tool.label),
                        });
                        WizardSignal::Continue
                    }
                }
            }
            _ => WizardSignal::Continue,
        }
    }

    fn start_action(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        self.data.template = self.templates.selected_name().map(ToString::to_string);
        self.return_step = self.step;
        match self.flow.prepare_action(&self.data) {
            Ok(action) => {
                self.go_to(Step::Working);
                self.issue(Job::Run(action));
            }
            Err(e) => {
                tracing::debug!(error = %e, "action rejected before running");
                self.outcome = Some(Err(format!("{e}")));
                self.go_to(Step::Done);
            }
        }
    }

    /// Saves the workspace as the default when none was configured.
    fn remember_directory_choice(&mut self) {
        if !self.remember_directory {
            return;
        }
        if let (Some(store), Some(dir)) = (&self.store, &self.data.directory) {
            match store.set_default_directory(dir.clone()) {
                Ok(()) => self.remember_directory = false,
                Err(e) => tracing::warn!(error = %e, "cannot save default directory"),
            }
        }
    }

    fn issue(&mut self, job: Job) {
        self.in_flight = true;
        self.runner.spawn(job, self.generation, self.tx.clone());
    }

    /// Issues `job` now, or once the running job reports back.
    fn issue_or_queue(&mut self, job: Job) {
        if self.in_flight {
            self.queued = Some(job);
        } else {
            self.issue(job);
        }
    }

    fn refuse_if_busy(&mut self) -> bool {
        if self.in_flight {
            self.status = Some(BUSY_STATUS.to_string());
        }
        self.in_flight
    }

    fn advance(&mut self) {
        if self.step + 1 < self.flow.steps().len() {
            self.step += 1;
            self.enter_step();
        }
    }

    fn back(&mut self) -> WizardSignal {
        self.generation += 1;
        self.templates.loading = false;
        self.queued = None;
        match self.step() {
            Step::Done => {
                self.outcome = None;
                self.step = self.return_step;
            }
            _ if self.step == 0 => return WizardSignal::Exit,
            _ => self.step -= 1,
        }
        self.enter_step();
        WizardSignal::Continue
    }

    fn go_to(&mut self, step: Step) {
        if let Some(index) = self.flow.steps().iter().position(|s| *s == step) {
            self.step = index;
        }
    }

    fn enter_step(&mut self) {
        match self.step() {
            Step::Source if self.browser.is_none() => {
                self.browser = Some(DirBrowser::new(&self.browse_start));
            }
            Step::Template if !self.templates.loaded && !self.templates.loading => {
                self.templates.loading = true;
                self.issue_or_queue(Job::LoadTemplates);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Config;
    use crate::templates::Template;
    use crate::tools::editor::KNOWN_TOOLS;
    use crate::tui::flow::{AdoptFlow, InitFlow};
    use crate::tui::tasks::ActionRequest;
    use crate::tui::tasks::testing::RecordingRunner;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("irl_test_{}", rand::random::<u64>()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn init_wizard(workspace: Option<PathBuf>) -> (Wizard<RecordingRunner>, RecordingRunner) {
        let runner = RecordingRunner::default();
        let context = WizardContext {
            default_directory: workspace,
            browse_start: std::env::temp_dir(),
            tools: KNOWN_TOOLS.to_vec(),
            ..WizardContext::default()
        };
        (Wizard::new(Box::new(InitFlow), runner.clone(), context), runner)
    }

    fn type_text<R: TaskRunner>(wizard: &mut Wizard<R>, text: &str) {
        for c in text.chars() {
            wizard.handle_key(KeyCode::Char(c));
        }
    }

    fn deliver<R: TaskRunner>(wizard: &mut Wizard<R>, payload: TaskPayload) {
        let generation = wizard.generation();
        wizard.handle_message(TaskMessage {
            generation,
            payload,
        });
    }

    fn outcome(path: PathBuf) -> ProjectOutcome {
        ProjectOutcome {
            name: "p".to_string(),
            path,
            plan_written: true,
            warnings: Vec::new(),
        }
    }

    /// Walks an init wizard to the template step with templates loaded.
    fn at_template_step(workspace: &PathBuf) -> (Wizard<RecordingRunner>, RecordingRunner) {
        let (mut wizard, runner) = init_wizard(Some(workspace.clone()));
        wizard.handle_key(KeyCode::Enter);
        type_text(&mut wizard, "sleep study");
        wizard.handle_key(KeyCode::Enter);
        deliver(
            &mut wizard,
            TaskPayload::TemplatesLoaded(vec![
                Template::new("default", ""),
                Template::new("experiment", ""),
            ]),
        );
        (wizard, runner)
    }

    #[test]
    fn init_walkthrough_runs_create() {
        let workspace = temp_dir();
        let (mut wizard, runner) = init_wizard(Some(workspace.clone()));
        assert_eq!(wizard.step(), Step::Directory);
        assert_eq!(wizard.progress(), Some((1, 3)));

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Purpose);
        type_text(&mut wizard, "Sleep and memoryX");
        wizard.handle_key(KeyCode::Backspace);
        assert!(wizard.name_preview().ends_with("-sleep-memory"));

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Template);
        assert_eq!(runner.last(), Some((Job::LoadTemplates, 0)));

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Template);
        assert_eq!(wizard.status(), Some("Templates are still loading"));

        deliver(
            &mut wizard,
            TaskPayload::TemplatesLoaded(vec![
                Template::new("default", ""),
                Template::new("experiment", ""),
            ]),
        );
        assert_eq!(wizard.templates().len(), 2);
        wizard.handle_key(KeyCode::Down);
        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Working);
        assert_eq!(wizard.progress(), None);

        let Some((Job::Run(ActionRequest::Create { name, template, .. }), _)) = runner.last()
        else {
            panic!("expected a create job");
        };
        assert!(name.ends_with("-sleep-memory"));
        assert_eq!(template.as_deref(), Some("experiment"));

        deliver(
            &mut wizard,
            TaskPayload::ActionFinished(Ok(outcome(workspace.join(&name)))),
        );
        assert_eq!(wizard.step(), Step::Done);
        assert!(matches!(wizard.outcome(), Some(Ok(_))));
        assert_eq!(wizard.handle_key(KeyCode::Enter), WizardSignal::Exit);

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn default_row_sends_no_template_name() {
        let workspace = temp_dir();
        let (mut wizard, runner) = at_template_step(&workspace);
        wizard.handle_key(KeyCode::Enter);

        let Some((Job::Run(action), _)) = runner.last() else {
            panic!("expected a job");
        };
        assert_eq!(action.template(), None);

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn late_result_after_back_is_dropped() {
        let workspace = temp_dir();
        let (mut wizard, runner) = at_template_step(&workspace);
        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Working);
        let (_, issued_generation) = runner.last().unwrap();

        wizard.handle_key(KeyCode::Esc);
        assert_eq!(wizard.step(), Step::Template);
        assert!(wizard.generation() > issued_generation);

        wizard.handle_message(TaskMessage {
            generation: issued_generation,
            payload: TaskPayload::ActionFinished(Ok(outcome(workspace.clone()))),
        });
        assert_eq!(wizard.step(), Step::Template);
        assert!(wizard.outcome().is_none());

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn returning_to_template_step_while_loading_queues_one_load() {
        let workspace = temp_dir();
        let (mut wizard, runner) = init_wizard(Some(workspace.clone()));
        wizard.handle_key(KeyCode::Enter);
        wizard.handle_key(KeyCode::Enter);
        assert_eq!(runner.issued(), vec![(Job::LoadTemplates, 0)]);

        for _ in 0..2 {
            wizard.handle_key(KeyCode::Esc);
            assert_eq!(wizard.step(), Step::Purpose);
            wizard.handle_key(KeyCode::Enter);
            assert_eq!(wizard.step(), Step::Template);
            assert!(wizard.templates().loading);
        }
        assert_eq!(runner.issued().len(), 1);

        wizard.handle_message(TaskMessage {
            generation: 0,
            payload: TaskPayload::TemplatesLoaded(vec![Template::new("stale", "")]),
        });
        assert!(!wizard.templates().loaded);
        assert_eq!(
            runner.issued(),
            vec![(Job::LoadTemplates, 0), (Job::LoadTemplates, 2)]
        );

        deliver(
            &mut wizard,
            TaskPayload::TemplatesLoaded(vec![Template::new("experiment", "")]),
        );
        assert!(wizard.templates().loaded);
        assert_eq!(runner.issued().len(), 2);

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn escape_during_working_does_not_allow_a_second_run() {
        let workspace = temp_dir();
        let (mut wizard, runner) = at_template_step(&workspace);
        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Working);
        let (_, issued_generation) = runner.last().unwrap();

        wizard.handle_key(KeyCode::Esc);
        assert_eq!(wizard.step(), Step::Template);

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Template);
        assert_eq!(wizard.status(), Some(BUSY_STATUS));

        wizard.handle_key(KeyCode::Char('r'));
        assert_eq!(wizard.status(), Some(BUSY_STATUS));
        assert!(!wizard.templates().loading);

        let runs = |runner: &RecordingRunner| {
            runner
                .issued()
                .iter()
                .filter(|(job, _)| matches!(job, Job::Run(_)))
                .count()
        };
        assert_eq!(runs(&runner), 1);

        wizard.handle_message(TaskMessage {
            generation: issued_generation,
            payload: TaskPayload::ActionFinished(Err("interrupted".to_string())),
        });
        assert_eq!(wizard.step(), Step::Template);
        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Working);
        assert_eq!(runs(&runner), 2);

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn refresh_failure_keeps_list_and_sets_notice() {
        let workspace = temp_dir();
        let (mut wizard, runner) = at_template_step(&workspace);

        wizard.handle_key(KeyCode::Char('r'));
        assert_eq!(runner.last().map(|(job, _)| job), Some(Job::RefreshTemplates));
        assert!(wizard.templates().loading);

        deliver(
            &mut wizard,
            TaskPayload::TemplatesRefreshed(Err("offline".to_string())),
        );
        assert!(!wizard.templates().loading);
        assert_eq!(wizard.templates().len(), 2);
        assert_eq!(
            wizard.templates().notice.as_deref(),
            Some("Refresh failed: offline")
        );

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn collision_fails_before_working_and_only_back_leaves_done() {
        let workspace = temp_dir();
        let (mut wizard, runner) = at_template_step(&workspace);
        fs::create_dir(workspace.join(wizard.target_name().unwrap())).unwrap();
        let jobs_before = runner.issued().len();

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Done);
        assert_eq!(runner.issued().len(), jobs_before);
        assert!(matches!(wizard.outcome(), Some(Err(m)) if m.contains("already exists")));

        assert_eq!(wizard.handle_key(KeyCode::Enter), WizardSignal::Continue);
        assert_eq!(wizard.handle_key(KeyCode::Char('v')), WizardSignal::Continue);
        assert_eq!(wizard.step(), Step::Done);

        wizard.handle_key(KeyCode::Esc);
        assert_eq!(wizard.step(), Step::Template);
        assert!(wizard.outcome().is_none());

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn terminal_tool_requests_launch_of_plan_file() {
        let workspace = temp_dir();
        let project = workspace.join("p");
        fs::create_dir_all(project.join("plans")).unwrap();
        fs::write(project.join("plans/main-plan.md"), "# p").unwrap();

        let (mut wizard, _) = at_template_step(&workspace);
        wizard.handle_key(KeyCode::Enter);
        deliver(&mut wizard, TaskPayload::ActionFinished(Ok(outcome(project.clone()))));

        let WizardSignal::Launch(launch) = wizard.handle_key(KeyCode::Char('v')) else {
            panic!("expected a launch");
        };
        assert_eq!(launch.request.program, "vim");
        assert_eq!(launch.target, project.join("plans/main-plan.md"));
        assert_eq!(wizard.handle_key(KeyCode::Char('x')), WizardSignal::Continue);

        fs::remove_dir_all(workspace).ok();
    }

    #[test]
    fn escape_on_first_step_exits() {
        let (mut wizard, _) = init_wizard(None);
        assert_eq!(wizard.handle_key(KeyCode::Esc), WizardSignal::Exit);
    }

    #[test]
    fn first_directory_choice_is_remembered() {
        let home = temp_dir();
        let chosen = home.join("research");
        fs::create_dir(&chosen).unwrap();
        let store = ConfigStore::new(home.join("config.json"));

        let context = WizardContext {
            browse_start: home.clone(),
            store: Some(store.clone()),
            ..WizardContext::default()
        };
        let mut wizard = Wizard::new(Box::new(InitFlow), RecordingRunner::default(), context);

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Directory);
        assert!(wizard.status().is_some());

        wizard.handle_key(KeyCode::Char('b'));
        assert!(wizard.browser().is_some());
        wizard.handle_key(KeyCode::Right);
        wizard.handle_key(KeyCode::Enter);
        assert!(wizard.browser().is_none());
        assert_eq!(
            wizard.data().directory.as_deref(),
            Some(std::path::absolute(&chosen).unwrap().as_path())
        );

        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Purpose);
        let saved: Config = store.load().unwrap();
        assert!(saved.default_directory.unwrap().ends_with("research"));

        fs::remove_dir_all(home).ok();
    }

    #[test]
    fn adopt_starts_browsing_and_commits_source() {
        let workspace = temp_dir();
        let outside = temp_dir();
        fs::create_dir(outside.join("notes")).unwrap();

        let runner = RecordingRunner::default();
        let context = WizardContext {
            default_directory: Some(workspace.clone()),
            browse_start: outside.clone(),
            ..WizardContext::default()
        };
        let mut wizard = Wizard::new(Box::new(AdoptFlow), runner.clone(), context);
        assert_eq!(wizard.step(), Step::Source);
        assert!(wizard.browser().is_some());

        wizard.handle_key(KeyCode::Right);
        wizard.handle_key(KeyCode::Enter);
        assert_eq!(wizard.step(), Step::Template);
        assert_eq!(wizard.target_name().as_deref(), Some("notes"));
        assert_eq!(runner.last(), Some((Job::LoadTemplates, 0)));

        wizard.handle_key(KeyCode::Left);
        assert_eq!(wizard.step(), Step::Source);
        assert!(wizard.browser().unwrap().current().ends_with("notes"));

        fs::remove_dir_all(workspace).ok();
        fs::remove_dir_all(outside).ok();
    }
}
