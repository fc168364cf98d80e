use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::KeyCode;
use tracing::{debug, info};
use tui::{backend::Backend, Frame};

use crate::config::Config;
use crate::services::{BaseUrlLinks, Notification, Notifier, ProjectSource, ShareLinks};
use crate::store::ProjectStore;
use crate::ui::{
    components::toast::{render_toasts, ToastQueue},
    project_detail::{self, render_project_detail, DetailAction, ProjectDetailState},
    project_wizard::{self, render_project_wizard, ProjectWizardAction, ProjectWizardState},
    status_panel::{self, render_status_panel, PanelAction, StatusPanelState},
};

// Represents the current screen in the app
pub enum AppScreen {
    StatusPanel,
    ProjectWizard,
    ProjectDetail, // Detail state carries the project_id
}

// Main application state
pub struct AppState {
    store: ProjectStore,
    actor: String,
    links: Box<dyn ShareLinks>,
    toasts: ToastQueue,
    screen: AppScreen,
    panel_state: StatusPanelState,
    wizard_state: Option<ProjectWizardState>,
    detail_state: Option<ProjectDetailState>,
}

impl AppState {
    pub fn new(config: &Config, store: ProjectStore) -> Self {
        let panel_state = StatusPanelState::new(store.get_all().len());

        Self {
            store,
            actor: config.actor.clone(),
            links: Box::new(BaseUrlLinks::new(config.share_base_url.clone())),
            toasts: ToastQueue::new(Duration::from_secs(config.toast_seconds)),
            screen: AppScreen::StatusPanel,
            panel_state,
            wizard_state: None,
            detail_state: None,
        }
    }

    pub fn open_detail(&mut self, project_id: u32) {
        debug!(project_id, "opening project detail");
        self.detail_state = Some(ProjectDetailState::new(project_id));
        self.screen = AppScreen::ProjectDetail;
    }

    fn open_panel(&mut self) {
        self.wizard_state = None;
        self.detail_state = None;
        self.screen = AppScreen::StatusPanel;
    }

    /// Expires stale notifications. Called once per loop iteration.
    pub fn tick(&mut self) {
        self.toasts.prune(Instant::now());
    }

    pub fn render<B: Backend>(&mut self, frame: &mut Frame<B>) {
        let now = Utc::now();
        match self.screen {
            AppScreen::StatusPanel => {
                render_status_panel(frame, &mut self.panel_state, self.store.get_all(), now);
            }
            AppScreen::ProjectWizard => {
                if let Some(state) = &self.wizard_state {
                    render_project_wizard(frame, state);
                }
            }
            AppScreen::ProjectDetail => {
                if let Some(state) = &self.detail_state {
                    let project = self.store.fetch_project(state.project_id());
                    render_project_detail(frame, state, project.as_ref(), now);
                }
            }
        }
        render_toasts(frame, &self.toasts);
    }

    /// Routes a key press to the current screen. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.screen {
            AppScreen::StatusPanel => self.handle_panel_key(key),
            AppScreen::ProjectWizard => {
                self.handle_wizard_key(key);
                false
            }
            AppScreen::ProjectDetail => {
                self.handle_detail_key(key);
                false
            }
        }
    }

    fn handle_panel_key(&mut self, key: KeyCode) -> bool {
        let action = status_panel::handle_key(&mut self.panel_state, self.store.get_all(), key);
        match action {
            Some(PanelAction::Quit) => return true,
            Some(PanelAction::NewProject) => {
                self.wizard_state = Some(ProjectWizardState::new(chrono::Local::now().date_naive()));
                self.screen = AppScreen::ProjectWizard;
            }
            Some(PanelAction::CopyLink(project_id)) => {
                let link = self.links.share_url(project_id);
                info!(project_id, %link, "project link shared");
                self.toasts.notify(Notification::normal("Link copied!", link));
            }
            Some(PanelAction::OpenDetail(project_id)) => self.open_detail(project_id),
            Some(PanelAction::SetStatus {
                project_id,
                step_index,
                status,
            }) => {
                if let Err(violation) =
                    self.store
                        .update_step_status(&self.actor, project_id, step_index, status)
                {
                    self.toasts.notify(Notification::destructive(
                        format!("{} not changed", violation.step_name),
                        violation.to_string(),
                    ));
                }
            }
            None => {}
        }
        false
    }

    fn handle_wizard_key(&mut self, key: KeyCode) {
        let Some(state) = &mut self.wizard_state else {
            self.open_panel();
            return;
        };

        match project_wizard::handle_key(state, key) {
            Some(ProjectWizardAction::Cancel) => self.open_panel(),
            Some(ProjectWizardAction::Save(fields)) => {
                self.store.add_project(&self.actor, fields);
                self.panel_state.select_last(self.store.get_all().len());
                self.open_panel();
            }
            None => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyCode) {
        let Some(state) = &mut self.detail_state else {
            self.open_panel();
            return;
        };

        match project_detail::handle_key(state, key) {
            Some(DetailAction::Back) => self.open_panel(),
            Some(DetailAction::SubmitComment(text)) => {
                let project_id = state.project_id();
                self.store.add_comment(&self.actor, project_id, &text);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StepStatus;
    use crate::services::Severity;

    fn config() -> Config {
        Config {
            actor: "Tester".to_string(),
            share_base_url: "http://shop.local".to_string(),
            steps: vec!["Cut".into(), "Polish".into(), "Transport".into(), "Install".into()],
            fixtures: true,
            log_file: "test.log".into(),
            toast_seconds: 4,
        }
    }

    fn app() -> AppState {
        let config = config();
        let store = ProjectStore::with_fixtures(config.steps.clone());
        AppState::new(&config, store)
    }

    fn press(app: &mut AppState, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key);
        }
    }

    fn statuses(app: &AppState, id: u32) -> Vec<StepStatus> {
        app.store
            .get_by_id(id)
            .unwrap()
            .steps
            .iter()
            .map(|s| s.status)
            .collect()
    }

    #[test]
    fn test_rejected_transition_shows_destructive_toast() {
        let mut app = app();
        // Project 1: Cut completed, everything else pending. Transport needs Polish first.
        press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Char('i')]);

        assert_eq!(statuses(&app, 1)[2], StepStatus::Pending);
        let toast = app.toasts.visible().next().unwrap();
        assert_eq!(toast.severity, Severity::Destructive);
        assert_eq!(
            toast.text,
            "cannot mark Transport as In progress: prior steps incomplete"
        );
        assert_eq!(toast.title, "Transport not changed");
    }

    #[test]
    fn test_allowed_transition_records_actor() {
        let mut app = app();
        press(&mut app, &[KeyCode::Right, KeyCode::Char('c')]);

        assert_eq!(statuses(&app, 1)[1], StepStatus::Completed);
        let project = app.store.get_by_id(1).unwrap();
        assert_eq!(project.last_update.user, "Tester");
        assert!(app.toasts.visible().next().is_none());
    }

    #[test]
    fn test_copy_link_notifies() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Char('l')]);

        let toast = app.toasts.visible().next().unwrap();
        assert_eq!(toast.severity, Severity::Normal);
        assert_eq!(toast.text, "http://shop.local/projects/2");
    }

    #[test]
    fn test_create_project_through_wizard() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('n'), KeyCode::Enter]);
        press(&mut app, &"Ana".chars().map(KeyCode::Char).collect::<Vec<_>>());
        press(&mut app, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
        press(&mut app, &"Onyx".chars().map(KeyCode::Char).collect::<Vec<_>>());
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('s')]);

        assert!(matches!(app.screen, AppScreen::StatusPanel));
        let project = app.store.get_by_id(3).unwrap();
        assert_eq!(project.client_name, "Ana");
        assert_eq!(project.stone_type, "Onyx");
        assert_eq!(project.last_update.action, "created the project");

        // The new card is selected, so its first step can be started right away.
        press(&mut app, &[KeyCode::Char('i')]);
        assert_eq!(statuses(&app, 3)[0], StepStatus::InProgress);
    }

    #[test]
    fn test_detail_comment_round_trip() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('v'), KeyCode::Char('a')]);
        press(&mut app, &"Slab arrived".chars().map(KeyCode::Char).collect::<Vec<_>>());
        press(&mut app, &[KeyCode::Enter]);

        let project = app.store.get_by_id(1).unwrap();
        let last = project.comments.iter().last().unwrap();
        assert_eq!(last.text, "Slab arrived");
        assert_eq!(last.user, "Tester");

        press(&mut app, &[KeyCode::Esc]);
        assert!(matches!(app.screen, AppScreen::StatusPanel));
    }

    #[test]
    fn test_quit_from_panel() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
