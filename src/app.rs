//! Application state and core logic

use crate::api::{ApiClient, ApiClientTrait, SUBMIT_FAILED_MESSAGE};
use crate::config::TuiConfig;
use crate::error::ApiError;
use crate::state::{
    AccessError, AdminTab, Advance, AppState, DeleteTarget, EditorForm, EditorSave, Form,
    FormScope, FormSession, LoginForm, PortfolioForm, QuestionCatalog, QuestionForm, Role,
    Session, SubmissionRequest, UserForm, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Second Ctrl+C within this window quits
const QUIT_WINDOW: Duration = Duration::from_secs(1);

const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Results of background work, delivered to the event loop
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded {
        form_id: u64,
        catalog: QuestionCatalog,
    },
    SubmitFinished {
        form_id: u64,
        result: Result<(), String>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Portfolio server
    pub api: Arc<dyn ApiClientTrait>,
    pub config: TuiConfig,
    /// Authentication context for the admin views
    pub session: Session,
    pub login_form: LoginForm,
    /// Admin view a successful sign-in continues to
    after_login: View,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    next_form_id: u64,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App connected to the configured server
    pub async fn new(config: TuiConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api_url(), config.request_timeout())?;
        info!("Using portfolio server at {}", api.base_url());

        let mut app = Self::with_client(Arc::new(api), config);
        app.refresh_portfolios().await;

        if let Some(slug) = app.config.default_portfolio.clone() {
            app.open_portfolio_by_slug(&slug).await;
        }

        Ok(app)
    }

    /// Create an App around any API implementation
    pub fn with_client(api: Arc<dyn ApiClientTrait>, config: TuiConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            config,
            session: Session::default(),
            login_form: LoginForm::new(),
            after_login: View::Submissions,
            events_tx,
            events_rx,
            next_form_id: 0,
            quit: false,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// First Ctrl+C arms, a second one within [`QUIT_WINDOW`] quits
    pub fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(previous) if now.duration_since(previous) <= QUIT_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.state.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to the last non-form view
    pub fn go_back(&mut self) {
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            return;
        }
        self.state.current_view = View::Portfolios;
    }

    /// Reload the home list; failures leave it empty
    pub async fn refresh_portfolios(&mut self) {
        match self.api.list_portfolios().await {
            Ok(portfolios) => {
                info!(count = portfolios.len(), "Loaded portfolios");
                self.state.api_connected = true;
                self.state.set_portfolios(portfolios);
            }
            Err(e) => {
                warn!("Failed to load portfolios: {e}");
                self.state.api_connected = false;
                self.state.set_portfolios(Vec::new());
            }
        }
    }

    /// Start a form session; the catalog arrives as an [`AppEvent`]
    pub fn open_form(&mut self, scope: FormScope) {
        self.next_form_id += 1;
        let form_id = self.next_form_id;
        info!(form_id, form = scope.title(), "Opening form");

        self.state.form = Some(FormSession::new(form_id, scope.clone()));
        self.navigate(View::Form);

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let catalog = QuestionCatalog::load(api.as_ref(), scope.portfolio_id()).await;
            // A closed channel means the app is shutting down
            let _ = tx.send(AppEvent::CatalogLoaded { form_id, catalog });
        });
    }

    /// Resolve a portfolio by slug and open its form
    pub async fn open_portfolio_by_slug(&mut self, slug: &str) {
        match self.api.get_portfolio(slug).await {
            Ok(Some(portfolio)) => self.open_form(FormScope::Portfolio(portfolio)),
            Ok(None) => {
                warn!(slug, "Portfolio not found");
                self.push_error(format!("Portfolio \"{slug}\" was not found."));
            }
            Err(e) => {
                warn!(slug, "Failed to look up portfolio: {e}");
                self.push_error(format!("Could not load portfolio: {e}"));
            }
        }
    }

    /// Abandon the form session; results still in flight are ignored
    pub fn close_form(&mut self) {
        if let Some(form) = self.state.form.take() {
            debug!(form_id = form.id, "Closing form session");
        }
        self.go_back();
    }

    fn active_form_mut(&mut self, form_id: u64) -> Option<&mut FormSession> {
        self.state.form.as_mut().filter(|f| f.id == form_id)
    }

    /// Next step, or submit from the last one
    pub fn advance_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        let form_id = form.id;
        let Some(navigator) = form.navigator_mut() else {
            return;
        };

        match navigator.advance() {
            Advance::Moved(step) => {
                debug!(form_id, step, "Moved to step");
                form.reset_focus();
            }
            Advance::Invalid => debug!(form_id, "Step has missing answers"),
            Advance::Submit(request) => self.spawn_submit(form_id, request),
            Advance::Rejected(reason) => debug!(form_id, "Submission not started: {reason}"),
        }
    }

    /// Previous step
    pub fn retreat_form(&mut self) {
        if let Some(form) = self.state.form.as_mut() {
            if form.navigator_mut().is_some_and(|n| n.retreat()) {
                form.reset_focus();
            }
        }
    }

    fn spawn_submit(&self, form_id: u64, request: SubmissionRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api
                .submit(request)
                .await
                .map_err(|e| submit_failure_message(&e));
            let _ = tx.send(AppEvent::SubmitFinished { form_id, result });
        });
    }

    /// Apply a background result to the session it belongs to
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded { form_id, catalog } => match self.active_form_mut(form_id) {
                Some(form) => {
                    debug!(form_id, questions = catalog.len(), "Catalog ready");
                    form.catalog_loaded(catalog);
                }
                None => debug!(form_id, "Discarding catalog of a closed form"),
            },
            AppEvent::SubmitFinished { form_id, result } => {
                let Some(navigator) = self
                    .active_form_mut(form_id)
                    .and_then(|f| f.navigator_mut())
                else {
                    debug!(form_id, "Discarding submission result of a closed form");
                    return;
                };

                match navigator.finish_submit(result) {
                    Ok(()) => {
                        self.state.form = None;
                        self.navigate(View::Complete);
                    }
                    Err(message) => self.push_error(message),
                }
            }
        }
    }

    /// Drain background results without blocking
    pub fn process_pending_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for one background result and apply it
    #[cfg(test)]
    pub async fn process_next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }

    /// Admin entry: guard on the session, then verify it with the server
    pub async fn enter_review(&mut self) {
        let token = match self.session.require_admin() {
            Ok(credential) => credential.token.clone(),
            Err(e) => {
                self.access_denied(e, View::Submissions);
                return;
            }
        };
        if !self
            .verify_with_server(&token, Role::is_admin, AccessError::Forbidden)
            .await
        {
            return;
        }

        self.state.submissions_index = 0;
        self.navigate(View::Submissions);
        self.load_submissions().await;
    }

    /// Builder entry, for super administrators only
    pub async fn enter_builder(&mut self) {
        let token = match self.session.require_super_admin() {
            Ok(credential) => credential.token.clone(),
            Err(e) => {
                self.access_denied(e, View::Builder);
                return;
            }
        };
        if !self
            .verify_with_server(
                &token,
                Role::is_super_admin,
                AccessError::SuperAdminRequired,
            )
            .await
        {
            return;
        }

        self.state.admin.selected_index = 0;
        self.navigate(View::Builder);
        self.load_builder().await;
    }

    /// Signed-out users are sent to login, others get a notice
    fn access_denied(&mut self, error: AccessError, target: View) {
        if error == AccessError::NotSignedIn {
            self.after_login = target;
            self.navigate(View::Login);
        } else {
            self.push_error(error.to_string());
        }
    }

    /// Re-check the credential before an admin view opens
    async fn verify_with_server(
        &mut self,
        token: &str,
        allowed: fn(&Role) -> bool,
        denied: AccessError,
    ) -> bool {
        match self.api.verify_token(token).await {
            Ok(Some(claims)) if allowed(&claims.role) => true,
            Ok(Some(_)) => {
                self.push_error(denied.to_string());
                false
            }
            Ok(None) => {
                self.expire_session();
                false
            }
            Err(e) => {
                warn!("Failed to verify credential: {e}");
                self.push_error(format!("Could not verify your session: {e}"));
                false
            }
        }
    }

    fn expire_session(&mut self) {
        self.after_login = match self.state.current_view {
            View::Builder | View::BuilderEditor => View::Builder,
            _ => View::Submissions,
        };
        self.session.sign_out();
        self.state.submissions.clear();
        self.state.admin.clear();
        self.push_error(SESSION_EXPIRED);
        self.state.current_view = View::Login;
    }

    /// Reload the review list with the current filter
    pub async fn load_submissions(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };

        match self
            .api
            .list_submissions(&token, self.state.submission_filter.clone())
            .await
        {
            Ok(submissions) => {
                info!(count = submissions.len(), "Loaded submissions");
                self.state.submissions = submissions;
                let max = self.state.submissions.len().saturating_sub(1);
                self.state.submissions_index = self.state.submissions_index.min(max);
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Submissions rejected the credential: {e}");
                self.expire_session();
            }
            Err(e) => {
                warn!("Failed to load submissions: {e}");
                self.push_error(format!("Could not load submissions: {e}"));
            }
        }
    }

    pub fn logout(&mut self) {
        if !self.session.is_signed_in() {
            return;
        }
        self.session.sign_out();
        self.state.submissions.clear();
        self.state.review_questions.clear();
        self.state.admin.clear();
        self.state.view_history.clear();
        self.state.current_view = View::Portfolios;
        self.state.status_message = Some("Signed out".to_string());
    }

    /// Reload every builder tab; portfolio changes also refresh the home list
    pub async fn load_builder(&mut self) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };

        match self.api.list_portfolios().await {
            Ok(portfolios) => {
                info!(count = portfolios.len(), "Loaded portfolios for the builder");
                self.state.api_connected = true;
                self.state.admin.set_portfolios(portfolios.clone());
                self.state.set_portfolios(portfolios);
            }
            Err(e) => {
                warn!("Failed to load portfolios: {e}");
                self.push_error(format!("Could not load portfolios: {e}"));
            }
        }

        match self.api.list_users(&token).await {
            Ok(users) => self.state.admin.set_users(users),
            Err(e) if e.is_unauthorized() => {
                warn!("Users listing rejected the credential: {e}");
                self.expire_session();
                return;
            }
            Err(e) => {
                warn!("Failed to load users: {e}");
                self.push_error(format!("Could not load users: {e}"));
            }
        }

        self.load_builder_questions().await;
    }

    /// Questions of the portfolio picked on the questions tab
    pub async fn load_builder_questions(&mut self) {
        let Some(portfolio_id) = self.state.admin.question_portfolio.clone() else {
            self.state.admin.set_questions(Vec::new());
            return;
        };

        match self.api.list_questions(Some(portfolio_id)).await {
            Ok(questions) => self.state.admin.set_questions(questions),
            Err(e) => {
                warn!("Failed to load questions: {e}");
                self.push_error(format!("Could not load questions: {e}"));
            }
        }
    }

    fn open_editor(&mut self, editor: EditorForm) {
        debug!(editor = editor.title(), "Opening editor");
        self.state.admin.editor = Some(editor);
        self.navigate(View::BuilderEditor);
    }

    /// Blank editor for the current tab
    fn new_record(&mut self) {
        let editor = match self.state.admin.tab {
            AdminTab::Portfolios => EditorForm::Portfolio(PortfolioForm::new()),
            AdminTab::Questions => match &self.state.admin.question_portfolio {
                Some(id) => EditorForm::Question(QuestionForm::new(id)),
                None => {
                    self.push_error("Create a portfolio before adding questions.");
                    return;
                }
            },
            AdminTab::Users => EditorForm::User(UserForm::new()),
        };
        self.open_editor(editor);
    }

    /// Editor prefilled from the selected row; users cannot be edited
    fn edit_selected(&mut self) {
        let admin = &self.state.admin;
        let editor = if let Some(portfolio) = admin.selected_portfolio() {
            EditorForm::Portfolio(PortfolioForm::from_portfolio(portfolio))
        } else if let Some(question) = admin.selected_question() {
            let scope = admin.question_portfolio.as_deref().unwrap_or_default();
            EditorForm::Question(QuestionForm::from_question(question, scope))
        } else {
            return;
        };
        self.open_editor(editor);
    }

    /// Validate the open editor and send it; the editor stays open on failure
    pub async fn save_editor(&mut self) {
        let Some(editor) = self.state.admin.editor.as_ref() else {
            return;
        };
        let save = match editor.save_request() {
            Ok(save) => save,
            Err(message) => {
                self.push_error(message);
                return;
            }
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            self.expire_session();
            return;
        };

        let (result, done) = match save {
            EditorSave::CreatePortfolio(draft) => (
                self.api.create_portfolio(&token, draft).await,
                "Portfolio created",
            ),
            EditorSave::UpdatePortfolio(id, draft) => (
                self.api.update_portfolio(&token, id, draft).await,
                "Portfolio updated",
            ),
            EditorSave::CreateQuestion(draft) => (
                self.api.create_question(&token, draft).await,
                "Question created",
            ),
            EditorSave::UpdateQuestion(id, draft) => (
                self.api.update_question(&token, id, draft).await,
                "Question updated",
            ),
            EditorSave::CreateUser(user) => {
                (self.api.create_user(&token, user).await, "User created")
            }
        };

        match result {
            Ok(()) => {
                info!("{done}");
                self.state.admin.editor = None;
                self.go_back();
                self.load_builder().await;
                self.state.status_message = Some(done.to_string());
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Save rejected the credential: {e}");
                self.expire_session();
            }
            Err(e) => {
                warn!("Save failed: {e}");
                self.push_error(e.to_string());
            }
        }
    }

    /// Delete the record waiting for confirmation
    pub async fn confirm_delete(&mut self) {
        let Some(target) = self.state.admin.pending_delete.take() else {
            return;
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            self.expire_session();
            return;
        };

        let result = match &target {
            DeleteTarget::Portfolio { id, .. } => self.api.delete_portfolio(&token, id).await,
            DeleteTarget::Question { id, .. } => self.api.delete_question(&token, id).await,
        };

        match result {
            Ok(()) => {
                info!(title = target.title(), "Deleted");
                self.load_builder().await;
                self.state.status_message = Some(format!("Deleted \"{}\"", target.title()));
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Delete rejected the credential: {e}");
                self.expire_session();
            }
            Err(e) => {
                warn!("Delete failed: {e}");
                self.push_error(e.to_string());
            }
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;

        match self.state.current_view {
            View::Portfolios => self.handle_portfolios_key(key).await,
            View::Form => self.handle_form_key(key),
            View::Complete => self.handle_complete_key(key),
            View::Login => self.handle_login_key(key).await,
            View::Submissions => self.handle_submissions_key(key).await,
            View::SubmissionDetail => self.handle_submission_detail_key(key),
            View::Builder => self.handle_builder_key(key).await,
            View::BuilderEditor => self.handle_builder_editor_key(key).await,
        }

        Ok(())
    }

    /// Handle keys in the home list
    async fn handle_portfolios_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.home_entry_count();
                self.state.move_selection_down(max);
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter => {
                let scope = match self.state.selected_portfolio() {
                    Some(portfolio) => FormScope::Portfolio(portfolio.clone()),
                    None => FormScope::Global,
                };
                self.open_form(scope);
            }
            KeyCode::Char('r') => self.refresh_portfolios().await,
            KeyCode::Char('a') => self.enter_review().await,
            KeyCode::Char('b') => self.enter_builder().await,
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys while filling out a form
    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.close_form();
            return;
        }

        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        // Nothing to fill in until questions exist
        if form.navigator().is_none_or(|n| n.catalog().is_empty()) {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('n') if ctrl => self.advance_form(),
            KeyCode::Char('p') if ctrl => self.retreat_form(),
            KeyCode::PageDown => self.advance_form(),
            KeyCode::PageUp => self.retreat_form(),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Enter => form.input_char('\n'),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if !ctrl => form.input_char(c),
            _ => {}
        }
    }

    fn handle_complete_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.go_back();
        }
    }

    /// Handle keys in the sign-in form
    async fn handle_login_key(&mut self, key: KeyEvent) {
        if self.login_form.pending {
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.login_form.clear_password();
                self.go_back();
            }
            KeyCode::Tab | KeyCode::Down => self.login_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.login_form.prev_field(),
            KeyCode::Enter if self.login_form.active_field() == 0 => self.login_form.next_field(),
            KeyCode::Enter => self.submit_login().await,
            KeyCode::Backspace => self.login_form.get_active_field_mut().pop_char(),
            KeyCode::Char(c) => self.login_form.get_active_field_mut().push_char(c),
            _ => {}
        }
    }

    async fn submit_login(&mut self) {
        if !self.login_form.is_complete() {
            self.push_error("Enter your email and password.");
            return;
        }

        self.login_form.pending = true;
        let result = self
            .api
            .login(
                self.login_form.email.as_text().trim(),
                self.login_form.password.as_text(),
            )
            .await;
        self.login_form.pending = false;
        self.login_form.clear_password();

        match result {
            Ok(login) => {
                self.session.sign_in(login.token, login.user);
                match self.after_login {
                    View::Builder => self.enter_builder().await,
                    _ => self.enter_review().await,
                }
            }
            Err(e) => {
                warn!("Sign-in failed: {e}");
                self.push_error(e.to_string());
            }
        }
    }

    /// Handle keys in the submissions list
    async fn handle_submissions_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.submissions.len();
                if max > 0 && self.state.submissions_index < max - 1 {
                    self.state.submissions_index += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.submissions_index = self.state.submissions_index.saturating_sub(1);
            }
            KeyCode::Enter => self.open_submission_detail().await,
            KeyCode::Char('f') => {
                self.state.cycle_submission_filter();
                self.state.submissions_index = 0;
                self.load_submissions().await;
            }
            KeyCode::Char('r') => self.load_submissions().await,
            KeyCode::Char('b') => self.enter_builder().await,
            KeyCode::Char('o') => self.logout(),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Show one submission, labelling answers with question titles when possible
    async fn open_submission_detail(&mut self) {
        let Some(submission) = self.state.selected_submission() else {
            return;
        };
        let portfolio_id = submission.portfolio_id.clone();

        self.state.review_questions = match self.api.list_questions(portfolio_id).await {
            Ok(questions) => questions,
            Err(e) => {
                warn!("Failed to load questions for submission: {e}");
                Vec::new()
            }
        };
        self.state.scroll_offset = 0;
        self.navigate(View::SubmissionDetail);
    }

    fn handle_submission_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_offset += 1,
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.scroll_offset = self.state.scroll_offset.saturating_sub(1);
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Handle keys in the builder tabs, or the delete confirmation over them
    async fn handle_builder_key(&mut self, key: KeyEvent) {
        if self.state.admin.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') => self.confirm_delete().await,
                KeyCode::Char('n') | KeyCode::Esc => self.state.admin.pending_delete = None,
                _ => {}
            }
            return;
        }

        let admin = &mut self.state.admin;
        match key.code {
            KeyCode::Tab => admin.switch_tab(admin.tab.next()),
            KeyCode::BackTab => admin.switch_tab(admin.tab.prev()),
            KeyCode::Char('1') => admin.switch_tab(AdminTab::Portfolios),
            KeyCode::Char('2') => admin.switch_tab(AdminTab::Questions),
            KeyCode::Char('3') => admin.switch_tab(AdminTab::Users),
            KeyCode::Down | KeyCode::Char('j') => admin.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => admin.move_selection_up(),
            KeyCode::Char('p') if admin.tab == AdminTab::Questions => {
                admin.cycle_question_portfolio();
                self.load_builder_questions().await;
            }
            KeyCode::Char('n') => self.new_record(),
            KeyCode::Enter | KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Char('d') => admin.pending_delete = admin.delete_target(),
            KeyCode::Char('r') => self.load_builder().await,
            KeyCode::Char('o') => self.logout(),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    /// Handle keys in a builder editor
    async fn handle_builder_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.state.admin.editor.as_mut() else {
            self.go_back();
            return;
        };

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.state.admin.editor = None;
                self.go_back();
            }
            KeyCode::Char('s') if ctrl => self.save_editor().await,
            KeyCode::Enter if editor.is_last_field() => self.save_editor().await,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => editor.next_field(),
            KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Char(c) if !ctrl => editor.input_char(c),
            _ => {}
        }
    }
}

/// Server message for a rejected submission, a fixed notice for anything else
fn submit_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { message, .. } => message.clone(),
        other => {
            warn!("Submission did not reach the server: {other}");
            SUBMIT_FAILED_MESSAGE.to_string()
        }
    }
}
