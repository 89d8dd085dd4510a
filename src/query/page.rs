/// State of the agent demo page and the submission flow that drives it.
///
/// [`DemoPage`] holds what the browser page exposes to the submitter: the
/// query input, the agent checkboxes in page order, the submit button with
/// its text and loader, and the results section. Notices that the page
/// would `alert()` are collected in [`DemoPage::notices`].
///
/// A submission is split into [`DemoPage::begin_submission`] and
/// [`DemoPage::complete_submission`] so a caller can keep several in flight;
/// [`DemoPage::submit`] runs both around a single transport call.
use anyhow::Result;

use super::{Notice, QueryRequest, QueryResponse, Transport};
use crate::logging::log_event;
use crate::render::{render_error, render_results};

// ---------------------------------------------------------------------------
// Page parts
// ---------------------------------------------------------------------------

/// One `.agent-checkboxes` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCheckbox {
    pub value: String,
    pub checked: bool,
}

impl AgentCheckbox {
    pub fn new(value: impl Into<String>, checked: bool) -> Self {
        Self {
            value: value.into(),
            checked,
        }
    }
}

/// Identifies one submission. Only the most recent token is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelToken(u64);

/// The submit button, its label, and its loading spinner.
#[derive(Debug, Clone)]
pub struct SubmitControl {
    pub enabled: bool,
    pub text_visible: bool,
    pub loader_visible: bool,
    generation: u64,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            text_visible: true,
            loader_visible: false,
            generation: 0,
        }
    }
}

impl SubmitControl {
    /// Enter the busy state and issue a token that supersedes all earlier ones.
    fn begin(&mut self) -> CancelToken {
        self.generation += 1;
        self.enabled = false;
        self.text_visible = false;
        self.loader_visible = true;
        CancelToken(self.generation)
    }

    pub fn is_current(&self, token: CancelToken) -> bool {
        token.0 == self.generation
    }

    pub fn is_busy(&self) -> bool {
        !self.enabled
    }

    /// Leave the busy state if `token` still owns the control.
    fn finish(&mut self, token: CancelToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.enabled = true;
        self.text_visible = true;
        self.loader_visible = false;
        true
    }
}

/// Restores the submit control when dropped, including during unwinding.
struct FinishGuard<'a> {
    control: &'a mut SubmitControl,
    token: CancelToken,
}

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.control.finish(self.token);
    }
}

/// `#resultsSection` and its `#resultsContainer`.
#[derive(Debug, Clone, Default)]
pub struct ResultsSection {
    pub visible: bool,
    pub scrolled_into_view: bool,
    html: String,
}

impl ResultsSection {
    /// Current container markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Swap the container contents in one step.
    pub fn replace(&mut self, html: String) {
        self.html = html;
    }

    /// Show the section and bring it into view.
    pub fn reveal(&mut self) {
        self.visible = true;
        self.scrolled_into_view = true;
    }
}

/// A keyboard event in the query field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Enter with Ctrl (or Cmd) held submits; plain Enter is a newline.
    pub fn is_submit_shortcut(&self) -> bool {
        self.key == "Enter" && (self.ctrl || self.meta)
    }
}

/// A submission that has been started but not completed.
#[derive(Debug)]
pub struct Submission {
    pub request: QueryRequest,
    pub token: CancelToken,
}

/// How a completed submission ended up on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Agent results were rendered.
    Rendered,
    /// The server answered with a non-success status.
    ServerError,
    /// The request or response decoding failed.
    TransportError,
    /// A newer submission started first; nothing was rendered.
    Stale,
}

// ---------------------------------------------------------------------------
// Demo page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DemoPage {
    pub query_input: String,
    pub checkboxes: Vec<AgentCheckbox>,
    pub control: SubmitControl,
    pub results: ResultsSection,
    pub notices: Vec<Notice>,
}

impl DemoPage {
    /// A page with one checkbox per agent, all unchecked.
    pub fn with_agents<I, S>(agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            checkboxes: agents
                .into_iter()
                .map(|value| AgentCheckbox::new(value, false))
                .collect(),
            ..Self::default()
        }
    }

    /// Check or uncheck the checkbox with `value`. Returns `false` if the
    /// page has no such checkbox.
    pub fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        match self.checkboxes.iter_mut().find(|cb| cb.value == value) {
            Some(cb) => {
                cb.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Values of the checked agents, in page order.
    pub fn selected_agents(&self) -> Vec<String> {
        self.checkboxes
            .iter()
            .filter(|cb| cb.checked)
            .map(|cb| cb.value.clone())
            .collect()
    }

    /// Read the form into a request, or the notice that blocks it.
    pub fn build_request(&self) -> Result<QueryRequest, Notice> {
        let query = self.query_input.trim();
        if query.is_empty() {
            return Err(Notice::EmptyQuery);
        }

        let agents = self.selected_agents();
        if agents.is_empty() {
            return Err(Notice::NoAgents);
        }

        Ok(QueryRequest {
            query: query.to_string(),
            agents,
        })
    }

    /// Validate the form and put the submit control into its busy state.
    ///
    /// On a validation failure the notice is recorded on the page, the
    /// control is untouched, and no submission exists.
    pub fn begin_submission(&mut self) -> Result<Submission, Notice> {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(notice) => {
                self.notices.push(notice);
                return Err(notice);
            }
        };

        let token = self.control.begin();
        log_event(
            "query",
            &format!(
                "submission {} started agents={}",
                token.0,
                request.agents.join(",")
            ),
        );

        Ok(Submission { request, token })
    }

    /// Apply the result of a submission to the page.
    ///
    /// Superseded submissions are dropped without touching the page. For the
    /// current one, the results or an error panel replace the container, the
    /// section is revealed, and the submit control is restored.
    pub fn complete_submission(
        &mut self,
        submission: Submission,
        response: Result<QueryResponse>,
    ) -> Outcome {
        let token = submission.token;
        if !self.control.is_current(token) {
            log_event("query", &format!("submission {} superseded, dropped", token.0));
            return Outcome::Stale;
        }

        let (html, outcome) = match response {
            Ok(response) if response.is_success() => {
                (render_results(&response.results), Outcome::Rendered)
            }
            Ok(response) => {
                log_event(
                    "query",
                    &format!("server error: {}", response.error_message()),
                );
                (render_error(response.error_message()), Outcome::ServerError)
            }
            Err(err) => {
                log_event("query", &format!("transport error: {err:#}"));
                let message = format!("Failed to communicate with server: {err:#}");
                (render_error(&message), Outcome::TransportError)
            }
        };

        self.results.replace(html);
        self.results.reveal();
        self.control.finish(token);
        log_event("query", &format!("submission {} finished {outcome:?}", token.0));

        outcome
    }

    /// Run one full submission: validate, send exactly one request, render.
    ///
    /// The submit control is restored on every path, including a panic
    /// inside the transport.
    pub fn submit<T: Transport + ?Sized>(&mut self, transport: &T) -> Result<Outcome, Notice> {
        let submission = self.begin_submission()?;

        let response = {
            let _guard = FinishGuard {
                control: &mut self.control,
                token: submission.token,
            };
            transport.send(&submission.request)
        };

        Ok(self.complete_submission(submission, response))
    }

    /// Keyboard handler for the query field. Returns `None` when the key
    /// isn't the submit shortcut.
    pub fn handle_key<T: Transport + ?Sized>(
        &mut self,
        key: &KeyPress,
        transport: &T,
    ) -> Option<Result<Outcome, Notice>> {
        key.is_submit_shortcut().then(|| self.submit(transport))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
