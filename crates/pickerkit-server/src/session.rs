//! Per-session picker state.
//!
//! Each rendered picker keeps its configuration, metadata model and current
//! value between requests. The [`SessionRegistry`] stores them keyed by
//! session id and client id.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};
use pickerkit_core::{DateMetadataModel, DatePattern, DateWindow, Locale, Selection};
use pickerkit_protocol::{DateMetadataResponse, ViewChangeRequest, encode_date_metadata};
use pickerkit_render::{
    DatePickerRenderer, HostComponent, PickerConfig, RenderContext, RenderedWidget,
};
use tracing::{debug, info, trace, warn};

use crate::error::{ServerError, ServerResult};

/// A metadata model owned by a session.
pub type BoxedModel = Box<dyn DateMetadataModel>;

/// Identifies one picker within one user session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub session_id: String,
    pub client_id: String,
}

impl SessionKey {
    pub fn new(session_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            client_id: client_id.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.session_id, self.client_id)
    }
}

/// Progress of the visible window refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowState {
    /// No window loaded.
    #[default]
    Idle,
    /// Metadata for the window is being loaded.
    Loading(DateWindow),
    /// Metadata for the window is loaded and encoded.
    Ready(DateWindow),
}

impl WindowState {
    /// Returns the window whose metadata is loaded.
    pub fn ready_window(&self) -> Option<&DateWindow> {
        match self {
            Self::Ready(window) => Some(window),
            _ => None,
        }
    }
}

/// State of one picker.
pub struct PickerSession {
    client_id: String,
    config: PickerConfig,
    widget_pattern: DatePattern,
    locale: Locale,
    model: Option<BoxedModel>,
    state: WindowState,
    value: Selection,
    submitted: Option<String>,
    conversion_failed: bool,
    created_at: DateTime<Utc>,
    last_access: DateTime<Utc>,
}

impl PickerSession {
    /// Creates the state for a picker.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        client_id: impl Into<String>,
        config: PickerConfig,
        model: Option<BoxedModel>,
    ) -> ServerResult<Self> {
        let (widget_pattern, locale) = {
            let renderer = DatePickerRenderer::new(&config)?;
            (renderer.widget_pattern().clone(), renderer.locale())
        };
        let now = Utc::now();
        Ok(Self {
            client_id: client_id.into(),
            config,
            widget_pattern,
            locale,
            model,
            state: WindowState::Idle,
            value: Selection::Empty,
            submitted: None,
            conversion_failed: false,
            created_at: now,
            last_access: now,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&dyn DateMetadataModel> {
        self.model.as_deref()
    }

    /// Returns `true` if the picker has a lazily loaded model.
    pub fn is_lazy(&self) -> bool {
        self.model.as_ref().is_some_and(|m| m.is_lazy())
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    /// Returns the last successfully converted value.
    pub fn value(&self) -> &Selection {
        &self.value
    }

    /// Returns `true` if the last submission could not be converted.
    pub fn conversion_failed(&self) -> bool {
        self.conversion_failed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_access(&self) -> DateTime<Utc> {
        self.last_access
    }

    /// Replaces the current value.
    pub fn set_value(&mut self, value: Selection) {
        self.value = value;
        self.submitted = None;
        self.conversion_failed = false;
    }

    /// Loads and encodes the metadata of the window a view change asks for.
    ///
    /// The model is cleared before loading. When loading fails the session
    /// returns to [`WindowState::Idle`] and the model stays empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the picker has no lazy model, the requested window
    /// is invalid, or the metadata source fails.
    pub fn view_change(&mut self, request: ViewChangeRequest) -> ServerResult<DateMetadataResponse> {
        // Eager metadata ships with the rendered widget, so only lazy models
        // answer view changes; anything else is NotLazy rather than a render.
        let Some(model) = self.model.as_mut().filter(|m| m.is_lazy()) else {
            return Err(ServerError::not_lazy(&self.client_id));
        };
        let window = request.window(self.config.number_of_months())?;

        self.state = WindowState::Loading(window);
        model.clear();
        if let Err(e) = model.load_window(&window) {
            model.clear();
            self.state = WindowState::Idle;
            warn!(
                client_id = %self.client_id,
                start = %window.start,
                end = %window.end,
                error = %e,
                "View change failed"
            );
            return Err(e.into());
        }

        let response = encode_date_metadata(&**model, &self.widget_pattern, self.locale);
        self.state = WindowState::Ready(window);
        info!(
            client_id = %self.client_id,
            start = %window.start,
            end = %window.end,
            count = response.len(),
            "Served view change"
        );
        Ok(response)
    }

    /// Converts submitted input text and keeps the result as the value.
    ///
    /// On failure the text is kept so the next render shows it again.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not match the pattern.
    pub fn submit(&mut self, text: &str) -> ServerResult<&Selection> {
        let converted = DatePickerRenderer::new(&self.config)?.convert(text);
        match converted {
            Ok(selection) => {
                debug!(client_id = %self.client_id, mode = %self.config.selection_mode, "Converted submission");
                self.set_value(selection);
                Ok(&self.value)
            }
            Err(e) => {
                debug!(client_id = %self.client_id, error = %e, "Submission conversion failed");
                self.submitted = Some(text.to_string());
                self.conversion_failed = true;
                Err(e.into())
            }
        }
    }

    /// Renders the picker.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(&self) -> ServerResult<RenderedWidget> {
        self.render_at(Local::now().naive_local())
    }

    /// Renders the picker with a fixed current instant.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_at(&self, now: NaiveDateTime) -> ServerResult<RenderedWidget> {
        let renderer = DatePickerRenderer::new(&self.config)?;
        let text = match &self.submitted {
            Some(text) if self.conversion_failed => text.clone(),
            _ => renderer.format_selection(&self.value),
        };
        let mut ctx = RenderContext::new(self.client_id.as_str())
            .with_value(text)
            .with_now(now);
        if self.conversion_failed {
            ctx = ctx.with_conversion_failed();
        }
        if let Some(model) = self.model.as_deref() {
            ctx = ctx.with_model(model);
        }
        Ok(renderer.render(&ctx)?)
    }
}

impl fmt::Debug for PickerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerSession")
            .field("client_id", &self.client_id)
            .field("pattern", &self.widget_pattern.as_str())
            .field("lazy", &self.is_lazy())
            .field("state", &self.state)
            .field("value", &self.value)
            .field("conversion_failed", &self.conversion_failed)
            .finish_non_exhaustive()
    }
}

/// Picker state of every open session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionKey, PickerSession>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the picker for the key, creating it on first use.
    ///
    /// An existing picker is returned as is; `config` and `model` are only
    /// used when creating one.
    ///
    /// # Errors
    ///
    /// Returns an error if a new picker's configuration is invalid.
    pub fn open(
        &mut self,
        session_id: &str,
        client_id: &str,
        config: PickerConfig,
        model: Option<BoxedModel>,
    ) -> ServerResult<&mut PickerSession> {
        let key = SessionKey::new(session_id, client_id);
        match self.sessions.entry(key) {
            Entry::Occupied(entry) => {
                debug!(key = %entry.key(), "Reusing picker session");
                let session = entry.into_mut();
                session.last_access = Utc::now();
                Ok(session)
            }
            Entry::Vacant(entry) => {
                let session = PickerSession::new(client_id, config, model)?;
                debug!(key = %entry.key(), lazy = session.is_lazy(), "Created picker session");
                Ok(entry.insert(session))
            }
        }
    }

    /// Returns the picker for the key.
    pub fn get(&self, session_id: &str, client_id: &str) -> Option<&PickerSession> {
        self.sessions.get(&SessionKey::new(session_id, client_id))
    }

    /// Returns the picker for the key and marks it as accessed.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::UnknownComponent`] if there is none.
    pub fn require_mut(
        &mut self,
        session_id: &str,
        client_id: &str,
    ) -> ServerResult<&mut PickerSession> {
        let session = self
            .sessions
            .get_mut(&SessionKey::new(session_id, client_id))
            .ok_or_else(|| ServerError::unknown_component(session_id, client_id))?;
        session.last_access = Utc::now();
        trace!(session_id, client_id, "Accessed picker session");
        Ok(session)
    }

    /// Removes one picker.
    pub fn remove(&mut self, session_id: &str, client_id: &str) -> Option<PickerSession> {
        let session = self.sessions.remove(&SessionKey::new(session_id, client_id));
        if session.is_some() {
            debug!(session_id, client_id, "Removed picker session");
        }
        session
    }

    /// Removes every picker of a session, returning how many were removed.
    pub fn close_session(&mut self, session_id: &str) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|key, _| key.session_id != session_id);
        let removed = before - self.sessions.len();
        debug!(session_id, removed, "Closed session");
        removed
    }

    /// Removes pickers not accessed for longer than `max_idle`.
    pub fn evict_idle(&mut self, now: DateTime<Utc>, max_idle: TimeDelta) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|key, session| {
            let keep = now - session.last_access <= max_idle;
            if !keep {
                trace!(key = %key, "Evicting idle picker session");
            }
            keep
        });
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, "Evicted idle picker sessions");
        }
        evicted
    }

    /// Returns the number of pickers.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no picker is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Returns an iterator over all keys.
    pub fn keys(&self) -> impl Iterator<Item = &SessionKey> {
        self.sessions.keys()
    }
}
