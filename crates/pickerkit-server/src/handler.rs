//! Request dispatch.
//!
//! A picker request is either a view change, answered with the metadata of
//! the newly visible window, or a regular request that may carry submitted
//! text and is answered with the rendered picker.

use chrono::{Local, NaiveDateTime};
use pickerkit_core::Selection;
use pickerkit_protocol::{
    DateMetadataResponse, RequestParams, VIEW_CHANGE_EVENT, ViewChangeRequest,
};
use pickerkit_render::RenderedWidget;
use serde::Serialize;
use tracing::{Span, debug};

use crate::error::{ServerError, ServerResult};
use crate::session::SessionRegistry;

/// Answer to a picker request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickerResponse {
    /// Metadata of the visible window.
    Metadata(DateMetadataResponse),
    /// Markup and script of the picker.
    Widget(RenderedWidget),
}

impl PickerResponse {
    /// Returns the media type of [`PickerResponse::body`].
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Metadata(_) => "application/json",
            Self::Widget(_) => "text/html",
        }
    }

    /// Returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be serialized.
    pub fn body(&self) -> ServerResult<String> {
        match self {
            Self::Metadata(metadata) => Ok(metadata.to_json()?),
            Self::Widget(widget) => Ok(format!(
                "{}<script type=\"text/javascript\">{}</script>",
                widget.markup, widget.script
            )),
        }
    }
}

/// Handles picker requests against the registered sessions.
#[derive(Debug, Default)]
pub struct RequestHandler {
    sessions: SessionRegistry,
}

impl RequestHandler {
    /// Creates a handler with no sessions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handler over an existing registry.
    pub fn with_sessions(sessions: SessionRegistry) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionRegistry {
        &mut self.sessions
    }

    /// Handles a request for the picker `client_id` of `session_id`.
    ///
    /// A failed conversion of submitted text is not an error: the picker is
    /// rendered again with the text and a default date of now.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown picker, bad view change parameters,
    /// a failing metadata source or a render failure.
    #[tracing::instrument(skip(self, params), fields(request_type))]
    pub fn handle(
        &mut self,
        session_id: &str,
        client_id: &str,
        params: &RequestParams,
    ) -> ServerResult<PickerResponse> {
        self.handle_at(session_id, client_id, params, Local::now().naive_local())
    }

    /// Like [`RequestHandler::handle`] with a fixed current instant.
    ///
    /// # Errors
    ///
    /// See [`RequestHandler::handle`].
    pub fn handle_at(
        &mut self,
        session_id: &str,
        client_id: &str,
        params: &RequestParams,
        now: NaiveDateTime,
    ) -> ServerResult<PickerResponse> {
        if params.is_request_source(client_id, VIEW_CHANGE_EVENT) {
            Span::current().record("request_type", "view_change");
            let request = ViewChangeRequest::from_params(client_id, params)?;
            return self
                .view_change(session_id, client_id, request)
                .map(PickerResponse::Metadata);
        }

        Span::current().record("request_type", "render");
        if let Some(text) = params.submitted_value(client_id) {
            match self.submit(session_id, client_id, text) {
                Ok(_) | Err(ServerError::Convert(_)) => {}
                Err(e) => return Err(e),
            }
        }
        let session = self.sessions.require_mut(session_id, client_id)?;
        Ok(PickerResponse::Widget(session.render_at(now)?))
    }

    /// Answers a view change.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown picker, a picker without a lazy model,
    /// an invalid window or a failing metadata source.
    pub fn view_change(
        &mut self,
        session_id: &str,
        client_id: &str,
        request: ViewChangeRequest,
    ) -> ServerResult<DateMetadataResponse> {
        debug!(year = request.year, month = request.month, "Handling view change");
        self.sessions
            .require_mut(session_id, client_id)?
            .view_change(request)
    }

    /// Converts submitted text for a picker.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown picker or text that does not convert.
    pub fn submit(
        &mut self,
        session_id: &str,
        client_id: &str,
        text: &str,
    ) -> ServerResult<Selection> {
        let session = self.sessions.require_mut(session_id, client_id)?;
        session.submit(text).cloned()
    }

    /// Renders a picker.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown picker or a render failure.
    pub fn render(&mut self, session_id: &str, client_id: &str) -> ServerResult<RenderedWidget> {
        self.sessions.require_mut(session_id, client_id)?.render()
    }
}
