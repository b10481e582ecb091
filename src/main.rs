//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Cinedex library and
//! the Zellij plugin system. It translates keys and web request results into
//! library events, and library actions into Zellij API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `WebRequestResult` and
//!    `PermissionRequestResult` events
//! 3. **Permission**: Catalog fetches wait until `WebAccess` is answered and
//!    fail at once if it was denied
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Request Tickets
//!
//! Every catalog request carries its ticket (slot kind, sequence number and
//! query) in the `web_request` context map. Zellij hands the map back with
//! the result, so responses are matched to requests without any bookkeeping
//! here, whatever order they complete in.
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! While browsing:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `Enter`: Open details for the movie under the cursor
//! - `t`: Show top rated movies
//! - `/`: Edit the search title
//! - `r`: Retry the last failed fetch
//! - `q`: Close plugin
//!
//! While editing the search title:
//! - Any character: Type
//! - `Backspace`: Delete
//! - `Enter`: Submit search
//! - `Esc`: Cancel editing
//!
//! While the detail overlay is open:
//! - `Esc`: Close overlay
//! - `q`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use cinedex::app::InputMode;
use cinedex::catalog::{AccessGate, Admission, CatalogClient, CatalogResponse, TraceContext};
use cinedex::{handle_event, Action, AppState, Config, Event, NetworkFailure};
use std::collections::{BTreeMap, VecDeque};
use zellij_tile::prelude::*;

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: the catalog
/// endpoint and the web access permission.
struct State {
    /// Core application state from library layer.
    app: AppState,

    /// Catalog endpoint; `None` when the configured URL is invalid.
    client: Option<CatalogClient>,

    /// Holds fetches until `WebAccess` is answered; refuses them after a
    /// denial.
    gate: AccessGate,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        let (app, _startup) = cinedex::initialize(&config);
        Self {
            app,
            client: config.catalog_client().ok(),
            gate: AccessGate::default(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, builds the application state, requests web
    /// access and subscribes to events. The startup top rated fetch is held
    /// back until the permission is answered.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinedex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(catalog_url = %config.catalog_url, "parsed configuration");

        self.client = match config.catalog_client() {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(catalog_url = %config.catalog_url, error = %e, "invalid catalog url");
                None
            }
        };

        let (app, startup) = cinedex::initialize(&config);
        self.app = app;
        self.gate = AccessGate::default();

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        let feedback = self.execute_actions(startup);
        self.dispatch(feedback);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => self.dispatch(VecDeque::from([event])),
                None => false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                let Some((response, trace)) = Self::handle_web_result(status, &body, &context) else {
                    return false;
                };
                let _trace_guard = trace.as_ref().and_then(TraceContext::attach);
                self.dispatch(VecDeque::from([Event::CatalogResponse(response)]))
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status)
            }
            _ => false,
        }
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        cinedex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs events through the library, executing the resulting actions.
    ///
    /// Actions that fail before reaching the host are fed back as failure
    /// events, so the loop ends once no action produces feedback.
    fn dispatch(&mut self, mut events: VecDeque<Event>) -> bool {
        let mut should_render = false;

        while let Some(event) = events.pop_front() {
            match handle_event(&mut self.app, event) {
                Ok((render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render = render, "event handled");
                    should_render |= render;
                    events.extend(self.execute_actions(actions));
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    /// Decodes a web request result belonging to the catalog.
    fn handle_web_result(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<(CatalogResponse, Option<TraceContext>)> {
        let Some(response) = CatalogClient::settle_result(status, body, context) else {
            tracing::debug!(status, "ignoring web request result without a catalog ticket");
            return None;
        };
        tracing::debug!(
            status,
            seq = response.request.seq,
            body_len = body.len(),
            "catalog request settled"
        );
        let trace = response.request.trace_context.clone();
        Some((response, trace))
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.controller.state().selected().is_some() {
            return match key.bare_key {
                BareKey::Esc => Some(Event::CloseOverlay),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        if self.app.input_mode == InputMode::Editing {
            return match key.bare_key {
                BareKey::Enter => Some(Event::SubmitSearch),
                BareKey::Esc => Some(Event::Escape),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenMovie,
            BareKey::Esc => Event::Escape,
            BareKey::Char('t') => Event::ShowTopRated,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('r') => Event::Retry,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Handles the web access permission answer.
    ///
    /// On grant the held fetches go out; on denial they settle as transport
    /// failures so the view leaves its loading state, and so does every
    /// later fetch.
    fn handle_permission_result(&mut self, status: PermissionStatus) -> bool {
        match status {
            PermissionStatus::Granted => {
                let released = self.gate.grant().into_iter().map(Action::Fetch).collect();
                let feedback = self.execute_actions(released);
                self.dispatch(feedback)
            }
            PermissionStatus::Denied => {
                let failures = self.gate.deny().into_iter().map(Event::CatalogResponse).collect();
                self.dispatch(failures)
            }
        }
    }

    /// Executes actions in order and collects the events they fed back.
    fn execute_actions(&mut self, actions: Vec<Action>) -> VecDeque<Event> {
        actions
            .into_iter()
            .filter_map(|action| self.execute_action(action))
            .collect()
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls. A fetch that cannot be
    /// sent comes back as a failed catalog response.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            Action::Fetch(request) => {
                let request = match self.gate.admit(request) {
                    Admission::Send(request) => request,
                    Admission::Held => return None,
                    Admission::Refused(failure) => return Some(Event::CatalogResponse(failure)),
                };

                let Some(client) = &self.client else {
                    return Some(Event::CatalogResponse(CatalogResponse::failed(
                        request,
                        NetworkFailure::Transport("catalog_url is not a valid URL".to_string()),
                    )));
                };

                match client.url_for(&request.query) {
                    Ok(url) => {
                        tracing::debug!(url = %url, seq = request.seq, "sending catalog request");
                        web_request(
                            url.as_str(),
                            HttpVerb::Get,
                            CatalogClient::headers(),
                            vec![],
                            request.to_context(),
                        );
                        None
                    }
                    Err(e) => Some(Event::CatalogResponse(CatalogResponse::failed(
                        request,
                        NetworkFailure::Transport(e.to_string()),
                    ))),
                }
            }
        }
    }
}
