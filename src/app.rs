//! Application state management for skyview
//!
//! This module contains the main application state: the search input, the
//! per-query state machine, and the single report currently on screen.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::{Coordinates, LocationQuery, WeatherReport};
use crate::query::{LookupMessage, QueryPhase};

/// Message shown when Enter is pressed on an empty search bar
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a city name";

/// Message shown when the home key is used without a configured home location
pub const NO_HOME_MESSAGE: &str =
    "No home location configured. Add \"home\" to the config file or pass --lat/--lon";

/// Lifecycle of the most recent query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Resolving a city name to coordinates
    Resolving,
    /// Fetching current conditions and forecast
    Fetching,
    /// The report on screen belongs to the latest query
    Succeeded,
    /// The latest query failed; the message is shown in place of the report
    Failed(String),
}

/// Main application struct managing state and data
#[derive(Debug, Default)]
pub struct App {
    /// State of the latest query
    pub query_state: QueryState,
    /// Text typed into the search bar
    pub input: String,
    /// Report currently on screen
    pub report: Option<WeatherReport>,
    /// Most recently submitted query, re-run by refresh
    pub last_query: Option<LocationQuery>,
    /// Id of the latest submitted query
    pub generation: u64,
    /// Coordinates used by the home key
    pub home: Option<Coordinates>,
    /// Timestamp of the last successful lookup
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Submitted query not yet handed to the dispatcher
    pending: Option<(u64, LocationQuery)>,
}

impl App {
    /// Creates a new App with an optional home location
    pub fn new(home: Option<Coordinates>) -> Self {
        Self {
            home,
            ..Default::default()
        }
    }

    /// Whether a lookup is in flight
    pub fn is_loading(&self) -> bool {
        matches!(
            self.query_state,
            QueryState::Resolving | QueryState::Fetching
        )
    }

    /// The error banner text, if the latest query failed
    pub fn error_message(&self) -> Option<&str> {
        match &self.query_state {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Starts a new query, superseding any in flight.
    ///
    /// # Returns
    /// The generation assigned to the query
    pub fn submit(&mut self, query: LocationQuery) -> u64 {
        self.generation += 1;
        self.query_state = match query {
            LocationQuery::City(_) => QueryState::Resolving,
            LocationQuery::Coordinates(_) => QueryState::Fetching,
        };
        tracing::info!(generation = self.generation, query = %query.label(), "Query submitted");

        self.last_query = Some(query.clone());
        self.pending = Some((self.generation, query));
        self.generation
    }

    /// Submits the trimmed search input as a city query
    pub fn submit_input(&mut self) {
        let city = self.input.trim();
        if city.is_empty() {
            self.reject(EMPTY_INPUT_MESSAGE);
            return;
        }
        let query = LocationQuery::city(city);
        self.submit(query);
    }

    /// Queries the configured home coordinates
    pub fn use_home_location(&mut self) {
        match self.home {
            Some(coordinates) => {
                self.submit(LocationQuery::Coordinates(coordinates));
            }
            None => self.reject(NO_HOME_MESSAGE),
        }
    }

    /// Re-runs the last submitted query, if any
    pub fn refresh(&mut self) {
        if let Some(query) = self.last_query.clone() {
            self.submit(query);
        }
    }

    /// Hands the latest submitted query to the caller for dispatch
    pub fn take_pending(&mut self) -> Option<(u64, LocationQuery)> {
        self.pending.take()
    }

    /// Applies a message from a lookup task.
    ///
    /// Messages from superseded queries are dropped.
    ///
    /// # Returns
    /// `true` if the message changed the app state
    pub fn apply(&mut self, message: LookupMessage) -> bool {
        if message.generation() != self.generation {
            tracing::debug!(
                stale = message.generation(),
                current = self.generation,
                "Dropping stale lookup message"
            );
            return false;
        }

        match message {
            LookupMessage::Phase {
                phase: QueryPhase::Fetching,
                ..
            } => {
                self.query_state = QueryState::Fetching;
            }
            LookupMessage::Finished {
                outcome: Ok(report),
                ..
            } => {
                tracing::info!(location = %report.current.location_name, "Query succeeded");
                self.report = Some(report);
                self.query_state = QueryState::Succeeded;
                self.last_refresh = Some(Local::now());
            }
            LookupMessage::Finished {
                outcome: Err(error),
                ..
            } => {
                self.fail(&error.to_string());
            }
        }
        true
    }

    /// Fails without issuing a query. Supersedes any lookup still in flight.
    fn reject(&mut self, message: &str) {
        self.generation += 1;
        self.pending = None;
        self.fail(message);
    }

    /// Clears the report and shows `message` in its place
    fn fail(&mut self, message: &str) {
        self.report = None;
        self.query_state = QueryState::Failed(message.to_string());
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - Printable characters: edit the search input
    /// - `Backspace`: delete the last character
    /// - `Enter`: look up the city in the search input
    /// - `Ctrl-L`: look up the home location
    /// - `F5`: repeat the last lookup
    /// - `F1`: toggle help
    /// - `Esc`: close help, else clear the input, else quit
    /// - `Ctrl-C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key_event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all other keys when shown
        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('l') if ctrl => self.use_home_location(),
            KeyCode::Char(c) if !ctrl && !key_event.modifiers.contains(KeyModifiers::ALT) => {
                self.input.push(c);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit_input(),
            KeyCode::F(5) => self.refresh(),
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                }
            }
            _ => {}
        }
    }
}
