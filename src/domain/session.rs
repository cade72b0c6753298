//! Insight request lifecycle for one client session
//!
//! `Idle -> Requesting -> Success | Failed`. Changing the selection (month,
//! year or keyword set) of a finished session returns it to `Idle`. A request
//! can only start from `Idle`, so a second request while one is in flight is
//! refused rather than queued.

use serde::Serialize;
use thiserror::Error;

use crate::domain::YearMonth;

/// The month and keywords an insight request is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightSelection {
    pub period: YearMonth,
    pub keywords: Vec<String>,
}

impl InsightSelection {
    pub fn new(period: YearMonth, keywords: Vec<String>) -> Self {
        Self { period, keywords }
    }
}

/// Where a session is in its request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Idle,
    Requesting,
    Success,
    Failed,
}

impl RequestState {
    pub fn is_finished(&self) -> bool {
        matches!(self, RequestState::Success | RequestState::Failed)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("An insight request is already in progress for this session")]
    AlreadyRequesting,

    #[error("A new request can only start from idle (session is {0:?})")]
    NotIdle(RequestState),
}

/// Identifies the request a completion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Request state for one client session
#[derive(Debug)]
pub struct InsightSession {
    state: RequestState,
    selection: Option<InsightSelection>,
    // bumped whenever the selection changes, so a completion for an old
    // selection can be recognised
    generation: u64,
}

impl Default for InsightSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightSession {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            selection: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Record the client's current selection
    ///
    /// A change while `Success` or `Failed` resets to `Idle`. A change while
    /// `Requesting` leaves the state alone but makes the in-flight result stale.
    pub fn select(&mut self, selection: InsightSelection) -> RequestState {
        if self.selection.as_ref() == Some(&selection) {
            return self.state;
        }

        self.selection = Some(selection);
        self.generation += 1;
        if self.state.is_finished() {
            self.state = RequestState::Idle;
        }
        self.state
    }

    /// Discard a finished result (the "generate again" action)
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == RequestState::Requesting {
            return Err(SessionError::AlreadyRequesting);
        }
        self.state = RequestState::Idle;
        Ok(())
    }

    /// Move `Idle -> Requesting` for the current selection
    pub fn begin(&mut self) -> Result<RequestTicket, SessionError> {
        match self.state {
            RequestState::Idle => {
                self.state = RequestState::Requesting;
                Ok(RequestTicket(self.generation))
            }
            RequestState::Requesting => Err(SessionError::AlreadyRequesting),
            finished => Err(SessionError::NotIdle(finished)),
        }
    }

    /// Record the outcome of the request identified by `ticket`
    ///
    /// If the selection changed while the request was in flight the result no
    /// longer describes what the client is looking at, and the session goes
    /// back to `Idle`.
    pub fn finish(&mut self, ticket: RequestTicket, succeeded: bool) -> RequestState {
        if self.state != RequestState::Requesting {
            return self.state;
        }

        self.state = if ticket.0 != self.generation {
            RequestState::Idle
        } else if succeeded {
            RequestState::Success
        } else {
            RequestState::Failed
        };
        self.state
    }
}
