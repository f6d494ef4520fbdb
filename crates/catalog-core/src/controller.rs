//! Incremental pagination controller.
//!
//! Drives "load more on scroll" for one listing view. The controller is a
//! plain state machine: every mutation goes through [`PaginationController::dispatch`],
//! which may hand back an [`Effect`] for the host to perform. It never awaits
//! anything itself, so it can be driven by any runtime or UI loop.
//!
//! ```text
//! Idle --(visible, ratio >= threshold)--> offset advanced
//!      --(offset < total)--> Fetching --ok--> Idle
//!                                     --err--> Failed | Stalled
//!      --(offset >= total)--> Exhausted
//! ```

use crate::config::PagingConfig;
use crate::logging::{push_bounded, LogEntry, Loggable};
use crate::pagination::{Page, PageRequest, PagingState, VisibilitySignal};
use crate::traits::Keyed;
use crate::{CatalogError, CatalogResult};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub visibility_threshold: f64,
    pub max_fetch_attempts: u32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        PagingConfig::default().into()
    }
}

impl From<PagingConfig> for ControllerSettings {
    fn from(config: PagingConfig) -> Self {
        Self {
            visibility_threshold: config.visibility_threshold,
            max_fetch_attempts: config.max_fetch_attempts.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the next qualifying visibility signal.
    Idle,
    /// A fetch for `request` is outstanding.
    Fetching { request: PageRequest, attempt: u32 },
    /// The last attempt at `request` failed with a retryable error.
    Failed { request: PageRequest, attempts: u32 },
    /// Fetching stopped at `request`. Only an explicit retry can resume,
    /// and only when the failure was retryable.
    Stalled { request: PageRequest, retryable: bool },
    /// `offset >= total`; nothing left to fetch.
    Exhausted,
    /// The view is gone; every input is ignored.
    TornDown,
}

impl Phase {
    pub fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching { .. })
    }
}

/// Inputs accepted by [`PaginationController::dispatch`].
#[derive(Debug)]
pub enum Input<T> {
    Visibility(VisibilitySignal),
    FetchCompleted {
        request: PageRequest,
        outcome: CatalogResult<Page<T>>,
    },
    Retry,
    Teardown,
}

/// Side effects the host must perform on the controller's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Fetch(PageRequest),
}

pub struct PaginationController<T> {
    state: PagingState<T>,
    settings: ControllerSettings,
    phase: Phase,
    last_signal: VisibilitySignal,
    last_error: Option<CatalogError>,
    logs: VecDeque<LogEntry>,
}

impl<T: Keyed> PaginationController<T> {
    pub fn initialize(first_page: Page<T>, settings: ControllerSettings) -> CatalogResult<Self> {
        let state = PagingState::from_first_page(first_page)?;
        let phase = if state.is_exhausted() {
            Phase::Exhausted
        } else {
            Phase::Idle
        };
        tracing::debug!(
            offset = state.offset(),
            limit = state.limit(),
            total = state.total(),
            items = state.len(),
            "pagination controller initialized"
        );
        Ok(Self {
            state,
            settings,
            phase,
            last_signal: VisibilitySignal::hidden(),
            last_error: None,
            logs: VecDeque::new(),
        })
    }

    /// Single mutation entry point.
    pub fn dispatch(&mut self, input: Input<T>) -> Option<Effect> {
        if self.phase == Phase::TornDown {
            tracing::trace!("input after teardown ignored");
            return None;
        }
        match input {
            Input::Visibility(signal) => self.on_visibility_change(signal),
            Input::FetchCompleted { request, outcome } => {
                self.on_fetch_completed(request, outcome);
                None
            }
            Input::Retry => self.on_retry(),
            Input::Teardown => {
                tracing::debug!(offset = self.state.offset(), "pagination controller torn down");
                self.phase = Phase::TornDown;
                None
            }
        }
    }

    fn on_visibility_change(&mut self, signal: VisibilitySignal) -> Option<Effect> {
        self.last_signal = signal;
        if !signal.crosses(self.settings.visibility_threshold) {
            return None;
        }

        match self.phase {
            Phase::Idle => {
                let next = self.state.next_offset();
                let previous = self.state.advance_to(next)?;
                self.on_offset_advanced(previous, next)
            }
            Phase::Fetching { request, .. } => {
                tracing::debug!(offset = request.offset, "fetch in flight, trigger ignored");
                None
            }
            Phase::Failed { request, attempts } => {
                // a failure on the last attempt stalls instead
                debug_assert!(attempts < self.settings.max_fetch_attempts);
                self.start_fetch(request, attempts + 1)
            }
            Phase::Stalled { .. } | Phase::Exhausted | Phase::TornDown => None,
        }
    }

    fn on_offset_advanced(&mut self, previous: u32, offset: u32) -> Option<Effect> {
        if offset > previous && offset < self.state.total() {
            self.start_fetch(PageRequest::new(offset, self.state.limit()), 1)
        } else {
            tracing::debug!(offset, total = self.state.total(), "listing exhausted");
            self.phase = Phase::Exhausted;
            None
        }
    }

    fn start_fetch(&mut self, request: PageRequest, attempt: u32) -> Option<Effect> {
        tracing::debug!(
            offset = request.offset,
            limit = request.limit,
            attempt,
            "requesting page"
        );
        self.phase = Phase::Fetching { request, attempt };
        Some(Effect::Fetch(request))
    }

    fn on_fetch_completed(&mut self, request: PageRequest, outcome: CatalogResult<Page<T>>) {
        let attempt = match self.phase {
            Phase::Fetching {
                request: pending,
                attempt,
            } if pending == request => attempt,
            _ => {
                tracing::warn!(offset = request.offset, "discarding stale page completion");
                return;
            }
        };

        match outcome {
            Ok(page) => {
                if page.offset != request.offset {
                    tracing::warn!(
                        requested = request.offset,
                        returned = page.offset,
                        "source returned a page for a different offset"
                    );
                }
                self.warn_on_overlap(&page.results);
                let fetched = page.results.len();
                self.state.append(page.results);
                self.last_error = None;
                self.phase = Phase::Idle;
                tracing::debug!(
                    offset = request.offset,
                    fetched,
                    accumulated = self.state.len(),
                    "page appended"
                );
            }
            Err(err) => {
                self.add_log(format!(
                    "fetch at offset {} failed (attempt {}): {}",
                    request.offset, attempt, err
                ));
                let retryable = err.is_retryable();
                self.phase = if retryable && attempt < self.settings.max_fetch_attempts {
                    tracing::warn!(offset = request.offset, attempt, error = %err, "page fetch failed, will retry");
                    Phase::Failed {
                        request,
                        attempts: attempt,
                    }
                } else {
                    tracing::error!(offset = request.offset, attempt, error = %err, "page fetch failed, stopping");
                    Phase::Stalled { request, retryable }
                };
                self.last_error = Some(err);
            }
        }
    }

    fn on_retry(&mut self) -> Option<Effect> {
        match self.phase {
            Phase::Failed { request, .. }
            | Phase::Stalled {
                request,
                retryable: true,
            } => {
                self.add_log(format!("retry requested at offset {}", request.offset));
                self.start_fetch(request, 1)
            }
            _ => None,
        }
    }

    fn warn_on_overlap(&self, incoming: &[T]) {
        if incoming.is_empty() || self.state.is_empty() {
            return;
        }
        let existing: HashSet<T::Key> = self.state.items().iter().map(Keyed::key).collect();
        let overlapping = incoming
            .iter()
            .filter(|item| existing.contains(&item.key()))
            .count();
        if overlapping > 0 {
            tracing::warn!(overlapping, "fetched page overlaps items already listed");
        }
    }

    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    pub fn offset(&self) -> u32 {
        self.state.offset()
    }

    pub fn limit(&self) -> u32 {
        self.state.limit()
    }

    pub fn total(&self) -> u32 {
        self.state.total()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings
    }

    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }

    /// Whether the rendering shell should show its loading indicator.
    /// Recomputed from the cursor and the latest signal on every call.
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::TornDown
            && self.state.offset() <= self.state.total()
            && self.last_signal.is_intersecting
    }
}

impl<T> Loggable for PaginationController<T> {
    fn add_log(&mut self, message: String) {
        push_bounded(&mut self.logs, message);
    }

    fn get_logs(&self) -> &VecDeque<LogEntry> {
        &self.logs
    }
}
