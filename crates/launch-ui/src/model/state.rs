//! Search session state.
//!
//! Every search gets a token from a monotonically increasing counter. Only
//! the holder of the latest token may change what the page shows, so a slow
//! response to an older search can never replace a newer one.

// =============================================================================
// Search Phase State Machine
// =============================================================================

/// Identifies one search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchToken(u64);

/// Where the latest search is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search issued yet.
    #[default]
    Idle,
    /// Waiting for the API.
    Loading { token: SearchToken, query: String },
    /// Results (possibly none) are shown.
    Loaded { query: String, count: usize },
    /// The API failed; an error message is shown.
    Errored { query: String },
}

impl SearchPhase {
    /// Name used for the `data-search-state` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPhase::Idle => "idle",
            SearchPhase::Loading { .. } => "loading",
            SearchPhase::Loaded { .. } => "loaded",
            SearchPhase::Errored { .. } => "errored",
        }
    }
}

// =============================================================================
// Search Session
// =============================================================================

/// Search state for one page.
#[derive(Debug, Default)]
pub struct SearchSession {
    latest: u64,
    phase: SearchPhase,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search. Any earlier token becomes stale.
    pub fn begin(&mut self, query: &str) -> SearchToken {
        self.latest += 1;
        let token = SearchToken(self.latest);
        tracing::debug!("Search {:?} started for {:?}", token, query);
        self.phase = SearchPhase::Loading {
            token,
            query: query.to_string(),
        };
        token
    }

    /// Whether `token` belongs to the latest search.
    pub fn is_current(&self, token: SearchToken) -> bool {
        token.0 == self.latest
    }

    /// Record the outcome of a search: `Some(count)` on success, `None` on
    /// failure. Returns `false` and changes nothing if the token is stale.
    pub fn finish(&mut self, token: SearchToken, outcome: Option<usize>) -> bool {
        if !self.is_current(token) {
            tracing::debug!("Ignoring outcome of stale search {:?}", token);
            return false;
        }

        let query = match std::mem::take(&mut self.phase) {
            SearchPhase::Loading { query, .. } => query,
            other => {
                // Already finished; keep what is shown.
                self.phase = other;
                return false;
            }
        };

        self.phase = match outcome {
            Some(count) => SearchPhase::Loaded { query, count },
            None => SearchPhase::Errored { query },
        };
        true
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
