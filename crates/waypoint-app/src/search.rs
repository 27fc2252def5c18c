//! Search flow state machine.
//!
//! Owns the query text, the current result set and the selected result.
//! Translates a free-text query into a [`AppAction::Search`] scoped to the
//! home region and applies the matching completion.
//!
//! Idle → Searching (on submit) → Idle (on completion, success or failure).
//! Selection is orthogonal to the phase.

use waypoint_core::{Lookup, LookupError, LookupKind, Place, PlaceId, Region};

use crate::{AppAction, Generation, SearchPhase};

/// Search flow state.
#[derive(Debug, Clone)]
pub struct SearchFlow {
    /// Last submitted query (trimmed).
    query: String,
    /// Results of the last accepted search. Replaced, never merged.
    results: Vec<Place>,
    /// Selected result. Always an element of `results`.
    selection: Option<Place>,
    /// Lookup phase.
    phase: SearchPhase,
    /// Generation of the most recently issued request.
    generation: Generation,
    /// Outcome of the last accepted search. `None` before the first one.
    last_outcome: Option<LookupKind>,
    /// Failure of the last accepted search, if it failed.
    last_error: Option<LookupError>,
}

impl Default for SearchFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchFlow {
    /// Create an idle flow with no results.
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            selection: None,
            phase: SearchPhase::Idle,
            generation: Generation::default(),
            last_outcome: None,
            last_error: None,
        }
    }

    /// Submit a query. Blank text is ignored.
    ///
    /// Clears the selection and supersedes any search still in flight.
    /// Previous results stay visible until the new ones arrive.
    pub fn submit_query(&mut self, text: &str, region: Region) -> Vec<AppAction> {
        let query = text.trim();
        if query.is_empty() {
            return vec![];
        }

        self.generation = self.generation.next();
        self.query = query.to_owned();
        self.selection = None;
        self.phase = SearchPhase::Searching { generation: self.generation };

        tracing::debug!(generation = %self.generation, query, "search submitted");

        vec![AppAction::Search { generation: self.generation, query: self.query.clone(), region }]
    }

    /// Apply a search completion.
    ///
    /// Returns `false` if the completion belongs to a superseded request and
    /// was discarded. Empty and failed lookups both leave an empty result
    /// list; the distinction is kept in [`SearchFlow::last_outcome`].
    pub fn complete(&mut self, generation: Generation, outcome: Lookup<Vec<Place>>) -> bool {
        match self.phase {
            SearchPhase::Searching { generation: pending } if pending == generation => {},
            _ => {
                tracing::debug!(%generation, current = %self.generation, "discarding stale search");
                return false;
            },
        }

        if let Some(error) = outcome.error() {
            tracing::warn!(%generation, %error, "search failed");
        }

        self.last_outcome = Some(outcome.kind());
        self.last_error = outcome.error().cloned();
        self.results = outcome.found().unwrap_or_default();
        self.phase = SearchPhase::Idle;

        if self.selection.as_ref().is_some_and(|s| !self.results.contains(s)) {
            self.selection = None;
        }

        true
    }

    /// Select the result with `place_id`.
    ///
    /// Returns `true` if the selection changed. Unknown ids are ignored.
    pub fn select(&mut self, place_id: PlaceId) -> bool {
        if self.selection.as_ref().is_some_and(|s| s.id == place_id) {
            return false;
        }

        match self.results.iter().find(|p| p.id == place_id) {
            Some(place) => {
                self.selection = Some(place.clone());
                true
            },
            None => false,
        }
    }

    /// Clear the selection. Returns `true` if something was selected.
    pub fn clear_selection(&mut self) -> bool {
        self.selection.take().is_some()
    }

    /// Last submitted query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current results.
    pub fn results(&self) -> &[Place] {
        &self.results
    }

    /// Selected result, if any.
    pub fn selection(&self) -> Option<&Place> {
        self.selection.as_ref()
    }

    /// Lookup phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Whether a search is in flight.
    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching { .. })
    }

    /// Outcome of the last accepted search.
    pub fn last_outcome(&self) -> Option<LookupKind> {
        self.last_outcome
    }

    /// Failure of the last accepted search.
    pub fn last_error(&self) -> Option<&LookupError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use waypoint_core::{Coordinate, HomeConfig};

    use super::*;

    fn place(id: u64) -> Place {
        let coord = Coordinate::new(43.64 + id as f64 * 0.001, -79.38).unwrap();
        Place::new(PlaceId(id), format!("Place {id}"), "", coord)
    }

    fn region() -> Region {
        HomeConfig::default().region()
    }

    fn searched(ids: &[u64]) -> SearchFlow {
        let mut flow = SearchFlow::new();
        let actions = flow.submit_query("coffee", region());
        let Some(AppAction::Search { generation, .. }) = actions.first() else {
            unreachable!("submit produces a search");
        };
        let places = ids.iter().copied().map(place).collect();
        assert!(flow.complete(*generation, Lookup::Found(places)));
        flow
    }

    #[test]
    fn blank_query_is_ignored() {
        let mut flow = SearchFlow::new();
        assert!(flow.submit_query("   ", region()).is_empty());
        assert_eq!(flow.phase(), SearchPhase::Idle);
    }

    #[test]
    fn submit_trims_and_scopes_to_region() {
        let mut flow = SearchFlow::new();
        let actions = flow.submit_query("  coffee ", region());

        assert!(matches!(
            actions.as_slice(),
            [AppAction::Search { generation: Generation(1), query, region: r }]
                if query == "coffee" && *r == region()
        ));
        assert!(flow.is_searching());
    }

    #[test]
    fn completion_replaces_results() {
        let mut flow = searched(&[1, 2, 3]);
        assert_eq!(flow.results().len(), 3);

        let actions = flow.submit_query("tea", region());
        let Some(AppAction::Search { generation, .. }) = actions.first() else {
            unreachable!("submit produces a search");
        };
        assert!(flow.complete(*generation, Lookup::Found(vec![place(9)])));
        assert_eq!(flow.results(), &[place(9)]);
    }

    #[test]
    fn failure_empties_results_and_records_error() {
        let mut flow = searched(&[1, 2]);
        let _ = flow.submit_query("tea", region());
        let err = LookupError::Network("offline".into());

        assert!(flow.complete(Generation(2), Lookup::Failed(err.clone())));
        assert!(flow.results().is_empty());
        assert_eq!(flow.last_outcome(), Some(LookupKind::Failed));
        assert_eq!(flow.last_error(), Some(&err));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut flow = SearchFlow::new();
        let _ = flow.submit_query("first", region());
        let _ = flow.submit_query("second", region());

        assert!(!flow.complete(Generation(1), Lookup::Found(vec![place(1)])));
        assert!(flow.is_searching());
        assert!(flow.complete(Generation(2), Lookup::Found(vec![place(2)])));
        assert_eq!(flow.results(), &[place(2)]);

        // A duplicate completion after the flow went idle is also stale.
        assert!(!flow.complete(Generation(2), Lookup::Empty));
    }

    #[test]
    fn select_requires_known_place() {
        let mut flow = searched(&[1, 2, 3]);

        assert!(!flow.select(PlaceId(42)));
        assert!(flow.selection().is_none());

        assert!(flow.select(PlaceId(2)));
        assert_eq!(flow.selection(), Some(&place(2)));
        assert!(!flow.select(PlaceId(2)), "reselecting is not a change");
    }

    #[test]
    fn submit_clears_selection() {
        let mut flow = searched(&[1, 2]);
        flow.select(PlaceId(1));
        let _ = flow.submit_query("tea", region());
        assert!(flow.selection().is_none());
    }

    #[test]
    fn selection_dropped_when_missing_from_new_results() {
        let mut flow = searched(&[1, 2]);
        let _ = flow.submit_query("tea", region());

        // Selecting from the old results while the new search is in flight.
        assert!(flow.select(PlaceId(1)));
        assert!(flow.complete(Generation(2), Lookup::Found(vec![place(3)])));
        assert!(flow.selection().is_none());
    }

    #[test]
    fn clear_selection_reports_change() {
        let mut flow = searched(&[1]);
        assert!(!flow.clear_selection());
        flow.select(PlaceId(1));
        assert!(flow.clear_selection());
    }
}
