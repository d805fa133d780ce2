use contracts::domain::a001_report::{FilterCriteria, Report};

use super::api::{FetchError, ReportSource};

/// Fetched report list plus the filter it was requested with.
///
/// The list is replaced wholesale by every successful fetch and left
/// untouched by a failed one. Responses are applied in arrival order;
/// nothing sequences or cancels overlapping fetches.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
    criteria: FilterCriteria,
    /// Bumped on every successful fetch
    generation: u64,
    last_error: Option<FetchError>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn find(&self, id: i64) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Set the kind filter from a select value; `true` when it changed
    pub fn set_kind_filter(&mut self, code: &str) -> bool {
        let mut next = self.criteria.clone();
        next.set_kind_code(code);
        self.replace_criteria(next)
    }

    /// Set the date filter from a date input value; `true` when it changed
    pub fn set_date_filter(&mut self, date: &str) -> bool {
        let mut next = self.criteria.clone();
        next.set_date(date);
        self.replace_criteria(next)
    }

    fn replace_criteria(&mut self, next: FilterCriteria) -> bool {
        if next == self.criteria {
            return false;
        }
        self.criteria = next;
        true
    }

    /// Request the reports matching `criteria`. Only non-empty criteria
    /// reach the outgoing query.
    pub async fn fetch<S>(source: &S, criteria: &FilterCriteria) -> Result<Vec<Report>, FetchError>
    where
        S: ReportSource + ?Sized,
    {
        source.list_reports(&criteria.to_query()).await
    }

    /// Apply a fetch outcome. Returns `true` when the list was replaced.
    pub fn apply(&mut self, outcome: Result<Vec<Report>, FetchError>) -> bool {
        match outcome {
            Ok(mut reports) => {
                // Newest first; equal timestamps keep response order
                reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                log::debug!("Loaded {} reports", reports.len());
                self.reports = reports;
                self.generation += 1;
                self.last_error = None;
                true
            }
            Err(err) => {
                log::error!("Failed to fetch reports: {}", err);
                self.last_error = Some(err);
                false
            }
        }
    }
}

/// Number of fetches started and not yet applied. Loading lasts until
/// the last overlapping fetch lands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight(usize);

impl InFlight {
    pub fn start(&mut self) {
        self.0 += 1;
    }

    pub fn finish(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a001_report::ReportQuery;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    pub fn report(id: i64, kind: &str, result: Vec<Value>) -> Report {
        Report {
            id,
            title: format!("Report {}", id),
            kind: kind.to_string(),
            result,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                + chrono::Duration::days(id),
        }
    }

    /// Scripted source: pops one outcome per call and records the queries
    #[derive(Default)]
    pub struct FakeSource {
        pub outcomes: RefCell<VecDeque<Result<Vec<Report>, FetchError>>>,
        pub queries: RefCell<Vec<ReportQuery>>,
    }

    impl FakeSource {
        pub fn with(outcomes: Vec<Result<Vec<Report>, FetchError>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ReportSource for FakeSource {
        async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<Report>, FetchError> {
            self.queries.borrow_mut().push(query.clone());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Network("no scripted response".into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    /// Same fetch-then-apply sequence the dashboard view runs
    fn refresh(store: &mut ReportStore, source: &FakeSource) -> bool {
        let criteria = store.criteria().clone();
        let outcome = block_on(ReportStore::fetch(source, &criteria));
        store.apply(outcome)
    }

    #[test]
    fn test_initial_fetch_sends_no_filters() {
        let source = FakeSource::with(vec![Ok(vec![report(1, "bar", vec![])])]);
        let mut store = ReportStore::new();
        assert!(refresh(&mut store, &source));
        assert_eq!(store.reports().len(), 1);
        let queries = source.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].is_empty());
    }

    #[test]
    fn test_filters_reach_query() {
        let source = FakeSource::with(vec![Ok(vec![])]);
        let mut store = ReportStore::new();
        assert!(store.set_kind_filter("line"));
        assert!(store.set_date_filter("2024-03-02"));
        refresh(&mut store, &source);
        let queries = source.queries.borrow();
        assert_eq!(queries[0].tipo.as_deref(), Some("line"));
        assert_eq!(queries[0].criado_em.as_deref(), Some("2024-03-02"));
    }

    #[test]
    fn test_unchanged_filter_reports_no_change() {
        let mut store = ReportStore::new();
        assert!(!store.set_kind_filter(""));
        assert!(store.set_kind_filter("pie"));
        assert!(!store.set_kind_filter("pie"));
        assert!(store.set_kind_filter(""));
        assert!(!store.set_date_filter(""));
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let source = FakeSource::with(vec![
            Ok(vec![report(1, "bar", vec![]), report(2, "pie", vec![])]),
            Err(FetchError::Status(500)),
            Err(FetchError::Malformed("expected array".into())),
        ]);
        let mut store = ReportStore::new();
        refresh(&mut store, &source);
        let generation = store.generation();

        assert!(!refresh(&mut store, &source));
        assert!(!refresh(&mut store, &source));
        assert_eq!(store.reports().len(), 2);
        assert_eq!(store.generation(), generation);
        assert!(matches!(store.last_error(), Some(FetchError::Malformed(_))));
    }

    #[test]
    fn test_failure_on_first_load_leaves_empty_list() {
        let source = FakeSource::with(vec![Err(FetchError::Network("offline".into()))]);
        let mut store = ReportStore::new();
        assert!(!refresh(&mut store, &source));
        assert!(store.reports().is_empty());
    }

    #[test]
    fn test_success_replaces_wholesale_newest_first() {
        let mut store = ReportStore::new();
        store.apply(Ok(vec![report(1, "bar", vec![]), report(3, "pie", vec![])]));
        store.apply(Ok(vec![
            report(2, "line", vec![json!({"label": "a"})]),
            report(5, "bar", vec![]),
        ]));
        let ids: Vec<i64> = store.reports().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 2]);
        assert!(store.find(1).is_none());
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_late_response_wins() {
        // Two fetches in flight; the older one resolves last and overwrites
        let mut store = ReportStore::new();
        let newer = Ok(vec![report(2, "pie", vec![])]);
        let older = Ok(vec![report(1, "bar", vec![])]);
        store.apply(newer);
        store.apply(older);
        assert_eq!(store.reports()[0].id, 1);
    }

    #[test]
    fn test_loading_lasts_until_last_fetch_lands() {
        let mut in_flight = InFlight::default();
        assert!(!in_flight.is_loading());

        in_flight.start();
        in_flight.start();
        in_flight.finish();
        assert!(in_flight.is_loading());

        in_flight.finish();
        assert!(!in_flight.is_loading());

        in_flight.finish();
        assert_eq!(in_flight, InFlight::default());
    }
}
