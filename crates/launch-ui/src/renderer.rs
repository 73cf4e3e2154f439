//! Page rendering and the search cycle.
//!
//! `Renderer` ties the launch API, the shared document and the search
//! session together. It is cheap to clone; clones share all state, so a
//! clone can be moved into a submit handler or a spawned task.
//!
//! ## Search cycle
//!
//! 1. Find `<main>` under the page root (abort with a warning if missing).
//! 2. Remove the previous results list.
//! 3. Take a new search token and enter the loading state.
//! 4. Await the API. The document lock is not held while waiting.
//! 5. Leave the loading state.
//! 6. If a newer search started meanwhile, drop the response. Otherwise mount
//!    the new results list.

use std::sync::Arc;

use launch_core::{LaunchId, Messages};
use launch_dom::{DomError, Element, NodeId, SharedDocument, SubmitHandler};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::LaunchApi;
use crate::model::{SearchPhase, SearchSession};
use crate::views::{
    back_link, launch_details, render_search_form, search_results, LoadingGuard,
};

/// Attribute on `<main>` mirroring the session's `SearchPhase`.
pub const SEARCH_STATE_ATTR: &str = "data-search-state";

/// Renders the front page, search results and launch details.
#[derive(Clone)]
pub struct Renderer {
    api: Arc<dyn LaunchApi>,
    doc: SharedDocument,
    messages: Arc<Messages>,
    session: Arc<Mutex<SearchSession>>,
}

impl Renderer {
    /// Create a renderer for `doc`.
    pub fn new(api: Arc<dyn LaunchApi>, doc: SharedDocument, messages: Messages) -> Self {
        Self {
            api,
            doc,
            messages: Arc::new(messages),
            session: Arc::new(Mutex::new(SearchSession::new())),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.doc
    }

    /// Current search phase.
    pub fn search_phase(&self) -> SearchPhase {
        self.session.lock().phase().clone()
    }

    // =========================================================================
    // Front Page
    // =========================================================================

    /// Mount the heading and search form in a new `<main>` under `parent`.
    ///
    /// A non-empty `query` also starts a search, spawned on the current tokio
    /// runtime; its handle is returned. Mounting does not wait for it.
    pub fn render_frontpage(
        &self,
        parent: NodeId,
        handler: SubmitHandler,
        query: Option<&str>,
    ) -> Result<Option<JoinHandle<()>>, DomError> {
        let form = self.doc.with(|doc| {
            let heading = Element::new("h1")
                .class("heading")
                .child(self.messages.heading.as_str());
            let main = doc.append(
                parent,
                Element::new("main")
                    .attr(SEARCH_STATE_ATTR, SearchPhase::Idle.as_str())
                    .child(heading),
            )?;
            render_search_form(doc, main, handler, query, &self.messages)
        })?;
        tracing::debug!("Front page mounted");

        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return Ok(None);
        };

        let renderer = self.clone();
        let query = query.to_string();
        Ok(Some(tokio::spawn(async move {
            renderer.search_and_render(parent, form, &query).await;
        })))
    }

    /// Submit handler that searches for the form's `query` value.
    ///
    /// Each submit spawns a search on the current tokio runtime.
    pub fn search_handler(&self, parent: NodeId) -> SubmitHandler {
        let renderer = self.clone();
        Arc::new(move |event| {
            let query = event.value("query").unwrap_or_default().to_string();
            let form = event.form();
            let renderer = renderer.clone();
            tokio::spawn(async move {
                renderer.search_and_render(parent, form, &query).await;
            });
        })
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Run one search cycle and show its results under `<main>`.
    pub async fn search_and_render(&self, parent: NodeId, form: NodeId, query: &str) {
        let main = self.doc.with(|doc| {
            let main = doc.query_selector(parent, "main").ok().flatten()?;
            remove_results(doc, main);
            Some(main)
        });
        let Some(main) = main else {
            tracing::warn!("No <main> element under {:?} - skipping search", parent);
            return;
        };

        let token = self.session.lock().begin(query);
        self.show_phase(main, "loading");

        let guard = match LoadingGuard::enter(&self.doc, main, Some(form), &self.messages.loading) {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!("Failed to enter loading state: {}", e);
                None
            }
        };

        let results = match self.api.search_launches(query.to_string()).await {
            Ok(results) => Some(results),
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", query, e);
                None
            }
        };

        if !self.session.lock().is_current(token) {
            tracing::debug!("Discarding results for {:?}: a newer search started", query);
            if let Some(guard) = guard {
                guard.disarm();
            }
            return;
        }
        drop(guard);

        let list = search_results(results.as_deref(), query, &self.messages);
        let mounted = self.doc.with(|doc| {
            remove_results(doc, main);
            doc.append(main, list)
        });
        if let Err(e) = mounted {
            tracing::warn!("Failed to show results for {:?}: {}", query, e);
            return;
        }

        let mut session = self.session.lock();
        if session.finish(token, results.as_ref().map(Vec::len)) {
            let phase = session.phase().as_str();
            drop(session);
            self.show_phase(main, phase);
        }
    }

    fn show_phase(&self, main: NodeId, phase: &str) {
        if let Err(e) = self
            .doc
            .with(|doc| doc.set_attribute(main, SEARCH_STATE_ATTR, phase))
        {
            tracing::debug!("Failed to record search state: {}", e);
        }
    }

    // =========================================================================
    // Details
    // =========================================================================

    /// Mount a new `<main>` under `parent` with a back link, then fetch and
    /// show one launch.
    ///
    /// A launch that is missing or fails to load renders with placeholders.
    pub async fn render_details(&self, parent: NodeId, id: &LaunchId) -> Result<(), DomError> {
        let main = self.doc.with(|doc| {
            let main = doc.append(parent, Element::new("main"))?;
            doc.append(main, back_link(&self.messages))?;
            Ok::<_, DomError>(main)
        })?;

        let guard = LoadingGuard::enter(&self.doc, main, None, &self.messages.loading)?;
        let detail = match self.api.get_launch(id.clone()).await {
            Ok(Some(detail)) => Some(detail),
            Ok(None) => {
                tracing::info!("Launch {} not found", id);
                None
            }
            Err(e) => {
                tracing::warn!("Fetching launch {} failed: {}", id, e);
                None
            }
        };
        drop(guard);

        let list = launch_details(detail.as_ref(), &self.messages);
        self.doc.with(|doc| doc.append(main, list))?;
        Ok(())
    }
}

/// Remove every results list under `main`.
fn remove_results(doc: &mut launch_dom::Document, main: NodeId) {
    for list in doc.query_selector_all(main, "ul.results").unwrap_or_default() {
        if let Err(e) = doc.remove(list) {
            tracing::debug!("Results list already gone: {}", e);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use crate::api::MockLaunchApi;
    use launch_core::{ApiError, LaunchDetail, LaunchStatus, LaunchSummary, Mission};
    use launch_dom::Document;
    use std::time::Duration;

    fn apollo() -> Vec<LaunchSummary> {
        vec![
            LaunchSummary::new("1", "Apollo 1").with_mission(Mission::new("Mercury", "First")),
            LaunchSummary::new("2", "Apollo 2").with_mission(Mission::new("Gemini", "Second")),
        ]
    }

    fn noop_handler() -> SubmitHandler {
        Arc::new(|_| {})
    }

    fn renderer(api: impl LaunchApi + 'static) -> Renderer {
        Renderer::new(Arc::new(api), SharedDocument::new(), Messages::default())
    }

    /// Mount the front page without an initial search; returns (body, form).
    fn mount(renderer: &Renderer) -> (NodeId, NodeId) {
        let body = renderer.document().body();
        let pending = renderer
            .render_frontpage(body, noop_handler(), None)
            .unwrap();
        assert!(pending.is_none());
        let form = renderer
            .document()
            .with(|doc| doc.query_selector(body, "form").unwrap().unwrap());
        (body, form)
    }

    fn result_lists(doc: &Document) -> Vec<NodeId> {
        doc.query_selector_all(doc.body(), "ul.results").unwrap()
    }

    fn is_loading(doc: &Document) -> bool {
        let body = doc.body();
        doc.query_selector(body, ".loading").unwrap().is_some()
            || doc.query_selector(body, "button[disabled]").unwrap().is_some()
    }

    async fn wait_for_results(renderer: &Renderer) {
        for _ in 0..100 {
            let done = renderer
                .document()
                .with(|doc| !result_lists(doc).is_empty() && !is_loading(doc));
            if done {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("search did not finish");
    }

    #[test]
    fn test_frontpage_structure() {
        let renderer = renderer(StubApi::new());
        let (body, _form) = mount(&renderer);

        let html = renderer.document().with(|doc| doc.inner_html(body));
        insta::assert_snapshot!(
            html,
            @r#"<main data-search-state="idle"><h1 class="heading">Launch search 🚀</h1><form><input name="query" value=""><button>Search</button></form></main>"#
        );
        assert_eq!(renderer.search_phase(), SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_apollo_scenario() {
        let mut api = MockLaunchApi::new();
        api.expect_search_launches()
            .withf(|query| query == "apollo")
            .times(1)
            .returning(|_| Box::pin(async { Ok(apollo()) }));
        let renderer = renderer(api);
        let (body, form) = mount(&renderer);

        renderer.search_and_render(body, form, "apollo").await;

        renderer.document().with(|doc| {
            let lists = result_lists(doc);
            assert_eq!(lists.len(), 1);
            let items = doc.query_selector_all(lists[0], "li.result").unwrap();
            assert_eq!(items.len(), 2);

            let links = doc.query_selector_all(lists[0], "a").unwrap();
            assert_eq!(doc.attribute(links[0], "href"), Some("/?id=1"));
            assert_eq!(doc.attribute(links[1], "href"), Some("/?id=2"));

            let missions = doc.query_selector_all(lists[0], "span.mission").unwrap();
            assert!(doc.text_content(missions[0]).contains("Mercury"));
            assert!(doc.text_content(missions[1]).contains("Gemini"));

            assert!(!is_loading(doc));
            let main = doc.query_selector(body, "main").unwrap().unwrap();
            assert_eq!(doc.attribute(main, SEARCH_STATE_ATTR), Some("loaded"));
        });
        assert_eq!(
            renderer.search_phase(),
            SearchPhase::Loaded {
                query: "apollo".to_string(),
                count: 2
            }
        );
    }

    #[tokio::test]
    async fn test_failed_search_shows_error_and_clears_loading() {
        let mut api = MockLaunchApi::new();
        api.expect_search_launches().returning(|_| {
            Box::pin(async { Err(ApiError::Transport("connection refused".to_string())) })
        });
        let renderer = renderer(api);
        let (body, form) = mount(&renderer);

        renderer.search_and_render(body, form, "moon").await;

        renderer.document().with(|doc| {
            let lists = result_lists(doc);
            assert_eq!(lists.len(), 1);
            assert_eq!(doc.text_content(lists[0]), "Error while searching for moon");
            assert!(!is_loading(doc));
        });
        assert_eq!(
            renderer.search_phase(),
            SearchPhase::Errored {
                query: "moon".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_sequential_searches_keep_one_list() {
        let api = StubApi::new()
            .with_results("moon", vec![LaunchSummary::new("1", "Luna 2")])
            .with_results("mars", vec![LaunchSummary::new("2", "Mars 3")]);
        let renderer = renderer(api);
        let (body, form) = mount(&renderer);

        renderer.search_and_render(body, form, "moon").await;
        renderer.search_and_render(body, form, "mars").await;

        renderer.document().with(|doc| {
            let lists = result_lists(doc);
            assert_eq!(lists.len(), 1);
            assert!(doc.text_content(lists[0]).contains("Mars 3"));
            assert!(!doc.text_content(lists[0]).contains("Luna 2"));
        });
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = StubApi::new()
            .with_results("moon", vec![LaunchSummary::new("1", "Luna 2")])
            .with_delay("moon", Duration::from_millis(50))
            .with_results("mars", vec![LaunchSummary::new("2", "Mars 3")]);
        let renderer = renderer(api);
        let (body, form) = mount(&renderer);

        // Both searches overlap; the older one resolves last.
        tokio::join!(
            renderer.search_and_render(body, form, "moon"),
            renderer.search_and_render(body, form, "mars"),
        );

        renderer.document().with(|doc| {
            let lists = result_lists(doc);
            assert_eq!(lists.len(), 1);
            assert!(doc.text_content(lists[0]).contains("Mars 3"));
            assert!(!is_loading(doc));
        });
        assert_eq!(
            renderer.search_phase(),
            SearchPhase::Loaded {
                query: "mars".to_string(),
                count: 1
            }
        );
    }

    #[tokio::test]
    async fn test_stale_response_does_not_end_newer_loading() {
        let api = StubApi::new()
            .with_delay("mars", Duration::from_millis(100))
            .with_results("mars", vec![LaunchSummary::new("2", "Mars 3")]);
        let renderer = renderer(api);
        let (body, form) = mount(&renderer);

        let newer = renderer.clone();
        let mars = tokio::spawn(async move { newer.search_and_render(body, form, "mars").await });
        tokio::task::yield_now().await;

        // A newer search takes over while "mars" is in flight.
        renderer.session.lock().begin("venus");
        renderer.document().with(|doc| assert!(is_loading(doc)));

        mars.await.unwrap();
        // "mars" is stale: nothing is mounted and loading stays on for "venus".
        renderer.document().with(|doc| {
            assert!(result_lists(doc).is_empty());
            assert!(is_loading(doc));
        });
    }

    #[tokio::test]
    async fn test_empty_query_is_forwarded() {
        let mut api = MockLaunchApi::new();
        api.expect_search_launches()
            .withf(|query| query.is_empty())
            .times(1)
            .returning(|_| Box::pin(async { Ok(Vec::new()) }));
        let renderer = renderer(api);
        let (body, form) = mount(&renderer);

        renderer.search_and_render(body, form, "").await;

        renderer.document().with(|doc| {
            let lists = result_lists(doc);
            assert_eq!(doc.text_content(lists[0]), "No results for ");
        });
    }

    #[tokio::test]
    async fn test_missing_main_aborts() {
        let mut api = MockLaunchApi::new();
        api.expect_search_launches().never();
        let renderer = renderer(api);
        let body = renderer.document().body();
        let form = renderer
            .document()
            .with(|doc| doc.append(body, Element::new("form")).unwrap());

        renderer.search_and_render(body, form, "apollo").await;

        renderer.document().with(|doc| {
            assert!(result_lists(doc).is_empty());
            assert!(!is_loading(doc));
        });
        assert_eq!(renderer.search_phase(), SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_frontpage_with_query_searches() {
        let api = StubApi::new().with_results("apollo", apollo());
        let renderer = renderer(api);
        let body = renderer.document().body();

        let pending = renderer
            .render_frontpage(body, noop_handler(), Some("apollo"))
            .unwrap();

        // The form is mounted before the search runs.
        renderer.document().with(|doc| {
            let input = doc.query_selector(body, "input").unwrap().unwrap();
            assert_eq!(doc.attribute(input, "value"), Some("apollo"));
            assert!(result_lists(doc).is_empty());
        });

        pending.expect("search should be spawned").await.unwrap();
        renderer.document().with(|doc| {
            let lists = result_lists(doc);
            assert_eq!(doc.query_selector_all(lists[0], "li").unwrap().len(), 2);
        });
    }

    #[tokio::test]
    async fn test_frontpage_with_empty_query_does_not_search() {
        let mut api = MockLaunchApi::new();
        api.expect_search_launches().never();
        let renderer = renderer(api);
        let body = renderer.document().body();

        let pending = renderer
            .render_frontpage(body, noop_handler(), Some(""))
            .unwrap();
        assert!(pending.is_none());
    }

    #[tokio::test]
    async fn test_disabled_button_blocks_second_submit() {
        let api = Arc::new(
            StubApi::new()
                .with_results("moon", vec![LaunchSummary::new("1", "Luna 2")])
                .with_delay("moon", Duration::from_millis(30)),
        );
        let renderer = Renderer::new(api.clone(), SharedDocument::new(), Messages::default());
        let doc = renderer.document().clone();
        let body = doc.body();
        renderer
            .render_frontpage(body, renderer.search_handler(body), None)
            .unwrap();
        let button = doc.with(|doc| {
            let input = doc.query_selector(body, "input").unwrap().unwrap();
            doc.set_attribute(input, "value", "moon").unwrap();
            doc.query_selector(body, "button").unwrap().unwrap()
        });

        assert!(doc.click(button).unwrap());
        tokio::task::yield_now().await;
        doc.with(|doc| assert!(is_loading(doc)));

        assert!(!doc.click(button).unwrap());

        wait_for_results(&renderer).await;
        assert_eq!(api.calls(), vec!["moon".to_string()]);
        doc.with(|doc| assert_eq!(result_lists(doc).len(), 1));
    }

    #[tokio::test]
    async fn test_details_render() {
        let mut api = MockLaunchApi::new();
        api.expect_get_launch()
            .withf(|id| id.0 == "abc")
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(Some(LaunchDetail {
                        name: Some("Electron".to_string()),
                        status: Some(LaunchStatus {
                            name: Some("Success".to_string()),
                            description: None,
                        }),
                        image: Some("https://example.com/e.png".to_string()),
                        ..Default::default()
                    }))
                })
            });
        let renderer = renderer(api);
        let body = renderer.document().body();

        renderer
            .render_details(body, &LaunchId::from("abc"))
            .await
            .unwrap();

        renderer.document().with(|doc| {
            let main = doc.query_selector(body, "main").unwrap().unwrap();
            let children = doc.children(main).to_vec();
            assert_eq!(children.len(), 2);
            assert_eq!(doc.attribute(children[0], "class"), Some("back"));
            assert_eq!(doc.attribute(children[1], "class"), Some("launch"));

            let text = doc.text_content(children[1]);
            assert!(text.starts_with("Electron"));
            assert!(text.contains("Status: Success"));
            assert!(doc.query_selector(main, "img").unwrap().is_some());
            assert!(!is_loading(doc));
        });
    }

    #[tokio::test]
    async fn test_details_for_missing_launch_degrades() {
        let mut api = MockLaunchApi::new();
        api.expect_get_launch()
            .returning(|_| Box::pin(async { Ok(None) }));
        let renderer = renderer(api);
        let body = renderer.document().body();

        renderer
            .render_details(body, &LaunchId::from("nope"))
            .await
            .unwrap();

        renderer.document().with(|doc| {
            let back = doc.query_selector(body, "div.back").unwrap().unwrap();
            assert_eq!(doc.text_content(back), "Back");

            let list = doc.query_selector(body, "ul.launch").unwrap().unwrap();
            let items = doc.children(list).to_vec();
            assert_eq!(items.len(), 8);
            let text = doc.text_content(list);
            assert!(text.contains("Unknown"));
            assert!(!text.contains("undefined"));
            assert!(!is_loading(doc));
        });
    }

    #[tokio::test]
    async fn test_details_failure_matches_not_found() {
        let mut failing = MockLaunchApi::new();
        failing.expect_get_launch().returning(|_| {
            Box::pin(async {
                Err(ApiError::Status {
                    status: 500,
                    url: "http://localhost/launch/x/".to_string(),
                })
            })
        });
        let failing = renderer(failing);

        let missing = renderer(StubApi::new());

        for renderer in [&failing, &missing] {
            let body = renderer.document().body();
            renderer
                .render_details(body, &LaunchId::from("x"))
                .await
                .unwrap();
        }

        assert_eq!(failing.document().to_html(), missing.document().to_html());
    }
}
