//! Generic screen controller
//!
//! A screen binds one list query to one rendered list. The controller walks
//! `Idle -> Loading -> Loaded | Failed` and tags every fetch it issues with a
//! sequence number. A result is applied only if it belongs to the latest
//! fetch, so a slow response can never overwrite a newer one.

use app_state::{ErrorInfo, FetchPolicy, QueryHandle, QueryResult, RemoteDataClient};
use graphql_client::QueryDefinition;
use std::marker::PhantomData;

use crate::components::{BodyView, HeaderView, RowView, ScreenView, SearchFieldView};
use crate::navigation::TabRoute;
use crate::theme::{Palette, ThemeSnapshot};

/// Entity type listed by a screen
pub type ItemOf<S> = <<S as ScreenSpec>::Query as QueryDefinition>::Item;

/// What makes one screen different from another
pub trait ScreenSpec: Send + Sync + 'static {
    /// Query the screen lists
    type Query: QueryDefinition + Default;

    /// Header title
    const TITLE: &'static str;

    /// Tab hosting the screen
    const TAB: TabRoute;

    /// Placeholder of the search field; `None` for screens without one
    const SEARCH_PLACEHOLDER: Option<&'static str> = None;

    /// Identity of a row
    fn row_key(item: &ItemOf<Self>) -> String;

    /// Render one row
    fn render_row(item: &ItemOf<Self>, palette: &Palette) -> RowView;

    /// Text the search field matches against
    fn search_text(_item: &ItemOf<Self>) -> Option<&str> {
        None
    }
}

/// Controller state
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<T> {
    /// Mounted, nothing requested
    Idle,
    /// Waiting for the latest fetch
    Loading {
        /// Rows of the last load, kept on screen until the result arrives
        previous: Option<Vec<T>>,
    },
    /// Rows in response order
    Loaded(Vec<T>),
    /// The latest fetch failed
    Failed(ErrorInfo),
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        ScreenState::Idle
    }
}

impl<T> ScreenState<T> {
    /// Short state name
    pub fn name(&self) -> &'static str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::Loading { .. } => "loading",
            ScreenState::Loaded(_) => "loaded",
            ScreenState::Failed(_) => "failed",
        }
    }
}

/// A fetch issued by a controller
#[derive(Debug)]
pub struct FetchTicket<T> {
    seq: u64,
    handle: QueryHandle<T>,
}

impl<T: Clone> FetchTicket<T> {
    /// Sequence number of this fetch
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Result so far, without waiting
    pub fn current(&self) -> QueryResult<Vec<T>> {
        self.handle.current()
    }

    /// Wait for the result
    pub async fn resolve(self) -> Resolved<T> {
        Resolved {
            seq: self.seq,
            result: self.handle.resolved().await,
        }
    }
}

/// A settled fetch, ready to apply
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// Sequence number of the fetch
    pub seq: u64,
    /// Its result
    pub result: QueryResult<Vec<T>>,
}

/// Data binding and render state of one screen
pub struct ScreenController<S: ScreenSpec> {
    state: ScreenState<ItemOf<S>>,
    issued: u64,
    search: String,
    _spec: PhantomData<S>,
}

impl<S: ScreenSpec> std::fmt::Debug for ScreenController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenController")
            .field("screen", &S::TITLE)
            .field("state", &self.state)
            .field("issued", &self.issued)
            .field("search", &self.search)
            .finish()
    }
}

impl<S: ScreenSpec> Default for ScreenController<S> {
    fn default() -> Self {
        Self {
            state: ScreenState::Idle,
            issued: 0,
            search: String::new(),
            _spec: PhantomData,
        }
    }
}

impl<S: ScreenSpec> ScreenController<S> {
    /// Mount a screen in `Idle`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> &ScreenState<ItemOf<S>> {
        &self.state
    }

    /// Sequence number of the latest fetch
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Issue the screen's query and enter `Loading`
    ///
    /// Rows already loaded stay visible until the new result is applied.
    pub fn begin_fetch(
        &mut self,
        client: &RemoteDataClient,
        policy: FetchPolicy,
    ) -> FetchTicket<ItemOf<S>> {
        self.issued += 1;

        let previous = match std::mem::take(&mut self.state) {
            ScreenState::Loaded(rows) => Some(rows),
            ScreenState::Loading { previous } => previous,
            ScreenState::Idle | ScreenState::Failed(_) => None,
        };
        self.state = ScreenState::Loading { previous };

        FetchTicket {
            seq: self.issued,
            handle: client.execute_with(S::Query::default(), policy),
        }
    }

    /// Apply a settled fetch
    ///
    /// Returns `false` if the result was discarded because a later fetch
    /// has been issued since.
    pub fn apply(&mut self, resolved: Resolved<ItemOf<S>>) -> bool {
        if resolved.seq != self.issued {
            tracing::debug!(
                screen = S::TITLE,
                seq = resolved.seq,
                latest = self.issued,
                "Discarding stale response"
            );
            return false;
        }

        match resolved.result {
            QueryResult::Pending => return false,
            QueryResult::Success(rows) => self.state = ScreenState::Loaded(rows),
            QueryResult::Error(error) => {
                tracing::warn!("{} failed to load: {}", S::TITLE, error);
                self.state = ScreenState::Failed(error);
            }
        }
        true
    }

    /// Fetch with the client's default policy and apply the result
    pub async fn load(&mut self, client: &RemoteDataClient) -> &ScreenState<ItemOf<S>> {
        let policy = client.config().default_policy;
        self.fetch_and_apply(client, policy).await
    }

    /// Fetch from the network and apply the result
    pub async fn refetch(&mut self, client: &RemoteDataClient) -> &ScreenState<ItemOf<S>> {
        self.fetch_and_apply(client, FetchPolicy::NetworkOnly).await
    }

    async fn fetch_and_apply(
        &mut self,
        client: &RemoteDataClient,
        policy: FetchPolicy,
    ) -> &ScreenState<ItemOf<S>> {
        let ticket = self.begin_fetch(client, policy);
        let resolved = ticket.resolve().await;
        self.apply(resolved);
        &self.state
    }

    /// Current search text
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Update the search text
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Rows that pass the search filter
    ///
    /// Matching is a case-insensitive substring test. Screens without a
    /// search field, or an empty search, show everything.
    pub fn filter<'a>(&self, rows: &'a [ItemOf<S>]) -> Vec<&'a ItemOf<S>> {
        if S::SEARCH_PLACEHOLDER.is_none() || self.search.is_empty() {
            return rows.iter().collect();
        }

        let needle = self.search.to_lowercase();
        rows.iter()
            .filter(|item| {
                S::search_text(item)
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Render the screen for a theme
    pub fn render(&self, theme: &ThemeSnapshot) -> ScreenView {
        let palette = theme.theme.palette;
        let rows = |items: &[ItemOf<S>]| -> Vec<RowView> {
            self.filter(items)
                .into_iter()
                .map(|item| S::render_row(item, &palette))
                .collect()
        };

        let body = match &self.state {
            ScreenState::Idle => BodyView::Idle,
            ScreenState::Loading { previous } => BodyView::Busy {
                stale_rows: previous.as_deref().map(rows).unwrap_or_default(),
            },
            ScreenState::Loaded(items) => BodyView::Rows { rows: rows(items) },
            ScreenState::Failed(error) => BodyView::Failed {
                message: error.message.clone(),
            },
        };

        ScreenView {
            screen_id: S::TAB.screen_id(),
            header: HeaderView::new(S::TITLE, theme),
            search: S::SEARCH_PLACEHOLDER.map(|placeholder| SearchFieldView {
                placeholder: placeholder.to_string(),
                value: self.search.clone(),
            }),
            body,
        }
    }
}
