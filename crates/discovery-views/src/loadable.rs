//! The fetch state machine shared by every data-bound component.
//!
//! A component's region moves `Idle -> Loading -> Success | Failure`, with
//! `NotFound` as a separate outcome for detail lookups. Each load captures
//! a [`RequestToken`] from a generation counter; a result is committed only
//! if its token is still the latest and the component is still mounted.
//! Anything else is dropped silently, which is what makes out-of-order
//! responses and late responses after unmount harmless.
//!
//! State lives in a `RefCell` that is only borrowed for the duration of a
//! single transition, never across an `.await`.

use std::cell::RefCell;
use std::future::Future;

use discovery_cms::CmsError;
use discovery_types::{ArticleDetail, CategoryListing};
use serde::Serialize;
use tracing::{debug, warn};

/// Message shown in place of any failed region.
pub const FAILURE_MESSAGE: &str = "We couldn't load this section right now.";

/// The lifecycle of one component fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Loadable<T> {
    /// Not yet asked to load.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded (the payload may be empty).
    Success(T),
    /// The latest request failed; carries the user-facing message.
    Failure(String),
    /// A detail lookup found nothing.
    NotFound,
}

impl<T> Loadable<T> {
    /// Map a fetch result, treating every error as a failure.
    pub fn from_result(result: Result<T, CmsError>, region: &str) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => {
                warn!(region, error = %e, "region failed to load");
                Self::Failure(FAILURE_MESSAGE.to_owned())
            }
        }
    }

    /// Map a detail fetch result, keeping a 404 distinct from failure.
    pub fn from_detail_result(result: Result<T, CmsError>, region: &str) -> Self {
        match result {
            Err(e) if e.is_not_found() => {
                debug!(region, error = %e, "detail not found");
                Self::NotFound
            }
            other => Self::from_result(other, region),
        }
    }

    /// The payload, if the last load succeeded.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if the last load failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

impl<T: Presentable> Loadable<T> {
    /// The renderable status, splitting empty successes from populated ones.
    pub fn status(&self) -> RegionStatus {
        match self {
            Self::Idle => RegionStatus::Idle,
            Self::Loading => RegionStatus::Loading,
            Self::Success(data) if data.is_empty() => RegionStatus::Empty,
            Self::Success(_) => RegionStatus::Ready,
            Self::Failure(_) => RegionStatus::Failure,
            Self::NotFound => RegionStatus::NotFound,
        }
    }
}

/// What a region template should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionStatus {
    /// Nothing requested yet; drawn like loading.
    Idle,
    /// Loading placeholder.
    Loading,
    /// Successful but nothing to show.
    Empty,
    /// Successful with content.
    Ready,
    /// Error message with a retry affordance.
    Failure,
    /// Not-found message with a way home.
    NotFound,
}

/// Payloads that can be successfully empty.
pub trait Presentable {
    /// Whether a successful payload has nothing to show.
    fn is_empty(&self) -> bool;
}

impl<T> Presentable for Vec<T> {
    fn is_empty(&self) -> bool {
        <[T]>::is_empty(self)
    }
}

impl Presentable for CategoryListing {
    fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl Presentable for ArticleDetail {
    fn is_empty(&self) -> bool {
        false
    }
}

/// Identifies one load; only the latest token may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug)]
struct CellState<T> {
    state: Loadable<T>,
    generation: u64,
    mounted: bool,
}

/// A component's region state plus its race guard.
#[derive(Debug)]
pub struct LoadCell<T> {
    inner: RefCell<CellState<T>>,
}

impl<T> Default for LoadCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LoadCell<T> {
    /// A mounted, idle cell.
    pub const fn new() -> Self {
        Self {
            inner: RefCell::new(CellState {
                state: Loadable::Idle,
                generation: 0,
                mounted: true,
            }),
        }
    }

    /// Start a load: enter `Loading` and supersede every earlier token.
    ///
    /// An unmounted cell hands out a token but keeps its last state.
    pub fn begin(&self) -> RequestToken {
        let mut inner = self.inner.borrow_mut();
        inner.generation = inner.generation.wrapping_add(1);
        if inner.mounted {
            inner.state = Loadable::Loading;
        }
        RequestToken(inner.generation)
    }

    /// Commit `next` if `token` is still current and the cell is mounted.
    ///
    /// Returns whether the state changed. Stale and post-unmount settles
    /// are ignored.
    pub fn settle(&self, token: RequestToken, next: Loadable<T>) -> bool {
        let mut inner = self.inner.borrow_mut();
        if !inner.mounted {
            debug!(token = token.0, "dropping response for unmounted region");
            return false;
        }
        if token.0 != inner.generation {
            debug!(
                token = token.0,
                current = inner.generation,
                "dropping stale response"
            );
            return false;
        }
        inner.state = next;
        true
    }

    /// Stop accepting results. Any in-flight load becomes a no-op.
    pub fn unmount(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.mounted = false;
        inner.generation = inner.generation.wrapping_add(1);
    }

    /// Whether the cell still accepts results.
    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted
    }

    /// Inspect the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&Loadable<T>) -> R) -> R {
        f(&self.inner.borrow().state)
    }
}

impl<T: Clone> LoadCell<T> {
    /// A copy of the current state.
    pub fn snapshot(&self) -> Loadable<T> {
        self.with_state(Clone::clone)
    }
}

/// Run one guarded load: begin, await `fetch`, settle with the mapped result.
pub async fn load_into<T, Fut>(cell: &LoadCell<T>, region: &str, fetch: Fut) -> bool
where
    Fut: Future<Output = Result<T, CmsError>>,
{
    let token = cell.begin();
    let outcome = Loadable::from_result(fetch.await, region);
    cell.settle(token, outcome)
}
