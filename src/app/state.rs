//! Roster state container.
//!
//! [`RosterState`] owns every piece of transient state for one resource view:
//! the fetched collection, the presentation criteria, the pager, the row menu,
//! the moderation workflow, the error banner, and the activity feed. It is
//! mutated only by the event handler, on one thread; the visible list is
//! derived on demand by the pipeline rather than cached.

use crate::app::log_feed::LogFeed;
use crate::app::menu::RowMenuController;
use crate::app::moderation::ModerationWorkflow;
use crate::app::pagination::PaginationCursor;
use crate::app::pipeline;
use crate::app::view::ViewState;
use crate::domain::record::{RosterRecord, Viewable};
use crate::remote::api::PageQuery;
use crate::store::ResourceStore;

/// Which part of the system a banner's failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// A fetch failed; the previous collection is still shown.
    Fetch,
    /// A mutation was rejected; the optimistic change was rolled back.
    Mutation,
    /// An action required a credential that is absent.
    Auth,
}

/// Dismissable error surface. Failures are presented, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

/// All state for one resource's roster view.
#[derive(Debug, Clone)]
pub struct RosterState<R> {
    /// Authoritative in-memory collection.
    pub store: ResourceStore<R>,

    /// Presentation criteria the pipeline reads.
    pub view: ViewState,

    /// Cursor-based pager.
    pub pager: PaginationCursor,

    /// Single open row menu.
    pub menu: RowMenuController,

    /// Confirmation gate and in-flight mutation ledger.
    pub moderation: ModerationWorkflow<R>,

    /// Current error banner, if any.
    pub banner: Option<Banner>,

    /// Whether a fetch is outstanding.
    pub loading: bool,

    /// Recent activity, bounded.
    pub feed: LogFeed,
}

impl<R: RosterRecord> RosterState<R> {
    /// Creates an empty state with the given page size and activity feed
    /// capacity.
    #[must_use]
    pub fn new(page_size: usize, feed_capacity: usize) -> Self {
        Self {
            store: ResourceStore::new(),
            view: ViewState::default(),
            pager: PaginationCursor::new(page_size),
            menu: RowMenuController::new(),
            moderation: ModerationWorkflow::new(),
            banner: None,
            loading: false,
            feed: LogFeed::new(feed_capacity),
        }
    }

    /// Raises a banner, replacing any previous one.
    pub fn raise_banner(&mut self, kind: BannerKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(kind = ?kind, message = %message, "raising banner");
        self.banner = Some(Banner { kind, message });
    }
}

impl<R: Viewable> RosterState<R> {
    /// The visible, ordered list derived from the store and the view
    /// criteria.
    #[must_use]
    pub fn filtered(&self) -> Vec<R> {
        pipeline::apply(self.store.records(), &self.view)
    }

    /// Fetch query for the pager's current page, with the cursor read from
    /// the current filtered view.
    #[must_use]
    pub fn page_query(&self) -> PageQuery {
        self.pager.query(self.store.records(), &self.view)
    }
}
