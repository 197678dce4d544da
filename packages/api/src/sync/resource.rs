use crate::error::ApiError;

/// What a view currently holds for one remote resource.
#[derive(Clone, Debug, PartialEq)]
pub enum Resource<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ApiError),
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Resource<T> {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading => Phase::Loading,
            Self::Loaded(_) => Phase::Loaded,
            Self::Failed(_) => Phase::Failed,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// [`Resource`] without its payload. Cheap to copy out of a signal before an
/// `.await`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Identifies one load. Only the newest ticket of a live cell may settle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// A [`Resource`] plus the bookkeeping that drops late responses.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceCell<T> {
    state: Resource<T>,
    latest: u64,
    discarded: bool,
}

impl<T> Default for ResourceCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceCell<T> {
    pub fn new() -> Self {
        Self {
            state: Resource::Idle,
            latest: 0,
            discarded: false,
        }
    }

    pub fn state(&self) -> &Resource<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Enter `Loading` and hand out the ticket the response must present.
    /// Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest += 1;
        self.state = Resource::Loading;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        !self.discarded && ticket.0 == self.latest
    }

    /// Settle the load identified by `ticket`. Returns `false` and leaves the
    /// cell untouched when the ticket is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<T, ApiError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "dropping stale response");
            return false;
        }
        self.state = match result {
            Ok(value) => Resource::Loaded(value),
            Err(err) => Resource::Failed(err),
        };
        true
    }

    /// The view went away; every outstanding ticket is now stale.
    pub fn discard(&mut self) {
        self.discarded = true;
    }
}
