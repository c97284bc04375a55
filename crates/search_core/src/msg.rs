#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box.
    InputChanged(String),
    /// User submitted the current search box contents.
    Submitted,
    /// User asked for the next page of the active search.
    LoadMoreClicked,
    /// User dismissed a single hit from the active results.
    DismissClicked(String),
    /// Restore the last searched term from a previous session.
    RestoreSearchTerm(String),
    /// A page fetch completed.
    FetchSucceeded(crate::PageResult),
    /// A page fetch failed or was cancelled.
    FetchFailed {
        key: String,
        reason: FailureReason,
    },
    /// Session is being torn down.
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Cancelled,
    Network(String),
}
