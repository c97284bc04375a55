#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page of results for an exact search key.
    FetchPage { key: String, page: u32 },
    /// Remember the submitted term for the next session.
    PersistSearchTerm(String),
    /// Cancel every outstanding request.
    CancelAll,
}
