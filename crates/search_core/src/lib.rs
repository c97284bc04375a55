//! Search core: pure session state machine, result cache and view-model helpers.
mod cache;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use cache::{CacheEntry, Hit, PageResult, ResultCache};
pub use effect::Effect;
pub use msg::{FailureReason, Msg};
pub use state::{AppState, SessionState, DEFAULT_QUERY};
pub use update::update;
pub use view_model::{project, AppViewModel};
