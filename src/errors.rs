use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("requested {requested} nodes, limit is {limit}")]
    NodeLimitExceeded { requested: usize, limit: usize },

    #[error("{side} child slot is already occupied")]
    SlotOccupied { side: &'static str },

    #[error("node index no longer refers to a live node")]
    StaleIndex,

    #[error("tree height {height} exceeds the recursion limit {limit}")]
    RecursionLimit { height: usize, limit: usize },

    #[error("unreadable token {token:?}: {reason}")]
    ParseToken { token: String, reason: String },

    #[error("serialization ended before the tree was complete")]
    TruncatedInput,

    #[error("{count} tokens left over after the root subtree closed")]
    TrailingTokens { count: usize },

    #[error("invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("could not render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;
