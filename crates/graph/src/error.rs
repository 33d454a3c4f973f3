use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown edge kind: {0}")]
    UnknownEdgeKind(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error(transparent)]
    Roster(#[from] teamnet_roster::RosterError),
}

impl GraphError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
