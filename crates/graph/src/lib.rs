//! # Teamnet Graph
//!
//! Relationship graph over a team: who shares which attributes with whom.
//!
//! ## Features
//!
//! - **Pairwise scoring** - count shared attributes per pair (absent never matches)
//! - **Team graph** - weighted undirected edges over petgraph
//! - **Similar people** - top matches per person over the whole roster
//! - **Centrality** - degree, betweenness, closeness, eigenvector
//! - **Document assembly** - nodes, edges and side panels for the renderer
//!
//! ## Architecture
//!
//! ```text
//! Roster
//!     │
//!     ├──> Pair Scorer
//!     │      ├─ Normalize years
//!     │      ├─ Compare enabled attributes
//!     │      └─ Emit match records (score + reasons)
//!     │
//!     ├──> Team Graph (petgraph)
//!     │      ├─ Nodes: people, table order
//!     │      └─ Edges: non-zero matches
//!     │
//!     └──> Document Assembler
//!            ├─ Style nodes and edges, layout hint
//!            ├─ Similar lists, peer counts, chemistry
//!            └─ Centrality and composition analytics
//! ```

mod assembler;
mod builder;
pub mod centrality;
mod compare;
mod config;
mod error;
mod graph;
mod scorer;
mod similar;
mod stats;
pub mod style;
mod types;

pub use assembler::{AssembledNetwork, AssemblyRequest, DocumentAssembler};
pub use builder::GraphBuilder;
pub use centrality::EigenvectorConfig;
pub use compare::{valid_equal, EdgeKind, FALLBACK_EDGE_COLOR};
pub use config::{
    EdgeToggles, LayoutConfig, NetworkConfig, SizingConfig, BASE_NODE_SIZE_RANGE,
    DEGREE_SCALE_RANGE,
};
pub use error::{GraphError, Result};
pub use graph::Neighbor;
pub use scorer::{MatchRecord, PairScorer};
pub use similar::{SimilarEntry, SimilarityIndex, CHEMISTRY_TOP};
pub use stats::PeerCounts;
pub use types::{GraphEdge, GraphNode, TeamGraph};
