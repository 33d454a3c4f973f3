//! # Teamnet Roster
//!
//! Loading and querying the people table a relationship graph is built from.
//!
//! ## Architecture
//!
//! ```text
//! CSV table (file or built-in sample)
//!     │
//!     ├──> Roster Loader
//!     │      ├─ Match headers to attributes (aliases, trimming)
//!     │      ├─ Check required columns
//!     │      └─ Keep unknown columns as extras
//!     │
//!     ├──> Roster (people in table order, indexed by handle)
//!     │      ├─ Personality filter (with fallback)
//!     │      └─ Name / handle search
//!     │
//!     └──> Analytics
//!            ├─ Composition (personality mix, generations, diversity)
//!            ├─ Poster layout by department
//!            └─ Image resolution (data URLs, misses)
//! ```

mod composition;
mod error;
mod filter;
mod images;
mod loader;
pub mod normalize;
mod sample;
mod types;

pub use composition::{
    analyze, axis_ratios, department_generations, department_ratios, diversity,
    generation_counts, join_year_counts, personality_counts, poster, shannon_entropy,
    CompositionConfig, DEFAULT_EXCLUDED_DEPARTMENTS,
};
pub use error::{Result, RosterError};
pub use filter::{AxisFilter, FilterOutcome, PersonalityFilter};
pub use images::{ImageRef, ImageReport, ImageResolver, PLACEHOLDER_IMAGE_URL};
pub use loader::RosterLoader;
pub use sample::SAMPLE_ROSTER_CSV;
pub use types::{Attribute, Person, Roster};
