pub mod chunker;
pub mod corpus;
pub mod fallback;
pub mod formatting;
pub mod keywords;
pub mod loader;
pub mod lookup;
pub mod pipeline;
pub mod ranker;
pub mod record;
pub mod sections;
pub mod types;


pub use corpus::Corpus;
pub use pipeline::{Pipeline, PipelineVariant};
pub use ranker::{FallbackReason, Ranker, Retrieval};
