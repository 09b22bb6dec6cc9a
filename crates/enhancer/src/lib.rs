//! Business Central OpenAPI enhancement pipeline
//!
//! Turns the baseline OpenAPI document produced by an EDMX converter into a
//! deployable API description: info metadata, sandbox/production servers,
//! an OAuth2 client-credentials scheme, company parameter and path cleanup,
//! and a schema section pruned to what the paths actually reference.

pub mod audit;
pub mod company;
pub mod document;
pub mod error;
pub mod info;
pub mod navigation;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod refs;
pub mod security;
pub mod servers;
pub mod writer;

pub use document::OpenApiDocument;
pub use error::{EnhanceError, EnhanceResult};
pub use options::EnhanceOptions;
pub use pipeline::{EnhancementReport, Pipeline, RunSummary};
pub use writer::{content_digest, to_canonical_bytes, write_document, WrittenDocument};
