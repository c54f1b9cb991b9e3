//! Core data model and merge pipeline for the tokenforge design-token generator

pub mod alias;
pub mod discovery;
pub mod document;
pub mod error;
pub mod merge;
pub mod naming;
pub mod pipeline;
pub mod registry;
pub mod snapshot;

pub use document::{TokenDocument, TokenNode, TokenTree, TokenTreeNode};
pub use error::TokenError;
pub use pipeline::{generate, GenerateOptions};
pub use registry::CollectionRegistry;
pub use snapshot::Baseline;
