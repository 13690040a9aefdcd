//! Data models for the import-source service

pub mod source;

pub use source::{
    ImportOutcome, ImportRequest, ImportResponse, Source, SourceEnvelope, SourceStatus,
};
