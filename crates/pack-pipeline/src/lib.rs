//! Pack assembly pipeline.
//!
//! Assembles N independently versioned extensions into one distributable
//! pack package. Stages run as a strict pipeline: the remote fetcher,
//! then the publisher, then the manifest merger, asset synchronizer, and
//! source generator (concurrently, over disjoint outputs), and finally
//! the pack manifest customizer, which must see the merged manifest
//! before layering pack-level overrides on top.

pub mod assets;
pub mod codegen;
pub mod config;
pub mod customizer;
pub mod descriptor;
pub mod error;
pub mod fetcher;
pub mod merger;
pub mod pipeline;
pub mod publisher;
pub mod report;
pub mod settle;

pub use config::{OtherEntry, PackConfig, PublishableEntry};
pub use descriptor::{ExtensionDescriptor, PublishedExtensionRecord};
pub use error::{Error, ItemFailure, Result};
pub use pipeline::Pipeline;
pub use report::RunReport;
pub use settle::{partition, settle_all};
