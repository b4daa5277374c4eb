//! erdgen Core Types and Definitions
//!
//! This crate provides the foundational types shared by the erdgen model
//! extractor and class synthesizer. It includes:
//!
//! - **Identifiers**: String-interned cell identifiers ([`identifier::Id`])
//! - **Spans**: Byte ranges into the source document ([`span::Span`])
//! - **Graph**: The raw, schema-less node/edge graph ([`graph`] module)
//! - **Model**: The intermediate representation handed to synthesis ([`model`] module)

pub mod graph;
pub mod identifier;
pub mod model;
pub mod span;
