//! Tree export entry points.
//!
//! # Responsibility
//! - Produce the de-internalized nested document handed to consumers.
//! - Keep the exported wire shape stable and diffable.

pub mod serializer;
