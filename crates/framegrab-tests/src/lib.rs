//! Integration test crate for FrameGrab.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It drives frames through `framegrab-core` ingestion and
//! `framegrab-color` conversion together.

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod properties;

#[cfg(test)]
mod concurrency;
