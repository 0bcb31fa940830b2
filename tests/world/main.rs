//! Integration tests for Layer 2: World
//!
//! Tests for the SRF container: round trips, header checks, section
//! handling, and editing a world on disk.

mod container;
mod editing;
mod round_trip;
