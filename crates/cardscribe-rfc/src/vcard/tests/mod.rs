//! Document-level tests for the vCard pipeline.

mod fixtures;
