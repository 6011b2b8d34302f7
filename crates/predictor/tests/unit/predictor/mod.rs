//! Tests for the top-level predictor.
