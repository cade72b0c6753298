//! Unit tests against the public library API

mod growth_tests;
mod insight_request_tests;
