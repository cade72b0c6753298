//! Integration tests: HTTP router, provider clients and the insight flow

mod api_tests;
mod provider_tests;
