//! Integration tests for Süt Sihirbazı.

mod api_test;
mod workflow_test;
