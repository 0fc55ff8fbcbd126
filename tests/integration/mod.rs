//! Integration Tests Module
//!
//! End-to-end tests that drive the HTTP host with real CloudEvent requests
//! and capture outbound webhook calls on a local fake Discord endpoint.

// Fake webhook endpoint and request builders
mod support;

// Ingress modes and status codes
mod host_test;

// Discord relay delivery, end to end
mod relay_test;
