//! Generation Client Unit Tests
//!
//! Uses wiremock for HTTP mocking to test:
//! - Request formatting (endpoint, API key header, schema, temperature)
//! - Response text extraction
//! - Status and empty-response errors
//! - Retry and timeout behaviour of the wrapper
