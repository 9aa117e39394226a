//! Mock Security and Compliance Center server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the v3 API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use sccapi::mock_server::MockServer;
//! use sccapi::{GetControlLibraryOptions, SccClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = SccClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let response = client
//!         .account()
//!         .get_control_library(&GetControlLibraryOptions::new("cl-123"))
//!         .await
//!         .unwrap();
//!     assert_eq!(response.status_code, 200);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
