//! Mock Security and Compliance Center server.
//!
//! Provides an axum-based HTTP server that simulates the v3 API on both the
//! account and the instance surface.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, ApiError, SharedState};
use super::state::MockState;

/// A mock Security and Compliance Center server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as the service URL of an `SccClient`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for library in scenario.control_libraries {
            state = state.with_control_library(library);
        }

        for profile in scenario.profiles {
            state = state.with_profile(profile);
        }

        for attachment in scenario.attachments {
            state = state.with_attachment(attachment);
        }

        state.settings = scenario.settings;
        state
    }

    /// Routes of one API surface, relative to its `.../v3` prefix.
    fn api_routes() -> Router<SharedState> {
        Router::new()
            // Control library routes
            .route(
                "/control_libraries",
                get(handlers::list_control_libraries).post(handlers::create_control_library),
            )
            .route(
                "/control_libraries/:library_id",
                get(handlers::get_control_library)
                    .put(handlers::replace_control_library)
                    .delete(handlers::delete_control_library),
            )
            // Profile routes
            .route(
                "/profiles",
                get(handlers::list_profiles).post(handlers::create_profile),
            )
            .route(
                "/profiles/:profile_id",
                get(handlers::get_profile)
                    .put(handlers::replace_profile)
                    .delete(handlers::delete_profile),
            )
            // Attachment routes
            .route(
                "/profiles/:profile_id/attachments",
                get(handlers::list_profile_attachments).post(handlers::create_attachments),
            )
            .route(
                "/profiles/:profile_id/attachments/:attachment_id",
                get(handlers::get_profile_attachment)
                    .put(handlers::replace_profile_attachment)
                    .delete(handlers::delete_profile_attachment),
            )
            .route("/attachments", get(handlers::list_all_attachments))
            // Scans and settings
            .route("/scans", post(handlers::create_scan))
            .route(
                "/settings",
                get(handlers::get_settings).patch(handlers::update_settings),
            )
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .nest("/api/v3", Self::api_routes())
            .nest("/instances/:instance_id/v3", Self::api_routes())
            // Health check
            .route("/health", get(health_check))
            .fallback(unknown_route)
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

async fn unknown_route() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found", "no such route")
}
