//! End-to-end tests for the Lamore storefront API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, migrate, seed, and run the server:
//! cargo run -p lamore-cli -- migrate
//! cargo run -p lamore-cli -- seed
//! cargo run -p lamore-server
//!
//! # Then, in another shell:
//! cargo test -p lamore-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running server
//! and database. `LAMORE_TEST_BASE_URL` overrides the default target of
//! `http://localhost:3000`.

use reqwest::Client;

/// Shared context for API tests: a cookie-holding client plus the target URL.
///
/// Each context gets its own cookie jar, so tests don't share sessions.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Create a context pointed at the server under test.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("LAMORE_TEST_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        Self { client, base_url }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A unique throwaway email for registration tests.
    #[must_use]
    pub fn unique_email(prefix: &str) -> String {
        format!("{prefix}-{}@test.example", uuid::Uuid::new_v4())
    }

    /// Register a fresh user and leave its session in the cookie jar.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the server rejects the registration.
    pub async fn register(&self, email: &str, name: &str, password: &str) {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "name": name,
                "password": password,
            }))
            .send()
            .await
            .expect("register request failed");

        assert_eq!(resp.status(), 201, "registration should succeed");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
