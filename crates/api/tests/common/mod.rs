#![allow(dead_code)]

use blog_api::config::AppConfig;
use blog_api::service::Service;
use blog_core::post::BlogPost;
use blog_core::seed;
use blog_core::store::SharedStore;

pub const SEEDED_POSTS: usize = 10;

fn test_service() -> Service {
    Service::new(AppConfig::for_tests().expect("test config should load"))
}

/// A running service seeded with fake posts. One per test case.
pub struct TestApp {
    pub service: Service,
    pub client: reqwest::Client,
    pub base_url: String,
    pub seeded: Vec<BlogPost>,
}

impl TestApp {
    /// Start on the configured test store (`TEST_DATABASE_URL`, else `memory://`).
    pub async fn spawn() -> Self {
        let service = test_service();
        let store_address = service.config().test_database_url.clone();
        Self::launch(service, &store_address).await
    }

    /// Start on an explicit store, regardless of `TEST_DATABASE_URL`.
    pub async fn spawn_with(store_address: &str) -> Self {
        Self::launch(test_service(), store_address).await
    }

    async fn launch(mut service: Service, store_address: &str) -> Self {
        let addr = service
            .start(store_address)
            .await
            .expect("service should start");
        let store = service.store().expect("running service has a store");
        let seeded = seed::seed_posts(store.as_ref(), SEEDED_POSTS)
            .await
            .expect("seeding should succeed");

        Self {
            service,
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            seeded,
        }
    }

    pub fn store(&self) -> SharedStore {
        self.service.store().expect("service is running")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn tear_down(mut self) {
        seed::tear_down(self.store().as_ref())
            .await
            .expect("teardown should succeed");
        self.service.stop().await.expect("service should stop");
    }
}
