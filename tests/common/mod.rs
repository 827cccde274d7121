#![allow(dead_code)]

use axum_test::TestServer;
use scoped_shortener::application::services::{ShortenerService, StaticUserDirectory};
use scoped_shortener::config::{Config, StorageBackend};
use scoped_shortener::domain::repositories::RedirectRepository;
use scoped_shortener::domain::user_directory::UserDirectory;
use scoped_shortener::infrastructure::memory::InMemoryRedirectRepository;
use scoped_shortener::routes::app_routes;
use scoped_shortener::server::build_state;
use scoped_shortener::state::AppState;
use scoped_shortener::utils::code_generator::{CodeGenerator, FnvCodeGenerator};
use std::sync::Arc;

pub const ALICE: &str = "alice@idp";
pub const BOB: &str = "bob@idp";

pub fn memory_config() -> Config {
    Config {
        storage_backend: StorageBackend::Memory,
        database_url: None,
        listen_addr: "127.0.0.1:0".to_string(),
        base_url: "https://s.example.com".to_string(),
        forwarded_prefix: "/".to_string(),
        single_tenant_user: None,
        store_timeout_ms: 1000,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 1,
        db_connect_timeout: 1,
        db_idle_timeout: 600,
        db_max_lifetime: 1800,
    }
}

pub async fn create_test_server(config: Config) -> TestServer {
    let state = build_state(config).await.unwrap();
    TestServer::new(app_routes(state)).unwrap()
}

pub async fn create_multi_tenant_server() -> TestServer {
    create_test_server(memory_config()).await
}

/// Single-tenant server over a caller-provided repository, for seeding
/// records the HTTP API cannot create.
pub fn create_single_tenant_server(
    owner_id: &str,
    repository: Arc<InMemoryRedirectRepository>,
) -> TestServer {
    let mut config = memory_config();
    config.single_tenant_user = Some(owner_id.to_string());

    let generator: Arc<dyn CodeGenerator> = Arc::new(FnvCodeGenerator::new());
    let repository: Arc<dyn RedirectRepository> = repository;
    let users: Arc<dyn UserDirectory> = Arc::new(StaticUserDirectory::new(owner_id));

    let state = AppState::new(
        Arc::new(ShortenerService::new(generator, repository)),
        users,
        Arc::new(config),
    );

    TestServer::new(app_routes(state)).unwrap()
}
