use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use casedesk::config::AppConfig;
use casedesk::db::{self, PgPool};
use casedesk::routes;
use casedesk::state::AppState;
use casedesk::storage::ObjectStorage;
use diesel::connection::SimpleConnection;
use diesel::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use http_body_util::BodyExt;
use once_cell::sync::Lazy;
use serde::Serialize;
use tokio::sync::Mutex;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[allow(dead_code)]
#[derive(Clone)]
pub struct StoredBlob {
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct FakeStorage {
    blobs: Mutex<HashMap<String, StoredBlob>>,
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let blob = StoredBlob {
            key: key.to_string(),
            bytes,
            content_type: content_type.to_string(),
        };
        let mut guard = self.blobs.lock().await;
        guard.insert(blob.key.clone(), blob);
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        let mut guard = self.blobs.lock().await;
        guard.remove(key);
        Ok(())
    }

    async fn object_exists(&self, key: &str) -> Result<bool> {
        let guard = self.blobs.lock().await;
        Ok(guard.contains_key(key))
    }
}

impl FakeStorage {
    #[allow(dead_code)]
    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        let guard = self.blobs.lock().await;
        guard.get(key).cloned()
    }

    #[allow(dead_code)]
    pub async fn blob_count(&self) -> usize {
        let guard = self.blobs.lock().await;
        guard.len()
    }
}

pub struct TestApp {
    pub state: AppState,
    router: Router,
    storage: Arc<FakeStorage>,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        let database_url = env::var("TEST_DATABASE_URL")
            .context("TEST_DATABASE_URL must be set for integration tests")?;

        let config = AppConfig {
            database_url: database_url.clone(),
            database_max_pool_size: db::DEFAULT_MAX_POOL_SIZE,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            cors_allowed_origin: None,
            aws_endpoint_url: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_region: "us-east-1".to_string(),
            s3_bucket: "test-bucket".to_string(),
        };

        let pool = db::init_pool(&config.database_url, config.database_max_pool_size)?;
        prepare_database(&pool).await?;

        let storage = Arc::new(FakeStorage::default());
        let storage_for_state: Arc<dyn ObjectStorage> = storage.clone();
        let state = AppState::new(pool.clone(), config, storage_for_state);
        let router = routes::create_router(state.clone());

        Ok(Self {
            state,
            router,
            storage,
        })
    }

    #[allow(dead_code)]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    #[allow(dead_code)]
    pub fn storage(&self) -> Arc<FakeStorage> {
        self.storage.clone()
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<hyper::Response<Body>> {
        send_json(self.router.clone(), Method::POST, path, payload).await
    }

    #[allow(dead_code)]
    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<hyper::Response<Body>> {
        send_json(self.router.clone(), Method::PUT, path, payload).await
    }

    #[allow(dead_code)]
    pub async fn patch_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<hyper::Response<Body>> {
        send_json(self.router.clone(), Method::PATCH, path, payload).await
    }

    pub async fn get(&self, path: &str) -> Result<hyper::Response<Body>> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())?;
        send(self.router.clone(), request).await
    }

    #[allow(dead_code)]
    pub async fn delete(&self, path: &str) -> Result<hyper::Response<Body>> {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(path)
            .body(Body::empty())?;
        send(self.router.clone(), request).await
    }

    #[allow(dead_code)]
    pub async fn upload_document(
        &self,
        path: &str,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<hyper::Response<Body>> {
        let request = multipart_upload_request(path, filename, content_type, data)?;
        send(self.router.clone(), request).await
    }

    #[allow(dead_code)]
    pub async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PgConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.state.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|err| anyhow!("failed to get database connection: {err}"))?;
            f(&mut conn)
        })
        .await
        .context("connection task panicked")?
    }
}

pub async fn acquire_db_lock() -> tokio::sync::MutexGuard<'static, ()> {
    DB_LOCK.lock().await
}

pub async fn send(router: Router, request: Request<Body>) -> Result<hyper::Response<Body>> {
    use tower::util::ServiceExt;
    Ok(router.oneshot(request).await.expect("infallible response"))
}

#[allow(dead_code)]
pub async fn send_json<T: Serialize + ?Sized>(
    router: Router,
    method: Method,
    path: &str,
    payload: &T,
) -> Result<hyper::Response<Body>> {
    let body = serde_json::to_vec(payload)?;
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    send(router, request).await
}

#[allow(dead_code)]
pub fn multipart_upload_request(
    path: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Result<Request<Body>> {
    let boundary = format!("boundary-{}", uuid::Uuid::new_v4());
    let mut body = Vec::new();
    body.extend(format!("--{boundary}\r\n").as_bytes());
    body.extend(
        format!(
            "Content-Disposition: form-data; name=\"document\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend(data);
    body.extend(b"\r\n");
    body.extend(format!("--{boundary}--\r\n").as_bytes());

    Ok(Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))?)
}

pub async fn body_to_vec(body: Body) -> Result<Vec<u8>> {
    let collected = body
        .collect()
        .await
        .map_err(|err| anyhow!("failed to read response body: {err}"))?;
    Ok(collected.to_bytes().to_vec())
}

async fn prepare_database(pool: &PgPool) -> Result<()> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut conn = pool
            .get()
            .map_err(|err| anyhow!("failed to acquire connection: {err}"))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| anyhow!("failed to run migrations: {err}"))?;
        truncate_all(&mut conn)?;
        Ok(())
    })
    .await
    .context("migration task panicked")?
}

fn truncate_all(conn: &mut PgConnection) -> Result<()> {
    conn.batch_execute(
        "TRUNCATE TABLE progress_notes, documents, cases, users RESTART IDENTITY CASCADE;",
    )
    .context("failed to truncate tables")?;
    Ok(())
}
