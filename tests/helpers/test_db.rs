use axum::Router;
use contactbook::bootstrap::build_app_state;
use contactbook::infrastructure::http::router::build_router;
use contactbook::infrastructure::persistence::Database;
use uuid::Uuid;

pub struct TestDb {
    db: Database,
    path: String,
}

impl TestDb {
    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn app(&self) -> Router {
        build_router(build_app_state(self.db.clone()))
    }
}

pub async fn setup_test_db() -> TestDb {
    // File-based SQLite, unique per test so tests can run in parallel
    let path = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", path);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    TestDb { db, path }
}

pub async fn teardown_test_db(test_db: TestDb) {
    test_db.db.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", test_db.path, suffix));
    }
}
