use sea_orm::{
    sea_query::{IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, Database, DatabaseConnection, DbErr,
};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Per-test state: one in-memory SQLite database and, when a test asks for it,
/// a session stored in that same database.
///
/// Dropping the context drops the database.
pub struct TestContext {
    /// Connection to the in-memory database, opened on first use.
    pub db: Option<DatabaseConnection>,

    /// Session backed by a `SqliteStore` on `db`, created on first use.
    pub session: Option<Session>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Returns the database connection, opening `sqlite::memory:` the first time.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        if self.db.is_none() {
            self.db = Some(Database::connect("sqlite::memory:").await?);
        }

        Ok(self.db.as_ref().ok_or_else(|| DbErr::Custom("database missing".into()))?)
    }

    /// Runs CREATE TABLE statements in order; parents must come before children.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;
        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Runs CREATE INDEX statements; call after `with_tables`.
    pub async fn with_indexes(
        &mut self,
        stmts: Vec<IndexCreateStatement>,
    ) -> Result<(), TestError> {
        let db = self.database().await?;
        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Returns a session for OAuth CSRF tests.
    ///
    /// The first call migrates the session table into the test database and
    /// creates a session expiring after 7 days of inactivity.
    ///
    /// ```rust,ignore
    /// let session = test.session().await?;
    /// session.insert("oauth_csrf_google", "state").await?;
    /// ```
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let pool = self.database().await?.get_sqlite_connection_pool().clone();
            let store = SqliteStore::new(pool);
            store
                .migrate()
                .await
                .map_err(|e| DbErr::Custom(e.to_string()))?;

            self.session = Some(Session::new(
                None,
                Arc::new(store),
                Some(Expiry::OnInactivity(Duration::days(7))),
            ));
        }

        Ok(self
            .session
            .as_ref()
            .ok_or_else(|| DbErr::Custom("session missing".into()))?)
    }
}
