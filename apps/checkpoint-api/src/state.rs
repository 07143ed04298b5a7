//! Application state for the checkpoint API

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::ocr::{IdentifierExtractor, RemoteRcExtractor, TesseractDlExtractor};

pub struct AppState {
    pub db: SqlitePool,
    pub dl_extractor: Arc<dyn IdentifierExtractor>,
    pub rc_extractor: Arc<dyn IdentifierExtractor>,
}

impl AppState {
    /// Production state: database path and OCR collaborators from the
    /// environment.
    pub async fn new() -> Result<Self> {
        let db_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let data_dir = dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("checkpoint-api");
            std::fs::create_dir_all(&data_dir).ok();
            format!("sqlite:{}/checkpoint.db?mode=rwc", data_dir.display())
        });

        tracing::info!("Connecting to database: {}", db_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        Self::with_pool(
            pool,
            Arc::new(TesseractDlExtractor::from_env()),
            Arc::new(RemoteRcExtractor::from_env()?),
        )
        .await
    }

    /// Build state over an existing pool with explicit OCR capabilities.
    /// Tests use this with an in-memory database and stub extractors.
    pub async fn with_pool(
        db: SqlitePool,
        dl_extractor: Arc<dyn IdentifierExtractor>,
        rc_extractor: Arc<dyn IdentifierExtractor>,
    ) -> Result<Self> {
        Self::run_migrations(&db).await?;
        Ok(Self {
            db,
            dl_extractor,
            rc_extractor,
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS licenses (
                dl_number TEXT PRIMARY KEY COLLATE NOCASE,
                name TEXT,
                validity TEXT,
                phone_number TEXT,
                status TEXT NOT NULL DEFAULT 'valid'
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS registration_certificates (
                regn_number TEXT PRIMARY KEY COLLATE NOCASE,
                owner_name TEXT,
                vehicle_class TEXT,
                chassis_number TEXT,
                engine_number TEXT,
                valid_upto TEXT,
                status TEXT NOT NULL DEFAULT 'valid'
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 0,
                login_time TEXT,
                logout_time TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                scanned_by TEXT NOT NULL,
                location TEXT NOT NULL,
                tollgate TEXT NOT NULL,
                dl_number TEXT,
                dl_name TEXT,
                phone_number TEXT,
                dl_status TEXT,
                vehicle_number TEXT,
                owner_name TEXT,
                chassis_number TEXT,
                engine_number TEXT,
                rc_status TEXT,
                alert_type TEXT,
                description TEXT,
                suspicious INTEGER
            )
            "#,
        )
        .execute(pool)
        .await?;

        // The anomaly detector scans by DL and timestamp window.
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_logs_dl_timestamp
                ON logs(dl_number, timestamp)
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }
}

/// Get platform-specific data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }
}
