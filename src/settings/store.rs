use super::{
    errors::SettingsError,
    types::{RawSettings, Settings, SettingsUpdate},
};
use sqlx::{PgPool, migrate};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Where the redirect settings record lives.
///
/// Both variants store the same key/value rows and normalize them the same
/// way on read.
#[derive(Debug, Clone)]
pub enum SettingsStore {
    Postgres(PgPool),
    Memory(Arc<RwLock<RawSettings>>),
}

impl SettingsStore {
    pub async fn connect(database_url: &str) -> Result<Self, SettingsError> {
        let pool = PgPool::connect(database_url).await?;
        migrate!("./migrations").run(&pool).await?;
        info!("Connected settings store to Postgres");
        Ok(SettingsStore::Postgres(pool))
    }

    pub fn in_memory(initial: RawSettings) -> Self {
        SettingsStore::Memory(Arc::new(RwLock::new(initial)))
    }

    /// Returns the current settings with defaults substituted.
    pub async fn get(&self) -> Result<Settings, SettingsError> {
        let raw = match self {
            SettingsStore::Postgres(pool) => {
                let rows: Vec<(String, String)> =
                    sqlx::query_as("SELECT key, value FROM redirect_settings")
                        .fetch_all(pool)
                        .await?;
                RawSettings::from_pairs(rows)
            }
            SettingsStore::Memory(raw) => raw.read().await.clone(),
        };
        Ok(raw.normalize())
    }

    /// Validates and persists a partial update, then returns the new settings.
    pub async fn set(&self, update: SettingsUpdate) -> Result<Settings, SettingsError> {
        let pairs = update.into_pairs()?;

        match self {
            SettingsStore::Postgres(pool) => {
                let mut tx = pool.begin().await?;
                for (key, value) in pairs {
                    sqlx::query(
                        "INSERT INTO redirect_settings (key, value) VALUES ($1, $2)
                         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
                    )
                    .bind(key)
                    .bind(value)
                    .execute(&mut *tx)
                    .await?;
                }
                tx.commit().await?;
            }
            SettingsStore::Memory(raw) => {
                let mut raw = raw.write().await;
                for (key, value) in pairs {
                    raw.apply(key, value);
                }
            }
        }

        self.get().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::timeout::TimeoutUnit;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn fresh_store_is_disabled() {
        let store = SettingsStore::in_memory(RawSettings::default());
        let settings = assert_ok!(store.get().await);
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn partial_updates_merge() {
        let store = SettingsStore::in_memory(RawSettings::default());
        assert_ok!(
            store
                .set(SettingsUpdate {
                    redirect_url: Some("https://example.com/landing".into()),
                    ..Default::default()
                })
                .await
        );
        let settings = assert_ok!(
            store
                .set(SettingsUpdate {
                    timeout_unit: Some("hours".into()),
                    only_homepage: Some(true),
                    ..Default::default()
                })
                .await
        );

        assert_eq!(settings.redirect_url, "https://example.com/landing");
        assert_eq!(settings.timeout_value, 60);
        assert_eq!(settings.timeout_unit, TimeoutUnit::Hours);
        assert!(settings.only_homepage);
    }

    #[tokio::test]
    async fn rejected_update_changes_nothing() {
        let store = SettingsStore::in_memory(RawSettings::from_pairs([(
            "redirect_url",
            "https://example.com",
        )]));
        let result = store
            .set(SettingsUpdate {
                redirect_url: Some("/elsewhere".into()),
                timeout_value: Some(-1),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(SettingsError::InvalidTimeoutValue(-1))));
        assert_eq!(
            assert_ok!(store.get().await).redirect_url,
            "https://example.com"
        );
    }
}
