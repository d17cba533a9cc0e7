use contracts::shared::columns::ColumnRole;
use std::sync::Arc;

use super::repository::SNAPSHOT_CACHE;
use super::snapshot::Snapshot;
use crate::shared::columns::ResolvedColumns;
use crate::shared::config::{self, SourceConfig};
use crate::shared::logger;
use crate::shared::source::{parse_csv, source_from_config, CsvSource, SourceError};

/// Current vehicle table, reloaded from the source once the cache TTL expires
pub async fn current_snapshot() -> Arc<Snapshot> {
    let source_config = &config::get().source;
    SNAPSHOT_CACHE
        .get_or_load(source_config.cache_ttl(), || load_snapshot(source_config))
        .await
}

/// Drop the cached table and load it again
pub async fn reload() -> Arc<Snapshot> {
    SNAPSHOT_CACHE.invalidate().await;
    current_snapshot().await
}

/// Load from the configured source. Never fails: a fetch or parse error
/// yields an empty snapshot carrying the error message.
pub async fn load_snapshot(source_config: &SourceConfig) -> Snapshot {
    match source_from_config(source_config) {
        Ok(source) => load_from(source.as_ref()).await,
        Err(e) => failed_load(&source_config.url, &e),
    }
}

pub async fn load_from(source: &dyn CsvSource) -> Snapshot {
    let origin = source.describe();
    let table = match source.fetch_text().await {
        Ok(text) => parse_csv(&text),
        Err(e) => Err(e),
    };

    match table {
        Ok(table) => {
            let snapshot = Snapshot::from_table(table);
            let unresolved = unresolved_roles(&snapshot.columns);

            logger::log(
                "source",
                &format!(
                    "Loaded {} rows from {} ({} of {} roles resolved, intervals tracked: {:?})",
                    snapshot.records.len(),
                    origin,
                    ColumnRole::ALL.len() - unresolved.len(),
                    ColumnRole::ALL.len(),
                    snapshot.columns.tracked_intervals(),
                ),
            );
            if !unresolved.is_empty() {
                logger::warn(
                    "source",
                    &format!(
                        "Unresolved columns in {}: {}",
                        origin,
                        unresolved.join(", ")
                    ),
                );
            }
            snapshot
        }
        Err(e) => failed_load(&origin, &e),
    }
}

/// Roles with no matching header, in declaration order
fn unresolved_roles(columns: &ResolvedColumns) -> Vec<&'static str> {
    ColumnRole::ALL
        .iter()
        .filter(|role| !columns.is_resolved(**role))
        .map(|role| role.as_str())
        .collect()
}

fn failed_load(origin: &str, error: &SourceError) -> Snapshot {
    logger::error("source", &format!("Failed to load {}: {}", origin, error));
    Snapshot::failed(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource(Result<&'static str, u16>);

    #[async_trait]
    impl CsvSource for StaticSource {
        async fn fetch_text(&self) -> Result<String, SourceError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(SourceError::Status(status)),
            }
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[tokio::test]
    async fn test_load_from_parses_table() {
        let snapshot = load_from(&StaticSource(Ok("VIN,ESTADO\nA1,En exhibición\n"))).await;
        assert!(snapshot.load_error.is_none());
        assert_eq!(snapshot.records.len(), 1);
    }

    #[test]
    fn test_unresolved_roles() {
        let snapshot = Snapshot::from_table(parse_csv("VIN,ESTADO\nA9,Bloqueado\n").unwrap());
        let unresolved = unresolved_roles(&snapshot.columns);
        assert_eq!(unresolved.first(), Some(&"delivery_date"));
        assert!(!unresolved.contains(&"vin"));
        assert!(!unresolved.contains(&"lifecycle_status"));
        assert_eq!(unresolved.len(), ColumnRole::ALL.len() - 2);

        let full = Snapshot::from_table(
            parse_csv(
                "VIN,ESTADO,ESTADO ADMIN,FECHA CONFIRMACION ENTREGA,FECHA DE ARRIBO,\
                 FECHA FACTURACION,FECHA DISPONIBILIDAD DOCUMENTACION,TELEFONO,MAIL\n",
            )
            .unwrap(),
        );
        assert!(unresolved_roles(&full.columns).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_empty_table() {
        let snapshot = load_from(&StaticSource(Err(503))).await;
        assert!(snapshot.records.is_empty());
        assert_eq!(
            snapshot.load_error.as_deref(),
            Some("Unexpected HTTP status: 503")
        );
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_table() {
        let config = SourceConfig {
            url: "target/does-not-exist/vehicles.csv".to_string(),
            ..SourceConfig::default()
        };
        let snapshot = load_snapshot(&config).await;
        assert!(snapshot.records.is_empty());
        assert!(snapshot.load_error.is_some());
    }
}
