use sqlx::PgPool;

/// Connect, migrate, and confirm the three tables exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    vitals_db::health_check(&pool).await.unwrap();

    for table in ["health_metrics", "devices", "anomalies"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Running the migrator again against a migrated database is a no-op.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_migrations_are_idempotent(pool: PgPool) {
    vitals_db::run_migrations(&pool).await.unwrap();
}

/// The schema rejects enum values the application never writes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_constraints_reject_unknown_values(pool: PgPool) {
    let bad_kind = sqlx::query(
        "INSERT INTO health_metrics (device_id, metric_type, value) VALUES ('d', 'glucose', 1)",
    )
    .execute(&pool)
    .await;
    assert!(bad_kind.is_err());

    let bad_status =
        sqlx::query("INSERT INTO devices (device_id, status) VALUES ('d', 'offline')")
            .execute(&pool)
            .await;
    assert!(bad_status.is_err());

    let bad_severity = sqlx::query(
        "INSERT INTO anomalies (device_id, metric_type, value, severity) \
         VALUES ('d', 'steps', 1, 'severe')",
    )
    .execute(&pool)
    .await;
    assert!(bad_severity.is_err());
}
