use super::*;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_execute_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);",
    )
    .await
    .unwrap();

    assert!(db.relation_exists("t1").unwrap());
    assert!(db.relation_exists("t2").unwrap());
    assert_eq!(db.query_count("SELECT * FROM t1").unwrap(), 1);
}

#[tokio::test]
async fn test_relation_not_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("nonexistent").unwrap());
}

#[tokio::test]
async fn test_schema_qualified_relation() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE SCHEMA blog; CREATE TABLE blog.post (id INT);")
        .await
        .unwrap();
    assert!(db.relation_exists("blog.post").unwrap());
    assert!(!db.relation_exists("post").unwrap());
}

#[tokio::test]
async fn test_engine_error_message_is_preserved() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db.execute_batch("SELEC 1").await.unwrap_err();
    match err {
        DbError::ExecutionError(msg) => assert!(msg.contains("syntax error"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_in_transaction_defaults_to_plain_batch() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch_in_transaction("CREATE TABLE tx_t (id INT)")
        .await
        .unwrap();
    assert!(db.relation_exists("tx_t").unwrap());
}

#[tokio::test]
async fn test_read_missing_setting() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = SettingsTable::default();
    assert_eq!(db.read_setting(&table, "nope").await.unwrap(), None);
    assert!(!db.relation_exists("blog_configuration").unwrap());
}

#[tokio::test]
async fn test_read_missing_key_in_existing_table() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = SettingsTable::default();
    db.write_setting(&table, "other", "x").await.unwrap();
    assert_eq!(db.read_setting(&table, "nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_write_then_replace_setting() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = SettingsTable::default();

    db.write_setting(&table, "SystemManifestSettings", "{\"a\":1}")
        .await
        .unwrap();
    db.write_setting(&table, "SystemManifestSettings", "{\"a\":2}")
        .await
        .unwrap();

    assert_eq!(
        db.read_setting(&table, "SystemManifestSettings")
            .await
            .unwrap()
            .as_deref(),
        Some("{\"a\":2}")
    );
    assert_eq!(db.query_count("SELECT * FROM blog_configuration").unwrap(), 1);
}

#[tokio::test]
async fn test_custom_settings_table() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = SettingsTable {
        table: "app_settings".to_string(),
        key_column: "name".to_string(),
        value_column: "payload".to_string(),
    };
    db.write_setting(&table, "k", "v").await.unwrap();
    assert_eq!(
        db.read_setting(&table, "k").await.unwrap().as_deref(),
        Some("v")
    );
}

#[tokio::test]
async fn test_unsafe_settings_table_rejected() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = SettingsTable {
        table: "x; DROP TABLE y".to_string(),
        ..SettingsTable::default()
    };
    assert!(matches!(
        db.read_setting(&table, "k").await,
        Err(DbError::InvalidIdentifier(_))
    ));
}

#[tokio::test]
async fn test_file_backed_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.duckdb");
    let table = SettingsTable::default();
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.write_setting(&table, "k", "persisted").await.unwrap();
    }
    let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
    assert_eq!(
        db.read_setting(&table, "k").await.unwrap().as_deref(),
        Some("persisted")
    );
}
