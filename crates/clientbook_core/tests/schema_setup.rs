use clientbook_core::{
    create_schema, drop_schema, drop_schema_if_exists, open_db, open_db_in_memory,
    schema_exists, ClientRepository, DbError, NewClient, RepoError, SqliteClientRepository,
};
use rusqlite::Connection;

#[test]
fn create_schema_twice_keeps_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();
    let repo = SqliteClientRepository::new(&conn);
    repo.create_client(&NewClient::new("Ruslan", "Akhmarov", "ari@gmail.com"))
        .unwrap();

    create_schema(&conn).unwrap();

    assert_eq!(client_count(&conn), 1);
    assert_table_exists(&conn, "clients");
    assert_table_exists(&conn, "phones");
}

#[test]
fn drop_schema_removes_tables_even_with_phone_rows() {
    let conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();
    let repo = SqliteClientRepository::new(&conn);
    repo.create_client(
        &NewClient::new("Sanya", "Sanyich", "sasanya@mail.ru")
            .with_phones([79_999_999_997, 79_999_999_998]),
    )
    .unwrap();

    drop_schema(&conn).unwrap();

    assert!(!schema_exists(&conn).unwrap());
}

#[test]
fn strict_drop_fails_on_missing_tables_and_lenient_drop_does_not() {
    let conn = open_db_in_memory().unwrap();

    let err = drop_schema(&conn).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));

    drop_schema_if_exists(&conn).unwrap();
    create_schema(&conn).unwrap();
    drop_schema_if_exists(&conn).unwrap();
    assert!(!schema_exists(&conn).unwrap());
}

#[test]
fn operations_without_schema_surface_storage_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteClientRepository::new(&conn);

    let err = repo
        .create_client(&NewClient::new("No", "Schema", "none@example.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn schema_persists_across_file_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clientbook.db");

    let conn = open_db(&path).unwrap();
    create_schema(&conn).unwrap();
    SqliteClientRepository::new(&conn)
        .create_client(&NewClient::new("Vasya", "Pupkin", "vasyap@ya.ru"))
        .unwrap();
    drop(conn);

    let reopened = open_db(&path).unwrap();
    assert!(schema_exists(&reopened).unwrap());
    assert_eq!(client_count(&reopened), 1);
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

fn client_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM clients;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[test]
fn schema_defines_only_the_client_and_phone_tables() {
    let conn = open_db_in_memory().unwrap();
    create_schema(&conn).unwrap();

    let mut stmt = conn
        .prepare(
            "SELECT type, name
             FROM sqlite_master
             WHERE type IN ('table', 'index') AND name NOT LIKE 'sqlite_%'
             ORDER BY name;",
        )
        .unwrap();
    let objects = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(
        objects,
        vec![
            ("table".to_string(), "clients".to_string()),
            ("table".to_string(), "phones".to_string()),
        ]
    );
}
