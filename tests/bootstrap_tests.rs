use libris::config::Paths;
use libris::setup::{Bootstrapper, Step};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Row};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_data_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut path = std::env::temp_dir();
    path.push(format!("libris-{tag}-{}-{}", std::process::id(), nanos));
    path
}

fn bootstrapper(data_dir: &PathBuf) -> Bootstrapper {
    Bootstrapper::new(Paths::new(data_dir), "debug")
}

#[tokio::test]
async fn fresh_install_creates_all_artifacts() {
    let data_dir = temp_data_dir("fresh");
    let paths = Paths::new(&data_dir);

    let result = bootstrapper(&data_dir).run().await;
    assert!(result.is_ok(), "fresh run failed: {:?}", result.err());

    assert!(paths.log_dir().is_dir());
    assert!(paths.log_file().is_file());
    assert!(paths.db_file().is_file());
    assert!(paths.pending_imports_dir().is_dir());
    assert!(paths.completed_imports_dir().is_dir());

    let options = SqliteConnectOptions::new().filename(paths.db_file());
    let mut conn = options.connect().await.expect("failed to open database");

    let tables = sqlx::query(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_all(&mut conn)
    .await
    .expect("failed to list tables");
    let names: Vec<String> = tables
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect();
    assert_eq!(names, ["books"]);

    let columns = sqlx::query("PRAGMA table_info(books)")
        .fetch_all(&mut conn)
        .await
        .expect("failed to read table info");
    let column_names: Vec<String> = columns
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect();
    assert_eq!(
        column_names,
        [
            "id",
            "title",
            "author",
            "available",
            "date_created",
            "check_in_date",
            "check_out_date"
        ]
    );

    conn.close().await.ok();
    let _ = fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let data_dir = temp_data_dir("idempotent");
    let paths = Paths::new(&data_dir);

    assert!(bootstrapper(&data_dir).run().await.is_ok());
    let first_db = fs::read(paths.db_file()).expect("database file missing after first run");

    assert!(bootstrapper(&data_dir).initialize().await);
    let second_db = fs::read(paths.db_file()).expect("database file missing after second run");

    assert_eq!(first_db, second_db, "second run altered the database file");
    assert!(paths.pending_imports_dir().is_dir());
    assert!(paths.completed_imports_dir().is_dir());

    let _ = fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn existing_database_file_is_trusted_as_is() {
    let data_dir = temp_data_dir("existing-db");
    let paths = Paths::new(&data_dir);

    fs::create_dir_all(paths.db_dir()).expect("failed to pre-create db dir");
    fs::write(paths.db_file(), b"not a sqlite database").expect("failed to seed db file");

    assert!(bootstrapper(&data_dir).run().await.is_ok());

    let contents = fs::read(paths.db_file()).expect("database file missing");
    assert_eq!(contents, b"not a sqlite database");

    let _ = fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn failed_ddl_rolls_back_and_removes_file() {
    let data_dir = temp_data_dir("broken-ddl");
    let paths = Paths::new(&data_dir);
    fs::create_dir_all(paths.db_dir()).expect("failed to create db dir");

    let db_file = paths.db_file();
    let result = libris::db::create_database(&db_file, "CREATE TABLE broken (").await;

    assert!(result.is_err());
    assert!(
        !db_file.exists(),
        "failed initialization left a database file behind"
    );

    let _ = fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn blocked_log_dir_short_circuits_remaining_steps() {
    let data_dir = temp_data_dir("blocked-logs");
    let paths = Paths::new(&data_dir);

    // A regular file where the log directory should go makes step one fail.
    fs::create_dir_all(&data_dir).expect("failed to create data dir");
    fs::write(paths.log_dir(), b"in the way").expect("failed to block log dir");

    let failure = bootstrapper(&data_dir)
        .run()
        .await
        .expect_err("run succeeded with a blocked log directory");
    assert_eq!(failure.step, Step::Logging);

    assert!(!paths.db_file().exists());
    assert!(!paths.pending_imports_dir().exists());
    assert!(!paths.completed_imports_dir().exists());

    let _ = fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn blocked_db_dir_fails_database_step() {
    let data_dir = temp_data_dir("blocked-db");
    let paths = Paths::new(&data_dir);

    fs::create_dir_all(&data_dir).expect("failed to create data dir");
    fs::write(paths.db_dir(), b"in the way").expect("failed to block db dir");

    let failure = bootstrapper(&data_dir)
        .run()
        .await
        .expect_err("run succeeded with a blocked database directory");
    assert_eq!(failure.step, Step::Database);

    assert!(paths.log_file().is_file(), "logging step should have run");
    assert!(!paths.db_file().exists());
    assert!(
        !paths.pending_imports_dir().exists(),
        "import steps should not run after a database failure"
    );

    let _ = fs::remove_dir_all(&data_dir);
}
