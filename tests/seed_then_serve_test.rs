use parking_board::core::LotRepository;
use parking_board::{build_router, Fixture, ParkingBoard, Seeder, SqliteRepository};
use std::io::Write;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};

const FIXTURE: &str = r#"
[[lots]]
name = "Station"
total_spaces = 4
free_spaces = 2

  [[lots.spaces]]
  space_number = "01"
  row = 1

  [[lots.spaces]]
  space_number = "02"
  status = "occupied"
  row = 2

  [[lots.spaces]]
  space_number = "03"
  row = 1

  [[lots.spaces]]
  space_number = "04"
  status = "occupied"
  row = 1

[[lots]]
name = "Depot"
total_spaces = 0
free_spaces = 0
is_active = false
"#;

#[tokio::test]
async fn seeded_sqlite_store_is_served() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("board.db");

    let mut fixture_file = NamedTempFile::new().unwrap();
    fixture_file.write_all(FIXTURE.as_bytes()).unwrap();
    let fixture = Fixture::from_file(fixture_file.path()).unwrap();

    let report = Seeder::new(SqliteRepository::open(&db_path).unwrap())
        .seed(&fixture, false)
        .await
        .unwrap();
    assert_eq!(report.lots_created, 2);
    assert_eq!(report.spaces_created, 4);

    let repository = SqliteRepository::open(&db_path).unwrap();
    repository.ping().await.unwrap();
    let station = repository.list_active().await.unwrap()[0].id;

    let app = build_router(Arc::new(ParkingBoard::new(repository)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    let summary: serde_json::Value = reqwest::get(format!("http://{addr}/api/parking/{station}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["parking"]["name"], format!("Parking #{station}"));
    let rows: Vec<i64> = summary["spaces"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["row"].as_i64().unwrap())
        .collect();
    assert_eq!(rows, vec![1, 2, 1, 1]);

    // row 1 is split around space 02, so three runs are rendered
    let detail = reqwest::get(format!("http://{addr}/parking/{station}/"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(detail.matches("class=\"row\"").count(), 3);
    assert_eq!(detail.matches("data-row=\"1\"").count(), 2);
}

#[tokio::test]
async fn reseeding_with_reset_replaces_lots() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("board.db");
    let fixture = Fixture::from_toml_str(FIXTURE).unwrap();

    let seeder = Seeder::new(SqliteRepository::open(&db_path).unwrap());
    seeder.seed(&fixture, false).await.unwrap();
    let report = seeder.seed(&fixture, true).await.unwrap();
    assert_eq!(report.lots_deleted, 2);

    let store = seeder.into_store();
    let active = store.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(store.list_spaces_for_lot(active[0].id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn failed_reseed_leaves_previous_data_in_place() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("board.db");
    let fixture = Fixture::from_toml_str(FIXTURE).unwrap();

    let seeder = Seeder::new(SqliteRepository::open(&db_path).unwrap());
    seeder.seed(&fixture, false).await.unwrap();

    // fail the third space insert of the next load
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_03 BEFORE INSERT ON parking_space
             WHEN NEW.space_number = '03'
             BEGIN SELECT RAISE(ABORT, 'write failed'); END;",
        )
        .unwrap();

    assert!(seeder.seed(&fixture, true).await.is_err());

    let store = seeder.into_store();
    let active = store.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Station");
    let spaces = store.list_spaces_for_lot(active[0].id).await.unwrap();
    assert_eq!(spaces.len(), 4);
}
