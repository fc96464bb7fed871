//! The on-disk engine behind the same repositories

use restaurant_server::db::DbService;
use restaurant_server::db::models::{MenuCreate, TableCreate};
use restaurant_server::db::repository::{MenuRepository, TableRepository};
use restaurant_server::Config;

#[tokio::test]
async fn test_rocksdb_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = Config::for_tests();
    config.database_path = tmp.path().join("nested").join("restaurant.db").display().to_string();

    let db = DbService::open(&config).await.unwrap().db;

    let menus = MenuRepository::new(db.clone());
    let menu = menus
        .create(MenuCreate {
            name: Some("Dinner".into()),
            category: Some("Main".into()),
            start_date: None,
            end_date: None,
        })
        .await
        .unwrap();
    assert!(menus.exists(&menu.menu_id).await.unwrap());
    assert_eq!(menus.find_by_id(&menu.menu_id).await.unwrap(), Some(menu));

    let tables = TableRepository::new(db);
    for number in 1..=3 {
        tables
            .create(TableCreate {
                number_of_guests: Some(2),
                table_number: Some(number),
            })
            .await
            .unwrap();
    }
    let all = tables.find_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(!tables.exists("missing").await.unwrap());
}
