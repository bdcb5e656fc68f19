use std::{fs, sync::Arc};

use chrono::{Duration, Utc};
use lifedash_core::{
    CategoryService, ChangeFeed, CoreError, ImageUpload, ItemService, NewItem, ObjectStore,
    RecordStore,
};
use lifedash_domain::{Category, CategoryType, Item, Priority, Table, Todo};
use lifedash_storage_json::{FsObjectStore, JsonRecordStore};
use tempfile::tempdir;

#[test]
fn json_store_persists_records_across_instances() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("records");
    let now = Utc::now();

    {
        let store = JsonRecordStore::new(root.clone()).expect("create store");
        store
            .insert(Todo::new("Renew passport", Priority::High, now))
            .expect("insert todo");
        store
            .insert(Todo::new("Book dentist", Priority::Low, now + Duration::seconds(1)))
            .expect("insert todo");
    }

    let reopened = JsonRecordStore::new(root).expect("reopen store");
    let todos: Vec<Todo> = reopened.list().expect("list todos");
    let titles: Vec<_> = todos.iter().map(|todo| todo.title.as_str()).collect();

    assert_eq!(titles, vec!["Book dentist", "Renew passport"]);
    let path = reopened.table_path(Table::Todos);
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("todos.json"));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_store_updates_and_deletes_rows() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");
    let mut todo = store
        .insert(Todo::new("Stretch", Priority::Medium, Utc::now()))
        .expect("insert");

    todo.completed = true;
    store.update(todo.clone()).expect("update");
    assert!(store.get::<Todo>(todo.id).expect("get").completed);

    store.delete::<Todo>(todo.id).expect("delete");
    let err = store.delete::<Todo>(todo.id).unwrap_err();
    assert!(matches!(err, CoreError::NotFound { table: Table::Todos, .. }));
}

#[test]
fn missing_table_file_lists_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");

    let categories: Vec<Category> = store.list().expect("list");

    assert!(categories.is_empty());
}

#[test]
fn corrupt_table_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().to_path_buf()).expect("create store");
    fs::write(store.table_path(Table::Categories), "[{").expect("write");

    let err = store.list::<Category>().unwrap_err();

    assert!(matches!(err, CoreError::Serde(_)));
}

#[test]
fn json_store_publishes_changes() {
    let dir = tempdir().expect("tempdir");
    let feed = Arc::new(ChangeFeed::new());
    let subscription = feed.subscribe(Table::Categories);
    let store =
        JsonRecordStore::with_feed(dir.path().to_path_buf(), feed).expect("create store");

    CategoryService::create(&store, "Games", CategoryType::Games, None, Utc::now())
        .expect("create category");

    assert!(subscription.take_pending());
}

#[test]
fn fs_objects_back_item_images() {
    let dir = tempdir().expect("tempdir");
    let store = JsonRecordStore::new(dir.path().join("records")).expect("create store");
    let objects = FsObjectStore::new(
        dir.path().join("objects"),
        "dashboard-images",
        "https://cdn.test",
    )
    .expect("object store");
    let games = CategoryService::create(&store, "Games", CategoryType::Games, None, Utc::now())
        .expect("create category");

    let item = ItemService::create(
        &store,
        &objects,
        &games,
        NewItem {
            name: "Celeste".into(),
            image: ImageUpload::new("cover.JPG", b"jpeg".to_vec()),
            metadata: Default::default(),
            rank: None,
        },
        Utc::now(),
    )
    .expect("create item");

    assert!(item.image_url.starts_with("https://cdn.test/dashboard-images/"));
    assert!(item.image_url.ends_with(".jpg"));
    let key = item.image_url.rsplit('/').next().expect("key");
    let path = objects.object_path(key).expect("path");
    assert_eq!(fs::read(&path).expect("read object"), b"jpeg");

    let cleanup = ItemService::delete(&store, &objects, item.id).expect("delete item");
    assert!(!cleanup.is_orphaned());
    assert!(!path.exists());
    assert!(store.list::<Item>().expect("list").is_empty());
}

#[test]
fn object_keys_cannot_escape_the_bucket() {
    let dir = tempdir().expect("tempdir");
    let objects = FsObjectStore::new(dir.path().to_path_buf(), "dashboard-images", "file:///x")
        .expect("object store");

    assert!(objects.put("../escape.png", b"x").is_err());
    assert!(objects.delete("missing.png").is_err());
}
