mod common;

use std::fs;

use lifedash::{
    clock::SystemClock,
    dashboard::{CategoryIntent, Dashboard, ItemIntent, LoadState},
};
use lifedash_core::{ImageUpload, NewItem};
use lifedash_domain::{CategoryType, Table};

use common::{clock, setup_test_env};

#[test]
fn dashboard_round_trips_through_json_stores() {
    let (base, config_manager) = setup_test_env();
    let mut config = config_manager.load().expect("load config");
    config.data_dir = Some(base.join("data"));
    config.ui_color_enabled = false;
    config_manager.save(&config).expect("save config");
    let config = config_manager.load().expect("reload config");

    let mut dashboard = Dashboard::open(config.clone(), clock()).expect("open dashboard");
    dashboard.load().expect("load");
    let games = dashboard
        .dispatch(CategoryIntent::Create {
            name: "Games".into(),
            category_type: CategoryType::Games,
            icon: Some("gamepad".into()),
        })
        .expect("create")
        .created
        .expect("id");
    dashboard
        .dispatch(ItemIntent::Create {
            category_id: games,
            item: NewItem {
                name: "Outer Wilds".into(),
                image: ImageUpload::new("cover.webp", b"webp".to_vec()),
                metadata: [("multiplayer".to_string(), serde_json::json!(false))]
                    .into_iter()
                    .collect(),
                rank: None,
            },
        })
        .expect("create item");

    let item = dashboard.snapshot().items[0].clone();
    assert!(item.image_url.starts_with("file://"));
    assert!(dashboard.store().table_path(Table::Items).exists());
    let bucket = config.objects_dir().join(&config.image_bucket);
    assert_eq!(fs::read_dir(&bucket).expect("bucket dir").count(), 1);

    let mut reopened = Dashboard::open(config, Box::new(SystemClock)).expect("reopen");
    reopened.load().expect("reload");
    assert_eq!(reopened.state(), &LoadState::Ready);
    assert_eq!(reopened.snapshot().items, vec![item.clone()]);

    let category = reopened.category(games).expect("category");
    assert_eq!(category.icon_name(), "gamepad");
    let renderer = reopened.detail_renderer();
    assert!(!renderer.is_colored());
    let lines = renderer.lines(category, &item);
    let multiplayer = lines
        .iter()
        .find(|line| line.label == "Multiplayer")
        .expect("multiplayer row");
    assert_eq!(multiplayer.value, "No");
    assert!(multiplayer.is_set);
}
