use chrono::Utc;
use inventory_catalog::domain::category::CategoryChanges;
use inventory_catalog::domain::item::ItemChanges;
use inventory_catalog::domain::types::{
    CategoryDescription, CategoryId, CategoryName, ItemDescription, ItemId, ItemName, ItemPrice,
    StockCount,
};
use inventory_catalog::repository::{
    CategoryReader, CategoryWriter, ItemListQuery, ItemReader, ItemWriter,
};

mod common;

use common::{insert_category, insert_item};

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    let audio = insert_category(&repo, "Audio", Some("Speakers and headphones"));
    assert!(audio.id.get() > 0);
    assert_eq!(audio.url(), format!("/catalog/category/{}", audio.id));

    let loaded = repo
        .get_category_by_id(audio.id)
        .expect("should load category")
        .expect("category should exist");
    assert_eq!(loaded.name.as_str(), "Audio");
    assert_eq!(
        loaded.description.as_ref().map(|d| d.as_str()),
        Some("Speakers and headphones")
    );

    let changes = CategoryChanges {
        name: CategoryName::new("Sound").unwrap(),
        description: None,
        updated_at: Utc::now().naive_utc(),
    };
    assert_eq!(repo.update_category(audio.id, &changes).unwrap(), 1);
    let updated = repo.get_category_by_id(audio.id).unwrap().unwrap();
    assert_eq!(updated.name.as_str(), "Sound");
    assert!(updated.description.is_none());
    assert_eq!(updated.created_at, audio.created_at);

    assert_eq!(repo.delete_category(audio.id).unwrap(), 1);
    assert!(repo.get_category_by_id(audio.id).unwrap().is_none());
    assert_eq!(repo.delete_category(audio.id).unwrap(), 0);
}

#[test]
fn categories_are_listed_by_name() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    insert_category(&repo, "Phone", None);
    insert_category(&repo, "Computer", None);
    insert_category(&repo, "Gadgets", None);

    let names: Vec<String> = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Computer", "Gadgets", "Phone"]);
    assert_eq!(repo.count_categories().unwrap(), 3);
}

#[test]
fn category_lookup_by_name_is_exact() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    let audio = insert_category(&repo, "Audio", None);

    let exact = repo
        .get_category_by_name(&CategoryName::new("Audio").unwrap())
        .unwrap();
    assert_eq!(exact.map(|c| c.id), Some(audio.id));

    let other_case = repo
        .get_category_by_name(&CategoryName::new("audio").unwrap())
        .unwrap();
    assert!(other_case.is_none());
}

#[test]
fn test_item_repository_crud() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    let audio = insert_category(&repo, "Audio", None);
    let video = insert_category(&repo, "Video", None);
    let speaker = insert_item(&repo, "Speaker", audio.id);
    assert_eq!(speaker.url(), format!("/catalog/item/{}", speaker.id));

    let loaded = repo.get_item_by_id(speaker.id).unwrap().unwrap();
    assert_eq!(loaded.item.name.as_str(), "Speaker");
    assert_eq!(loaded.item.price.get(), 49.5);
    assert_eq!(loaded.category.map(|c| c.id), Some(audio.id));

    let changes = ItemChanges {
        name: ItemName::new("Projector").unwrap(),
        description: ItemDescription::new("Bright").unwrap(),
        price: ItemPrice::new(300.0).unwrap(),
        number_in_stock: StockCount::new(0).unwrap(),
        category_id: video.id,
        updated_at: Utc::now().naive_utc(),
    };
    assert_eq!(repo.update_item(speaker.id, &changes).unwrap(), 1);

    let updated = repo.get_item_by_id(speaker.id).unwrap().unwrap();
    assert_eq!(updated.item.id, speaker.id);
    assert_eq!(updated.item.name.as_str(), "Projector");
    assert_eq!(updated.item.description.as_str(), "Bright");
    assert_eq!(updated.item.price.get(), 300.0);
    assert_eq!(updated.item.number_in_stock.get(), 0);
    assert_eq!(updated.item.created_at, speaker.created_at);
    assert_eq!(updated.category.map(|c| c.name.into_inner()), Some("Video".to_string()));

    assert_eq!(repo.delete_item(speaker.id).unwrap(), 1);
    assert!(repo.get_item_by_id(speaker.id).unwrap().is_none());
    assert_eq!(repo.count_items().unwrap(), 0);
}

#[test]
fn items_are_filtered_by_category_and_ordered_by_name() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    let audio = insert_category(&repo, "Audio", None);
    let phone = insert_category(&repo, "Phone", None);
    insert_item(&repo, "Speaker", audio.id);
    insert_item(&repo, "Amplifier", audio.id);
    insert_item(&repo, "Redmi 9t", phone.id);

    let all: Vec<String> = repo
        .list_items(ItemListQuery::default())
        .unwrap()
        .into_iter()
        .map(|i| i.item.name.into_inner())
        .collect();
    assert_eq!(all, vec!["Amplifier", "Redmi 9t", "Speaker"]);

    let in_audio = repo
        .list_items(ItemListQuery::default().category(audio.id))
        .unwrap();
    assert_eq!(in_audio.len(), 2);
    assert!(
        in_audio
            .iter()
            .all(|i| i.category.as_ref().map(|c| c.id) == Some(audio.id))
    );
}

#[test]
fn deleting_category_leaves_items_dangling() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    let audio = insert_category(&repo, "Audio", None);
    let speaker = insert_item(&repo, "Speaker", audio.id);

    assert_eq!(repo.delete_category(audio.id).unwrap(), 1);

    let orphan = repo.get_item_by_id(speaker.id).unwrap().unwrap();
    assert_eq!(orphan.item.category_id, audio.id);
    assert!(orphan.category.is_none());
}

#[test]
fn missing_rows_report_zero_changes() {
    let test_db = common::TestDb::new();
    let repo = test_db.repository();

    let missing_item = ItemId::new(99).unwrap();
    let missing_category = CategoryId::new(99).unwrap();
    let changes = CategoryChanges {
        name: CategoryName::new("Nothing").unwrap(),
        description: Some(CategoryDescription::new("None").unwrap()),
        updated_at: Utc::now().naive_utc(),
    };

    assert_eq!(repo.update_category(missing_category, &changes).unwrap(), 0);
    assert_eq!(repo.delete_item(missing_item).unwrap(), 0);
    assert!(repo.get_item_by_id(missing_item).unwrap().is_none());
}
