use std::path::PathBuf;

use models::{ProductInput, Summary};
use service::{InventoryStore, LoadState, ServiceError};

fn tmp_file() -> PathBuf {
    std::env::temp_dir().join(format!("inventory_scenario_{}.json", uuid::Uuid::new_v4()))
}

fn mouse() -> ProductInput {
    ProductInput::new(1, "Mouse", Some("Electronics"), 1500.0, 10)
}

#[tokio::test]
async fn add_to_empty_store_then_summarize() -> Result<(), anyhow::Error> {
    let path = tmp_file();
    let mut store = InventoryStore::open_json(&path).await?;
    store.add(mouse()).await?;
    assert_eq!(
        store.summary(),
        Summary { count: 1, total_quantity: 10, total_value: 15000.0 }
    );
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn adding_the_same_id_twice_fails_and_changes_nothing() -> Result<(), anyhow::Error> {
    let path = tmp_file();
    let mut store = InventoryStore::open_json(&path).await?;
    store.add(mouse()).await?;
    let on_disk = tokio::fs::read(&path).await?;

    let err = store
        .add(ProductInput::new(1, "Keyboard", Some("Electronics"), 900.0, 1))
        .await
        .expect_err("duplicate id");
    assert!(matches!(err, ServiceError::DuplicateId(1)));
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].name, "Mouse");
    assert_eq!(tokio::fs::read(&path).await?, on_disk);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn search_by_category_fragment_returns_matching_record_only() -> Result<(), anyhow::Error> {
    let path = tmp_file();
    let mut store = InventoryStore::open_json(&path).await?;
    store.add(mouse()).await?;
    store.add(ProductInput::new(2, "Rice", Some("Grocery"), 3.0, 50)).await?;
    let before = store.snapshot();

    let found = store.search("elec");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);
    assert_eq!(store.list(), before.as_slice());
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn deleting_an_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
    let path = tmp_file();
    let mut store = InventoryStore::open_json(&path).await?;
    store.add(mouse()).await?;
    let err = store.delete(99).await.expect_err("unknown id");
    assert!(matches!(err, ServiceError::NotFound(99)));
    assert_eq!(store.list().len(), 1);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn corrupt_file_opens_empty_and_is_overwritten_by_next_save() -> Result<(), anyhow::Error> {
    let path = tmp_file();
    tokio::fs::write(&path, "{{{ definitely not an inventory").await?;

    let mut store = InventoryStore::open_json(&path).await?;
    assert!(store.is_degraded());
    assert!(matches!(store.load_state(), LoadState::Recovered { .. }));
    assert!(store.list().is_empty());

    store.add(mouse()).await?;
    let reopened = InventoryStore::open_json(&path).await?;
    assert!(!reopened.is_degraded());
    assert_eq!(reopened.list().len(), 1);
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn saved_file_uses_the_documented_layout() -> Result<(), anyhow::Error> {
    let path = tmp_file();
    let mut store = InventoryStore::open_json(&path).await?;
    store.add(ProductInput::new(3, "Pen", None, 0.5, 100)).await?;

    let json: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&path).await?)?;
    assert_eq!(
        json,
        serde_json::json!([
            {"Id": 3, "Name": "Pen", "Category": "Other", "Price": 0.5, "Quantity": 100}
        ])
    );
    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}
