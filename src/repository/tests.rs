//! Repository Integration Tests
//!
//! Exercises the rusqlite repositories against an in-memory database.

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::domain::{
        AssetMeta, AssetType, ChainSettings, Chapter, DrawbackSeverity, InventoryItem, Jump,
        JumpAsset, Profile, Separator, StorageScope,
    };
    use crate::repository::{
        init_db, AssetRepository, ChapterRepository, DbState, InventoryRepository, JumpRepository,
        OrderedRepository, ProfileRepository, Repository, SettingsRepository,
    };

    async fn setup_test_db() -> DbState {
        let state = DbState::new();
        init_db(&state, Path::new(":memory:"))
            .await
            .expect("Failed to init test DB");
        state
    }

    fn jump(title: &str) -> Jump {
        Jump::new(0, title.to_string(), "Somewhere".to_string())
    }

    #[tokio::test]
    async fn test_create_and_list_jumps_in_chain_order() {
        let db = setup_test_db().await;
        let repo = JumpRepository::new(db.conn.clone());

        let first = repo.create(&jump("First")).await.expect("create failed");
        let second = repo.create(&jump("Second")).await.expect("create failed");
        assert!(first.id > 0);
        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);

        let jumps = repo.list().await.expect("list failed");
        assert_eq!(jumps.len(), 2);
        assert_eq!(jumps[0].title, "First");
        assert_eq!(jumps[1].title, "Second");
    }

    #[tokio::test]
    async fn test_update_jump() {
        let db = setup_test_db().await;
        let repo = JumpRepository::new(db.conn.clone());

        let mut created = repo.create(&jump("Original")).await.unwrap();
        created.title = "Renamed".to_string();
        created.status = "Gauntlet".to_string();
        created.cp_spent = 450;

        let updated = repo.update(&created).await.expect("update failed");
        assert_eq!(updated.title, "Renamed");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.status, "Gauntlet");
        assert_eq!(found.cp_spent, 450);
    }

    #[tokio::test]
    async fn test_update_missing_jump_is_not_found() {
        let db = setup_test_db().await;
        let repo = JumpRepository::new(db.conn.clone());

        let mut ghost = jump("Ghost");
        ghost.id = 999;
        assert!(repo.update(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn test_reorder_jump_reassigns_dense_positions() {
        let db = setup_test_db().await;
        let repo = JumpRepository::new(db.conn.clone());

        let a = repo.create(&jump("A")).await.unwrap();
        let _b = repo.create(&jump("B")).await.unwrap();
        let _c = repo.create(&jump("C")).await.unwrap();

        repo.move_to_index(a.id, 2).await.expect("reorder failed");

        let jumps = repo.list().await.unwrap();
        let titles: Vec<&str> = jumps.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
        let positions: Vec<i32> = jumps.iter().map(|j| j.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_reorder_clamps_out_of_range_index() {
        let db = setup_test_db().await;
        let repo = JumpRepository::new(db.conn.clone());

        let a = repo.create(&jump("A")).await.unwrap();
        let _b = repo.create(&jump("B")).await.unwrap();

        repo.move_to_index(a.id, 99).await.expect("reorder failed");
        let jumps = repo.list().await.unwrap();
        assert_eq!(jumps[1].title, "A");
    }

    #[tokio::test]
    async fn test_duplicate_jump_copies_assets() {
        let db = setup_test_db().await;
        let jumps = JumpRepository::new(db.conn.clone());
        let assets = AssetRepository::new(db.conn.clone());

        let source = jumps.create(&jump("Kanto")).await.unwrap();
        assets
            .create(&JumpAsset::new(
                0,
                source.id,
                "Pokedex".to_string(),
                AssetType::Item,
                100,
            ))
            .await
            .unwrap();

        let copy = jumps.duplicate(source.id).await.expect("duplicate failed");
        assert_eq!(copy.title, "Kanto (copy)");
        assert_eq!(copy.position, 1);

        let copied_assets = assets.list_by_jump(copy.id).await.unwrap();
        assert_eq!(copied_assets.len(), 1);
        assert_eq!(copied_assets[0].name, "Pokedex");
    }

    #[tokio::test]
    async fn test_duplicate_missing_jump_creates_nothing() {
        let db = setup_test_db().await;
        let jumps = JumpRepository::new(db.conn.clone());
        let assets = AssetRepository::new(db.conn.clone());

        jumps.create(&jump("Only")).await.unwrap();
        assert!(jumps.duplicate(999).await.is_err());

        // The chain is exactly as it was before the failed copy
        assert_eq!(jumps.list().await.unwrap().len(), 1);
        assert!(assets.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_jump_cascades_to_assets() {
        let db = setup_test_db().await;
        let jumps = JumpRepository::new(db.conn.clone());
        let assets = AssetRepository::new(db.conn.clone());

        let created = jumps.create(&jump("Doomed")).await.unwrap();
        assets
            .create(&JumpAsset::new(
                0,
                created.id,
                "Perk".to_string(),
                AssetType::Perk,
                200,
            ))
            .await
            .unwrap();

        jumps.delete(created.id).await.expect("delete failed");

        assert!(jumps.find_by_id(created.id).await.unwrap().is_none());
        assert!(assets.list_by_jump(created.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_asset_metadata_round_trip() {
        let db = setup_test_db().await;
        let jumps = JumpRepository::new(db.conn.clone());
        let assets = AssetRepository::new(db.conn.clone());

        let owner = jumps.create(&jump("Owner")).await.unwrap();
        let mut drawback = JumpAsset::new(
            0,
            owner.id,
            "Hunted".to_string(),
            AssetType::Drawback,
            300,
        );
        drawback.metadata = AssetMeta::Drawback {
            severity: Some(DrawbackSeverity::Severe),
            house_rule: true,
        };

        let created = assets.create(&drawback).await.unwrap();
        let found = assets.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.asset_type, AssetType::Drawback);
        assert_eq!(
            found.metadata,
            AssetMeta::Drawback {
                severity: Some(DrawbackSeverity::Severe),
                house_rule: true,
            }
        );
    }

    #[tokio::test]
    async fn test_asset_list_by_type() {
        let db = setup_test_db().await;
        let jumps = JumpRepository::new(db.conn.clone());
        let assets = AssetRepository::new(db.conn.clone());

        let owner = jumps.create(&jump("Owner")).await.unwrap();
        for (name, ty) in [
            ("Flight", AssetType::Perk),
            ("Sword", AssetType::Item),
            ("Speed", AssetType::Perk),
        ] {
            assets
                .create(&JumpAsset::new(0, owner.id, name.to_string(), ty, 100))
                .await
                .unwrap();
        }

        let perks = assets.list_by_type(AssetType::Perk).await.unwrap();
        assert_eq!(perks.len(), 2);
        assert!(perks.iter().all(|a| a.asset_type == AssetType::Perk));
    }

    #[tokio::test]
    async fn test_inventory_scope_round_trip() {
        let db = setup_test_db().await;
        let repo = InventoryRepository::new(db.conn.clone());

        let mut item = InventoryItem::new(0, "Medkit".to_string(), StorageScope::Locker);
        item.category = "Supplies".to_string();
        item.quantity = 3;

        let created = repo.create(&item).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.scope, StorageScope::Locker);
        assert_eq!(found.quantity, 3);

        let lockers = repo.list_by_scope(StorageScope::Locker).await.unwrap();
        assert_eq!(lockers.len(), 1);
        assert!(repo
            .list_by_scope(StorageScope::Warehouse)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_profile_boosters_round_trip() {
        let db = setup_test_db().await;
        let repo = ProfileRepository::new(db.conn.clone());

        let mut profile = Profile::new(0, "Jumper".to_string());
        profile.boosters = vec!["Body Mod".to_string(), "Essence".to_string()];

        let created = repo.create(&profile).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.boosters, vec!["Body Mod", "Essence"]);
    }

    #[tokio::test]
    async fn test_chapter_hash_lookup_and_reorder() {
        let db = setup_test_db().await;
        let repo = ChapterRepository::new(db.conn.clone());

        let mut first = Chapter::new(0, "One".to_string(), "body".to_string());
        first.source_hash = Some("abc123".to_string());
        let first = repo.create(&first).await.unwrap();
        let second = repo
            .create(&Chapter::new(0, "Two".to_string(), String::new()))
            .await
            .unwrap();

        assert!(repo.find_by_hash("abc123").await.unwrap().is_some());
        assert!(repo.find_by_hash("missing").await.unwrap().is_none());

        repo.move_to_index(second.id, 0).await.unwrap();
        let chapters = repo.list().await.unwrap();
        assert_eq!(chapters[0].id, second.id);
        assert_eq!(chapters[0].position, 0);
        assert_eq!(chapters[1].id, first.id);
    }

    #[tokio::test]
    async fn test_settings_default_then_round_trip() {
        let db = setup_test_db().await;
        let repo = SettingsRepository::new(db.conn.clone());

        // Seeded row carries the defaults
        let initial = repo.load().await.unwrap();
        assert!(initial.allow_gauntlet);
        assert_eq!(initial.separator, Separator::None);

        let settings = ChainSettings {
            allow_gauntlet: false,
            gauntlet_halved: true,
            separator: Separator::Comma,
        };
        repo.save(&settings).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert!(!loaded.allow_gauntlet);
        assert!(loaded.gauntlet_halved);
        assert_eq!(loaded.separator, Separator::Comma);
    }

    #[tokio::test]
    async fn test_uninitialized_db_reports_error() {
        let db = DbState::new();
        let repo = JumpRepository::new(db.conn.clone());
        assert!(repo.list().await.is_err());
    }
}
