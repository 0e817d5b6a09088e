mod common;

use brandkit_error::storage::StorageError;
use brandkit_models::{
    domain::prelude::{CompanyProfile, Freshest, PromoteCompany},
    entities::prelude::{Company, CompanyStaging},
    enums::common::ReviewStatus,
};
use brandkit_repository::CompanyRepository;
use chrono::Utc;
use common::{setup_db, setup_file_db};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};
use tempfile::TempDir;

fn acme() -> CompanyProfile {
    CompanyProfile {
        name: Some("Acme".into()),
        registration_number: Some("REG-42".into()),
        address: Some("1 Road Runner Way".into()),
        country: Some("US".into()),
        postal_code: Some("90210".into()),
        email: Some("hello@acme.test".into()),
        contact: Some("Wile E.".into()),
        logo: Some("/uploads/logos/acme.png".into()),
        banner: None,
    }
}

fn promote_req(staging_id: i32, version: Option<i32>) -> PromoteCompany {
    PromoteCompany {
        staging_id,
        reviewed_by: "alice".into(),
        version,
    }
}

async fn save(db: &DatabaseConnection, profile: CompanyProfile) -> i32 {
    CompanyRepository::save_staging(profile, Some(db))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn saving_twice_keeps_one_pending_draft() {
    let db = setup_db().await;

    let first = CompanyRepository::save_staging(acme(), Some(&db)).await.unwrap();
    let second = CompanyRepository::save_staging(acme(), Some(&db)).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(CompanyStaging::find().count(&db).await.unwrap(), 1);
    assert_eq!(CompanyProfile::from(&second), acme());
    assert_eq!(second.status, ReviewStatus::Pending);
    assert_eq!(second.version, first.version + 1);

    let latest = CompanyRepository::find_latest_staging(Some(&db))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest, second);
}

#[tokio::test]
async fn save_replaces_the_whole_field_set() {
    let db = setup_db().await;
    save(&db, acme()).await;

    let partial = CompanyProfile {
        name: Some("Acme Corp".into()),
        ..Default::default()
    };
    let saved = CompanyRepository::save_staging(partial.clone(), Some(&db))
        .await
        .unwrap();

    assert_eq!(CompanyProfile::from(&saved), partial);
    assert!(saved.logo.is_none());
}

#[tokio::test]
async fn promotion_copies_fields_and_approves_the_draft() {
    let db = setup_db().await;
    let id = save(&db, acme()).await;
    let before = Utc::now();

    let published = CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap();

    assert_eq!(CompanyProfile::from(&published), acme());
    assert_eq!(published.status, ReviewStatus::Published);

    let staging = CompanyRepository::find_staging_by_id(id, Some(&db))
        .await
        .unwrap()
        .expect("staging row is kept");
    assert_eq!(staging.status, ReviewStatus::Approved);
    assert_eq!(staging.reviewed_by.as_deref(), Some("alice"));
    assert!(staging.reviewed_at.unwrap() >= before);

    let live = CompanyRepository::find_published(Some(&db))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(live, published);
}

#[tokio::test]
async fn second_promotion_updates_production_in_place() {
    let db = setup_db().await;
    let id = save(&db, acme()).await;
    let first = CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap();

    let renamed = CompanyProfile {
        name: Some("Acme Corp".into()),
        ..acme()
    };
    save(&db, renamed).await;
    let second = CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name.as_deref(), Some("Acme Corp"));
    assert_eq!(Company::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn promoting_missing_draft_is_not_found_and_writes_nothing() {
    let db = setup_db().await;
    let id = save(&db, acme()).await;

    let err = CompanyRepository::promote(promote_req(id + 100, None), Some(&db))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::EntityNotFound(_)));
    assert_eq!(Company::find().count(&db).await.unwrap(), 0);
    let staging = CompanyStaging::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(staging.status, ReviewStatus::Pending);
    assert!(staging.reviewed_by.is_none());
}

#[tokio::test]
async fn stale_version_conflicts_and_writes_nothing() {
    let db = setup_db().await;
    let id = save(&db, acme()).await;
    let current = save(&db, acme()).await;
    assert_eq!(id, current);

    let err = CompanyRepository::promote(promote_req(id, Some(1)), Some(&db))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
    assert_eq!(Company::find().count(&db).await.unwrap(), 0);
    let staging = CompanyStaging::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(staging.status, ReviewStatus::Pending);
    assert_eq!(staging.version, 2);
}

#[tokio::test]
async fn matching_version_is_accepted() {
    let db = setup_db().await;
    let saved = CompanyRepository::save_staging(acme(), Some(&db)).await.unwrap();

    CompanyRepository::promote(promote_req(saved.id, Some(saved.version)), Some(&db))
        .await
        .unwrap();

    assert_eq!(Company::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn save_after_approval_resets_review_state() {
    let db = setup_db().await;
    let id = save(&db, acme()).await;
    CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap();
    let approved = CompanyStaging::find_by_id(id).one(&db).await.unwrap().unwrap();

    let resaved = CompanyRepository::save_staging(acme(), Some(&db)).await.unwrap();

    assert_eq!(resaved.status, ReviewStatus::Pending);
    assert!(resaved.reviewed_by.is_none());
    assert!(resaved.reviewed_at.is_none());
    assert_eq!(resaved.version, approved.version + 1);
}

#[tokio::test]
async fn data_uri_logo_survives_promotion() {
    let db = setup_db().await;
    let profile = CompanyProfile {
        name: Some("Acme".into()),
        logo: Some("data:image/png;base64,AAAA".into()),
        ..Default::default()
    };

    let staged = CompanyRepository::save_staging(profile, Some(&db)).await.unwrap();
    assert_eq!(staged.name.as_deref(), Some("Acme"));
    assert_eq!(staged.status, ReviewStatus::Pending);

    let unpublished = CompanyRepository::find_logo(Some(&db)).await.unwrap();
    assert!(unpublished.logo.is_none() && unpublished.company_name.is_none());

    CompanyRepository::promote(promote_req(staged.id, None), Some(&db))
        .await
        .unwrap();

    let logo = CompanyRepository::find_logo(Some(&db)).await.unwrap();
    assert_eq!(logo.logo.as_deref(), Some("data:image/png;base64,AAAA"));
    assert_eq!(logo.company_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn editable_follows_the_most_recent_write() {
    let db = setup_db().await;
    assert_eq!(
        CompanyRepository::find_editable(Some(&db)).await.unwrap(),
        Freshest::None
    );

    let id = save(&db, acme()).await;
    assert!(CompanyRepository::find_editable(Some(&db))
        .await
        .unwrap()
        .is_staging());

    // promotion stamps both rows with the same instant
    CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap();
    assert!(CompanyRepository::find_editable(Some(&db))
        .await
        .unwrap()
        .is_production());

    save(&db, acme()).await;
    assert!(CompanyRepository::find_editable(Some(&db))
        .await
        .unwrap()
        .is_staging());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_promotions_yield_one_winner_and_one_conflict() {
    let dir = TempDir::new().unwrap();
    let db = setup_file_db(&dir).await;

    for round in 0..10 {
        let staged = CompanyRepository::save_staging(acme(), Some(&db)).await.unwrap();
        // alternate between an explicit version and the pending-status guard
        let version = (round % 2 == 0).then_some(staged.version);

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let db = db.clone();
                let req = promote_req(staged.id, version);
                tokio::spawn(async move { CompanyRepository::promote(req, Some(&db)).await })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => ok += 1,
                Err(StorageError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("round {round}: unexpected error {other}"),
            }
        }
        assert_eq!((ok, conflicts), (1, 1), "round {round}");

        let staging = CompanyStaging::find_by_id(staged.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(staging.status, ReviewStatus::Approved);
        assert_eq!(staging.version, staged.version + 1);
    }
    assert_eq!(Company::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn promoting_an_approved_draft_without_version_conflicts() {
    let db = setup_db().await;
    let id = save(&db, acme()).await;
    CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap();

    let err = CompanyRepository::promote(promote_req(id, None), Some(&db))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
async fn failed_production_write_rolls_back_the_approval() {
    let db = setup_db().await;
    let saved = CompanyRepository::save_staging(acme(), Some(&db)).await.unwrap();
    db.execute_unprepared("DROP TABLE company").await.unwrap();

    let err = CompanyRepository::promote(promote_req(saved.id, None), Some(&db))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::DBError(_)));
    let staging = CompanyStaging::find_by_id(saved.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(staging.status, ReviewStatus::Pending);
    assert!(staging.reviewed_by.is_none());
    assert!(staging.reviewed_at.is_none());
    assert_eq!(staging.version, saved.version);
}
