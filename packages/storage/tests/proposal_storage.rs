// ABOUTME: Integration tests for the proposal store against in-memory SQLite
// ABOUTME: Covers numbering retries, view tracking, status overwrites, and admin listing

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use skz_core::{
    Category, Money, NewProposal, PackageRecommendation, ProposalStatus, Recommendation, Savings,
    Timeline,
};
use skz_storage::{
    connect_in_memory, ListQuery, ProposalStorage, SortField, SortOrder, StorageError,
};

fn package(id: &str, reais: i64) -> PackageRecommendation {
    PackageRecommendation {
        id: id.to_string(),
        name: format!("Pacote {}", id),
        price: Money::from_reais(reais),
        original_price: None,
        discount_percent: None,
        description: "Pacote de teste".to_string(),
        includes: vec!["Item".to_string()],
        benefits: Vec::new(),
        delivery_time: "5 dias".to_string(),
        tag: Some("Recomendado".to_string()),
        is_recommended: true,
    }
}

fn new_proposal(client: &str, email: &str, price: i64) -> NewProposal {
    NewProposal {
        client_name: client.to_string(),
        client_email: email.to_string(),
        client_phone: None,
        client_company: Some(format!("{} Ltda", client)),
        client_segment: Some("servicos".to_string()),
        category: Category::Web,
        main_service: "landing_page".to_string(),
        service_option: Some("landing_pro".to_string()),
        challenges: vec!["sales".to_string()],
        timeline: Timeline::Normal,
        budget: Some("1000_2000".to_string()),
        has_branding: Some("sim".to_string()),
        delivery_method: vec!["email".to_string(), "whatsapp".to_string()],
        wants_meeting: true,
        observations: None,
        send_by_email: true,
        send_by_whatsapp: false,
        recommendation: Recommendation {
            recommended: package("landing_page-landing_pro", price),
            alternatives: vec![package("site_institucional", 900)],
            combos: Vec::new(),
            savings: Savings::default(),
        },
    }
}

async fn storage() -> ProposalStorage {
    ProposalStorage::new(connect_in_memory().await.unwrap())
}

#[tokio::test]
async fn create_persists_a_sent_proposal() {
    let storage = storage().await;
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

    let created = storage
        .create_with(&new_proposal("Ana", "ana@example.com", 697), now, |_| {
            "SKZ-20261019-001".to_string()
        })
        .await
        .unwrap();

    assert_eq!(created.status, ProposalStatus::Sent);
    assert_eq!(created.view_count, 0);
    assert_eq!(created.valid_until, now + Duration::days(15));

    let loaded = storage.get(&created.id).await.unwrap();
    assert_eq!(loaded.proposal_number, "SKZ-20261019-001");
    assert_eq!(loaded.created_at, now);
    assert_eq!(loaded.delivery_method, vec!["email", "whatsapp"]);
    assert!(loaded.wants_meeting);
    assert_eq!(loaded.recommended_price(), Money::from_reais(697));
    assert_eq!(loaded.packages().unwrap().alternatives.len(), 1);
}

#[tokio::test]
async fn taken_numbers_are_retried() {
    let storage = storage().await;
    let now = Utc::now();
    storage
        .create_with(&new_proposal("Ana", "ana@example.com", 100), now, |_| {
            "SKZ-20261019-007".to_string()
        })
        .await
        .unwrap();

    let mut candidates = vec!["SKZ-20261019-008", "SKZ-20261019-007"];
    let second = storage
        .create_with(&new_proposal("Bia", "bia@example.com", 100), now, move |_| {
            candidates.pop().unwrap_or("SKZ-20261019-999").to_string()
        })
        .await
        .unwrap();
    assert_eq!(second.proposal_number, "SKZ-20261019-008");

    let exhausted = storage
        .create_with(&new_proposal("Caio", "caio@example.com", 100), now, |_| {
            "SKZ-20261019-007".to_string()
        })
        .await;
    assert!(matches!(exhausted, Err(StorageError::ProposalNumberExhausted(10))));
}

#[tokio::test]
async fn generated_numbers_follow_the_pattern() {
    let storage = storage().await;
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();
    let date = created.created_at.format("%Y%m%d").to_string();
    assert!(created.proposal_number.starts_with(&format!("SKZ-{}-", date)));
    assert_eq!(created.proposal_number.len(), "SKZ-YYYYMMDD-NNN".len());
}

#[tokio::test]
async fn views_transition_once_and_always_count() {
    let storage = storage().await;
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();
    let now = Utc::now();

    let first = storage.record_view(&created.id, now).await.unwrap();
    assert_eq!(first.view_count, 1);
    assert_eq!(first.status, ProposalStatus::Viewed);
    assert!(first.first_view);

    let second = storage.record_view(&created.id, now).await.unwrap();
    assert_eq!(second.view_count, 2);
    assert!(!second.first_view);

    // Accepted proposals keep their status but still count views
    storage
        .update_status(&created.id, ProposalStatus::Accepted, Some("combo-full"), now)
        .await
        .unwrap();
    let third = storage.record_view(&created.id, now).await.unwrap();
    assert_eq!(third.view_count, 3);
    assert_eq!(third.status, ProposalStatus::Accepted);
    assert!(!third.first_view);

    let loaded = storage.get(&created.id).await.unwrap();
    assert!(loaded.last_viewed_at.is_some());
}

#[tokio::test]
async fn concurrent_views_are_not_lost() {
    let pool = connect_in_memory().await.unwrap();
    let storage = std::sync::Arc::new(ProposalStorage::new(pool));
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let storage = storage.clone();
        let id = created.id.clone();
        handles.push(tokio::spawn(async move {
            storage.record_view(&id, Utc::now()).await.unwrap()
        }));
    }
    let mut first_views = 0;
    for handle in handles {
        if handle.await.unwrap().first_view {
            first_views += 1;
        }
    }

    assert_eq!(first_views, 1);
    assert_eq!(storage.get(&created.id).await.unwrap().view_count, 20);
}

#[tokio::test]
async fn unknown_ids_have_no_side_effects() {
    let storage = storage().await;
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();

    assert!(matches!(
        storage.record_view("missing", Utc::now()).await,
        Err(StorageError::NotFound(_))
    ));
    assert!(matches!(
        storage
            .update_status("missing", ProposalStatus::Rejected, None, Utc::now())
            .await,
        Err(StorageError::NotFound(_))
    ));
    assert!(storage.find("missing").await.unwrap().is_none());

    let untouched = storage.get(&created.id).await.unwrap();
    assert_eq!(untouched.view_count, 0);
    assert_eq!(untouched.status, ProposalStatus::Sent);
}

#[tokio::test]
async fn status_patch_overwrites_without_rules() {
    let storage = storage().await;
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();
    let now = Utc::now();

    let rejected = storage
        .update_status(&created.id, ProposalStatus::Rejected, Some("site_institucional"), now)
        .await
        .unwrap();
    assert_eq!(rejected.status, ProposalStatus::Rejected);
    assert_eq!(rejected.selected_package.as_deref(), Some("site_institucional"));

    // Back to DRAFT is allowed, and the selection survives an absent package
    let draft = storage
        .update_status(&created.id, ProposalStatus::Draft, None, now)
        .await
        .unwrap();
    assert_eq!(draft.status, ProposalStatus::Draft);
    assert_eq!(draft.selected_package.as_deref(), Some("site_institucional"));
}

#[tokio::test]
async fn mark_email_sent_stamps_the_record() {
    let storage = storage().await;
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();
    let at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    storage.mark_email_sent(&created.id, at).await.unwrap();
    assert_eq!(storage.get(&created.id).await.unwrap().email_sent_at, Some(at));
}

#[tokio::test]
async fn listing_filters_sorts_and_counts() {
    let storage = storage().await;
    let base = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
    let mut ids = Vec::new();
    for (i, (name, price)) in [("Ana", 300), ("Bruno", 1200), ("Carla", 650), ("Diego_50%", 90)]
        .into_iter()
        .enumerate()
    {
        let email = format!("{}@example.com", name.to_lowercase());
        let number = format!("SKZ-20261001-{:03}", i);
        let created = storage
            .create_with(
                &new_proposal(name, &email, price),
                base + Duration::hours(i as i64),
                move |_| number.clone(),
            )
            .await
            .unwrap();
        ids.push(created.id);
    }
    storage.record_view(&ids[1], Utc::now()).await.unwrap();
    storage
        .update_status(&ids[2], ProposalStatus::Accepted, None, Utc::now())
        .await
        .unwrap();

    let newest_first = ListQuery {
        limit: 10,
        ..Default::default()
    };
    let (items, total) = storage.list(&newest_first).await.unwrap();
    assert_eq!(total, 4);
    let names: Vec<&str> = items.iter().map(|p| p.client_name.as_str()).collect();
    assert_eq!(names, vec!["Diego_50%", "Carla", "Bruno", "Ana"]);

    let by_price = ListQuery {
        sort_by: SortField::RecommendedPrice,
        sort_order: SortOrder::Asc,
        limit: 2,
        offset: 1,
        ..Default::default()
    };
    let (items, total) = storage.list(&by_price).await.unwrap();
    assert_eq!(total, 4);
    let prices: Vec<Money> = items.iter().map(|p| p.recommended_price).collect();
    assert_eq!(prices, vec![Money::from_reais(300), Money::from_reais(650)]);

    let viewed = ListQuery {
        status: Some(ProposalStatus::Viewed),
        limit: 10,
        ..Default::default()
    };
    let (items, total) = storage.list(&viewed).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].client_name, "Bruno");

    let search = ListQuery {
        search: Some("_50%".to_string()),
        limit: 10,
        ..Default::default()
    };
    let (items, _) = storage.list(&search).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].client_name, "Diego_50%");

    let by_number = ListQuery {
        search: Some("20261001-002".to_string()),
        limit: 10,
        ..Default::default()
    };
    let (items, _) = storage.list(&by_number).await.unwrap();
    assert_eq!(items[0].client_name, "Carla");

    let counts = storage.status_counts().await.unwrap();
    assert_eq!(counts.total, 4);
    assert_eq!(counts.sent, 2);
    assert_eq!(counts.viewed, 1);
    assert_eq!(counts.accepted, 1);
}

#[tokio::test]
async fn unreadable_package_blob_lists_with_zero_price() {
    let storage = storage().await;
    let created = storage
        .create(&new_proposal("Ana", "ana@example.com", 480))
        .await
        .unwrap();
    sqlx::query("UPDATE proposals SET recommended_package = '{broken' WHERE id = ?")
        .bind(&created.id)
        .execute(storage.pool())
        .await
        .unwrap();

    let (items, _) = storage
        .list(&ListQuery {
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(items[0].recommended_price, Money::ZERO);

    let record = storage.get(&created.id).await.unwrap();
    assert!(record.packages().is_err());
}

#[tokio::test]
async fn file_database_is_created_with_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("proposals.db");
    let pool = skz_storage::connect(Some(path.clone())).await.unwrap();
    let storage = ProposalStorage::new(pool);
    storage
        .create(&new_proposal("Ana", "ana@example.com", 100))
        .await
        .unwrap();
    assert!(path.exists());
}
