use anyhow::Result;
use std::collections::HashSet;

use super::temp_db;
use crate::app_entry::{self, AppFields};
use crate::errors::ModelError;
use crate::{site_setting, site_view};

fn sample(title: &str) -> AppFields {
    AppFields {
        category: Some("tools".into()),
        title: Some(title.into()),
        version: Some("1.0.2".into()),
        status: Some("Working".into()),
        color: Some("#ff0055".into()),
        img: Some("https://cdn.example.com/icon.png".into()),
        desc: Some("A small utility".into()),
        link: Some("https://example.com/download".into()),
    }
}

#[tokio::test]
async fn counter_is_created_on_first_increment() -> Result<()> {
    let (_dir, db) = temp_db().await?;

    assert_eq!(site_view::current(&db).await?, None);
    assert_eq!(site_view::increment(&db).await?, 1);
    assert_eq!(site_view::increment(&db).await?, 2);
    assert_eq!(site_view::current(&db).await?, Some(2));
    Ok(())
}

#[tokio::test]
async fn set_count_upserts_and_rejects_negative() -> Result<()> {
    let (_dir, db) = temp_db().await?;

    site_view::set_count(&db, 41).await?;
    assert_eq!(site_view::increment(&db).await?, 42);

    let err = site_view::set_count(&db, -1).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert_eq!(site_view::current(&db).await?, Some(42));

    site_view::set_count(&db, 0).await?;
    assert_eq!(site_view::current(&db).await?, Some(0));
    Ok(())
}

#[tokio::test]
async fn concurrent_increments_do_not_lose_updates() -> Result<()> {
    let (_dir, db) = temp_db().await?;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let db = db.clone();
        handles.push(tokio::spawn(async move { site_view::increment(&db).await }));
    }
    let mut seen = HashSet::new();
    for h in handles {
        let v = h.await??;
        assert!(seen.insert(v), "count {v} returned twice");
    }
    assert_eq!(site_view::current(&db).await?, Some(16));
    assert_eq!(seen, (1..=16).collect::<HashSet<i64>>());
    Ok(())
}

#[tokio::test]
async fn app_create_list_replace_delete() -> Result<()> {
    let (_dir, db) = temp_db().await?;

    let a = app_entry::create(&db, sample("Alpha")).await?;
    let b = app_entry::create(&db, AppFields { title: Some("Beta".into()), ..Default::default() }).await?;
    assert_ne!(a.id, b.id);

    let all = app_entry::list(&db).await?;
    assert_eq!(all.len(), 2);
    let found = all.iter().find(|m| m.id == a.id).unwrap();
    assert_eq!(found.title.as_deref(), Some("Alpha"));
    assert_eq!(found.link.as_deref(), Some("https://example.com/download"));
    let beta = all.iter().find(|m| m.id == b.id).unwrap();
    assert_eq!(beta.category, None);

    // replacement overwrites every attribute, including clearing to NULL
    let touched = app_entry::replace(&db, &a.id, AppFields { title: Some("Alpha 2".into()), ..Default::default() }).await?;
    assert_eq!(touched, 1);
    let after = app_entry::list(&db).await?;
    let a2 = after.iter().find(|m| m.id == a.id).unwrap();
    assert_eq!(a2.title.as_deref(), Some("Alpha 2"));
    assert_eq!(a2.category, None);
    assert_eq!(a2.desc, None);

    assert!(app_entry::delete(&db, &a.id).await?);
    assert!(!app_entry::delete(&db, &a.id).await?);
    let left = app_entry::list(&db).await?;
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, b.id);
    Ok(())
}

#[tokio::test]
async fn replace_unknown_id_touches_nothing() -> Result<()> {
    let (_dir, db) = temp_db().await?;
    app_entry::create(&db, sample("Keep")).await?;

    let touched = app_entry::replace(&db, "no-such-id", sample("Ghost")).await?;
    assert_eq!(touched, 0);
    let all = app_entry::list(&db).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title.as_deref(), Some("Keep"));
    Ok(())
}

#[tokio::test]
async fn locker_setting_roundtrip() -> Result<()> {
    let (_dir, db) = temp_db().await?;

    assert_eq!(site_setting::get_enabled(&db, site_setting::LOCKER_KEY).await?, None);
    site_setting::set_enabled(&db, site_setting::LOCKER_KEY, false).await?;
    assert_eq!(site_setting::get_enabled(&db, site_setting::LOCKER_KEY).await?, Some(false));
    site_setting::set_enabled(&db, site_setting::LOCKER_KEY, true).await?;
    assert_eq!(site_setting::get_enabled(&db, site_setting::LOCKER_KEY).await?, Some(true));
    Ok(())
}

#[test]
fn app_fields_accept_any_scalar() {
    let fields: AppFields = serde_json::from_value(serde_json::json!({
        "title": "Game",
        "version": 2.5,
        "status": true,
        "color": null,
        "password": "ignored"
    }))
    .unwrap();
    assert_eq!(fields.title.as_deref(), Some("Game"));
    assert_eq!(fields.version.as_deref(), Some("2.5"));
    assert_eq!(fields.status.as_deref(), Some("true"));
    assert_eq!(fields.color, None);
    assert_eq!(fields.link, None);
}
