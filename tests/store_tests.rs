mod common;

use chrono::NaiveDate;
use common::temp_store;
use kpii_homepage::db::{Board, NewBanner, NewPost};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn banner(title: &str, start: &str, end: Option<&str>, order: i64) -> NewBanner {
    NewBanner {
        title: title.to_string(),
        image_url: format!("https://img.example/{title}.png"),
        link_url: "https://kpii.or.kr/".to_string(),
        start_date: d(start),
        end_date: end.map(d),
        order_index: order,
    }
}

fn report(title: &str, created_at: &str) -> NewPost {
    NewPost {
        board: Board::Report,
        title: title.to_string(),
        content: String::new(),
        image_url: None,
        link_url: None,
        start_date: d("2025-01-01"),
        end_date: None,
        created_at: Some(created_at.to_string()),
    }
}

#[tokio::test]
async fn init_schema_seeds_once() {
    let db = temp_store("seed").await;
    let first = db.store.init_schema().await.expect("init");
    assert!(first.admin_created);
    assert_eq!(first.banners_inserted, 2);
    assert_eq!(first.posts_inserted, 6);

    let second = db.store.init_schema().await.expect("re-init");
    assert!(!second.admin_created);
    assert_eq!(second.banners_inserted, 0);
    assert_eq!(second.posts_inserted, 0);

    assert_eq!(db.store.list_all_banners().await.unwrap().len(), 2);
    for board in Board::ALL {
        let expected = if board == Board::Csr { 0 } else { 1 };
        assert_eq!(db.store.count_posts(board).await.unwrap(), expected, "{board}");
    }
}

#[tokio::test]
async fn seed_credential_verifies() {
    let db = temp_store("cred").await;
    db.store.init_schema().await.unwrap();
    assert!(db
        .store
        .verify_admin_password("admin", "kita_admin_1234")
        .await
        .unwrap());
    assert!(!db.store.verify_admin_password("admin", "wrong").await.unwrap());
    assert!(!db
        .store
        .verify_admin_password("nosuch", "kita_admin_1234")
        .await
        .unwrap());
}

#[tokio::test]
async fn corrupt_hash_fails_closed() {
    let db = temp_store("corrupt").await;
    db.store.init_schema().await.unwrap();
    sqlx::query("UPDATE admin_users SET password_hash = 'garbage' WHERE username = 'admin'")
        .execute(db.store.pool())
        .await
        .unwrap();
    assert!(!db
        .store
        .verify_admin_password("admin", "kita_admin_1234")
        .await
        .unwrap());
}

#[tokio::test]
async fn live_banners_follow_date_windows_and_order() {
    let db = temp_store("banners").await;
    db.store.init_schema().await.unwrap();
    for b in db.store.list_all_banners().await.unwrap() {
        db.store.delete_banner(b.id).await.unwrap();
    }

    db.store
        .insert_banner(&banner("B", "2025-01-01", None, 2))
        .await
        .unwrap();
    db.store
        .insert_banner(&banner("A", "2025-01-01", Some("2025-12-31"), 1))
        .await
        .unwrap();

    let later = db.store.list_banners(d("2026-06-01")).await.unwrap();
    assert_eq!(
        later.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(),
        ["B"]
    );

    let during = db.store.list_banners(d("2025-06-01")).await.unwrap();
    assert_eq!(
        during.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(),
        ["A", "B"]
    );

    let on_last_day = db.store.list_banners(d("2025-12-31")).await.unwrap();
    assert_eq!(on_last_day.len(), 2);
    assert!(db.store.list_banners(d("2024-12-31")).await.unwrap().is_empty());
}

#[tokio::test]
async fn banners_with_equal_order_sort_by_id() {
    let db = temp_store("order").await;
    db.store.init_schema().await.unwrap();

    let as_of = d("2025-06-01");
    let first = db
        .store
        .insert_banner(&banner("first", "2025-01-01", None, 0))
        .await
        .unwrap();
    let second = db
        .store
        .insert_banner(&banner("second", "2025-01-01", None, 0))
        .await
        .unwrap();

    let live = db.store.list_banners(as_of).await.unwrap();
    let keys: Vec<(i64, i64)> = live.iter().map(|b| (b.order_index, b.id)).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(live.iter().all(|b| b.is_live(as_of)));
    assert_eq!(&keys[..2], &[(0, first), (0, second)]);
}

#[tokio::test]
async fn delete_banner_is_idempotent() {
    let db = temp_store("delete").await;
    db.store.init_schema().await.unwrap();
    let id = db
        .store
        .insert_banner(&banner("tmp", "2025-01-01", None, 9))
        .await
        .unwrap();
    assert!(db.store.delete_banner(id).await.unwrap());
    assert!(!db.store.delete_banner(id).await.unwrap());
    assert!(!db.store.delete_banner(999_999).await.unwrap());
}

#[tokio::test]
async fn posts_list_newest_first_with_limit() {
    let db = temp_store("posts").await;
    db.store.init_schema().await.unwrap();
    let seeded = db.store.list_posts(Board::Report, 10).await.unwrap();
    assert_eq!(seeded.len(), 1);
    let seed_id = seeded[0].id;
    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(seed_id)
        .execute(db.store.pool())
        .await
        .unwrap();

    db.store
        .insert_post(&report("T1", "2025-03-01 09:00:00"))
        .await
        .unwrap();
    db.store
        .insert_post(&report("T2", "2025-03-02 09:00:00"))
        .await
        .unwrap();
    db.store
        .insert_post(&report("T3", "2025-03-03 09:00:00"))
        .await
        .unwrap();

    let top = db.store.list_posts(Board::Report, 2).await.unwrap();
    assert_eq!(
        top.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        ["T3", "T2"]
    );
}

#[tokio::test]
async fn equal_timestamps_break_ties_by_id() {
    let db = temp_store("ties").await;
    db.store.init_schema().await.unwrap();
    let a = db
        .store
        .insert_post(&report("a", "2030-01-01 00:00:00"))
        .await
        .unwrap();
    let b = db
        .store
        .insert_post(&report("b", "2030-01-01 00:00:00"))
        .await
        .unwrap();
    let top = db.store.list_posts(Board::Report, 2).await.unwrap();
    assert_eq!(top.iter().map(|p| p.id).collect::<Vec<_>>(), [b, a]);
}

#[tokio::test]
async fn insert_post_defaults_created_at() {
    let db = temp_store("created").await;
    db.store.init_schema().await.unwrap();
    let mut post = report("now", "unused");
    post.created_at = None;
    post.board = Board::Photo;
    let id = db.store.insert_post(&post).await.unwrap();

    let photos = db.store.list_posts(Board::Photo, 10).await.unwrap();
    let stored = photos.iter().find(|p| p.id == id).expect("inserted post");
    assert!(!stored.created_at.is_empty());
    // Fresh posts sort ahead of the seed post.
    assert_eq!(photos[0].id, id);
}

#[tokio::test]
async fn change_password_overwrites_hash() {
    let db = temp_store("chpw").await;
    db.store.init_schema().await.unwrap();
    db.store
        .change_admin_password("admin", "new-secret")
        .await
        .unwrap();
    assert!(db.store.verify_admin_password("admin", "new-secret").await.unwrap());
    assert!(!db
        .store
        .verify_admin_password("admin", "kita_admin_1234")
        .await
        .unwrap());
}
