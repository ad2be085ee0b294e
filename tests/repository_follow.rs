mod common;

use smallifier::domain::entities::NewFollow;
use smallifier::domain::repositories::FollowRepository;
use smallifier::infrastructure::persistence::SqliteFollowRepository;

fn new_follow(short_path: &str, ts: i64) -> NewFollow {
    NewFollow {
        short_path: short_path.to_string(),
        ts,
        ip: "10.0.0.1".to_string(),
        forwarded_for: String::new(),
    }
}

#[tokio::test]
async fn test_record_and_count() {
    let db = common::create_test_db().await;
    let repo = SqliteFollowRepository::new(db.pool.clone());

    assert_eq!(repo.count_for("lemurs01").await.unwrap(), 0);

    repo.record(new_follow("lemurs01", 1)).await.unwrap();
    repo.record(new_follow("lemurs01", 2)).await.unwrap();
    repo.record(new_follow("lemurs02", 3)).await.unwrap();

    assert_eq!(repo.count_for("lemurs01").await.unwrap(), 2);
    assert_eq!(repo.count_for("lemurs02").await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_is_in_insertion_order() {
    let db = common::create_test_db().await;
    let repo = SqliteFollowRepository::new(db.pool.clone());

    for ts in [30, 10, 20] {
        repo.record(new_follow("ordered1", ts)).await.unwrap();
    }

    let follows = repo.list_for("ordered1").await.unwrap();
    let ts: Vec<i64> = follows.iter().map(|f| f.ts).collect();
    assert_eq!(ts, vec![30, 10, 20]);
    assert!(follows.iter().all(|f| f.short_path == "ordered1"));
}

#[tokio::test]
async fn test_follow_for_unknown_link_is_stored() {
    let db = common::create_test_db().await;
    let repo = SqliteFollowRepository::new(db.pool.clone());

    repo.record(new_follow("orphan01", 1)).await.unwrap();

    assert_eq!(repo.count_for("orphan01").await.unwrap(), 1);
}
