//! Repository tests against a real Postgres server.
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a server
//! where the user may create databases.

mod common;

use chirpy::chirp::errors::ChirpError;
use chirpy::chirp::models::Chirp;
use chirpy::chirp::models::ChirpBody;
use chirpy::chirp::models::ChirpId;
use chirpy::chirp::ports::ChirpRepository;
use chirpy::repositories::PostgresChirpRepository;
use chirpy::repositories::PostgresUserRepository;
use chirpy::user::errors::UserError;
use chirpy::user::models::EmailAddress;
use chirpy::user::models::User;
use chirpy::user::models::UserId;
use chirpy::user::ports::UserRepository;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use common::postgres::TestDb;

fn user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$2b$04$not.a.real.hash".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn chirp(author: UserId, body: &str, created_at: DateTime<Utc>) -> Chirp {
    Chirp {
        id: ChirpId::new(),
        body: ChirpBody::new(body).unwrap(),
        user_id: author,
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_user_roundtrip_and_duplicate_email() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());

    let created = users.create(user("saul@bettercall.com")).await.unwrap();

    let by_email = users
        .find_by_email(&created.email)
        .await
        .unwrap()
        .expect("User not found by email");
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_email.password_hash, created.password_hash);

    let by_id = users.find_by_id(&created.id).await.unwrap();
    assert!(by_id.is_some());

    let duplicate = users.create(user("saul@bettercall.com")).await;
    assert!(matches!(
        duplicate,
        Err(UserError::EmailAlreadyExists(email)) if email == "saul@bettercall.com"
    ));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_chirp_with_unknown_author() {
    let db = TestDb::new().await;
    let chirps = PostgresChirpRepository::new(db.pool.clone());

    let result = chirps.create(chirp(UserId::new(), "hello", Utc::now())).await;
    assert!(matches!(result, Err(ChirpError::AuthorNotFound(_))));

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_chirps_listed_oldest_first() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());
    let chirps = PostgresChirpRepository::new(db.pool.clone());

    let author = users.create(user("walt@example.com")).await.unwrap().id;
    let now = Utc::now();
    chirps.create(chirp(author, "newest", now)).await.unwrap();
    chirps
        .create(chirp(author, "oldest", now - Duration::minutes(30)))
        .await
        .unwrap();
    let middle = chirps
        .create(chirp(author, "middle", now - Duration::minutes(10)))
        .await
        .unwrap();

    let bodies: Vec<String> = chirps
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.body.to_string())
        .collect();
    assert_eq!(bodies, ["oldest", "middle", "newest"]);

    let found = chirps.find_by_id(&middle.id).await.unwrap().unwrap();
    assert_eq!(found.body.as_str(), "middle");
    assert_eq!(found.user_id, author);

    db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires Postgres at DATABASE_URL"]
async fn test_delete_all_users_cascades_to_chirps() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());
    let chirps = PostgresChirpRepository::new(db.pool.clone());

    let walt = users.create(user("walt@example.com")).await.unwrap().id;
    let jesse = users.create(user("jesse@example.com")).await.unwrap().id;
    let posted = chirps
        .create(chirp(walt, "say my name", Utc::now()))
        .await
        .unwrap();
    chirps
        .create(chirp(jesse, "yeah science", Utc::now()))
        .await
        .unwrap();

    assert_eq!(users.delete_all().await.unwrap(), 2);

    assert!(users.find_by_id(&walt).await.unwrap().is_none());
    assert!(chirps.list_all().await.unwrap().is_empty());
    assert!(chirps.find_by_id(&posted.id).await.unwrap().is_none());

    db.cleanup().await;
}
