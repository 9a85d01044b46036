//! Repository tests against a real database.
//!
//! Each test gets a fresh database from `#[sqlx::test]` (needs `DATABASE_URL`).

use chrono::{Duration, Utc};
use cinema_db::models::actor::CreateActor;
use cinema_db::models::genre::{CreateGenre, UpdateGenre};
use cinema_db::models::movie::CreateMovie;
use cinema_db::models::session::CreateSession;
use cinema_db::models::user::CreateUser;
use cinema_db::repositories::{ActorRepo, GenreRepo, MovieRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

async fn user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.into(),
        password_hash: "$argon2id$placeholder".into(),
        first_name: String::new(),
        last_name: String::new(),
        is_staff: false,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_missing_reports_unknown_ids_in_input_order(pool: PgPool) {
    let drama = GenreRepo::create(&pool, &CreateGenre { name: "Drama".into() })
        .await
        .unwrap();

    let missing = GenreRepo::find_missing(&pool, &[900, drama.id, 800])
        .await
        .unwrap();
    assert_eq!(missing, vec![900, 800]);

    assert!(GenreRepo::find_missing(&pool, &[]).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn partial_update_keeps_omitted_fields(pool: PgPool) {
    let genre = GenreRepo::create(&pool, &CreateGenre { name: "Drama".into() })
        .await
        .unwrap();

    let unchanged = GenreRepo::update(&pool, genre.id, &UpdateGenre::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "Drama");

    assert!(GenreRepo::update(&pool, genre.id + 1000, &UpdateGenre::default())
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn movie_create_links_relations_once(pool: PgPool) {
    let genre = GenreRepo::create(&pool, &CreateGenre { name: "Drama".into() })
        .await
        .unwrap();
    let actor = ActorRepo::create(
        &pool,
        &CreateActor {
            first_name: "Ann".into(),
            last_name: "One".into(),
        },
    )
    .await
    .unwrap();

    let created = MovieRepo::create(
        &pool,
        &CreateMovie {
            title: "  Padded  ".into(),
            description: String::new(),
            duration: 95,
            genres: vec![genre.id, genre.id],
            actors: vec![actor.id],
        },
    )
    .await
    .unwrap();

    assert_eq!(created.title, "Padded");
    assert_eq!(created.genres, vec![genre.id]);
    assert_eq!(created.actors, vec![actor.id]);

    let item = MovieRepo::find_list_item(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.genres, vec!["Drama".to_string()]);
    assert_eq!(item.actors, vec!["Ann One".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sessions_are_consumed_once_and_never_when_expired(pool: PgPool) {
    let user_id = user(&pool, "sessions@test.com").await;

    for (hash, expires_at) in [
        ("live-hash", Utc::now() + Duration::days(1)),
        ("stale-hash", Utc::now() - Duration::days(1)),
    ] {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id,
                refresh_token_hash: hash.into(),
                expires_at,
            },
        )
        .await
        .unwrap();
    }

    assert!(SessionRepo::consume(&pool, "stale-hash").await.unwrap().is_none());

    let consumed = SessionRepo::consume(&pool, "live-hash").await.unwrap().unwrap();
    assert_eq!(consumed.user_id, user_id);
    assert!(consumed.is_revoked);
    assert!(SessionRepo::consume(&pool, "live-hash").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoke_all_only_touches_live_sessions_of_that_user(pool: PgPool) {
    let alice = user(&pool, "alice@test.com").await;
    let bob = user(&pool, "bob@test.com").await;

    for (user_id, hash) in [(alice, "a1"), (alice, "a2"), (bob, "b1")] {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id,
                refresh_token_hash: hash.into(),
                expires_at: Utc::now() + Duration::days(1),
            },
        )
        .await
        .unwrap();
    }
    SessionRepo::consume(&pool, "a2").await.unwrap();

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, alice).await.unwrap(), 1);
    assert!(SessionRepo::consume(&pool, "a1").await.unwrap().is_none());
    assert!(SessionRepo::consume(&pool, "b1").await.unwrap().is_some());
}
