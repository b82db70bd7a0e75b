//! Integration tests for role and user persistence.
//!
//! Exercises the repository layer against a real database:
//! - Create and fetch round-trips
//! - Unique constraint violations
//! - Foreign key violations
//! - Explicit role resolution for a user

use assert_matches::assert_matches;
use parking_db::error::{classify, DbErrorKind};
use parking_db::models::role::CreateRole;
use parking_db::models::user::CreateUser;
use parking_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_role(name: &str) -> CreateRole {
    CreateRole {
        role_name: name.to_string(),
        role_description: None,
    }
}

fn new_user(username: &str, role_id: i32) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role_id,
        full_name: None,
        email: None,
        phone_number: None,
        address: None,
    }
}

async fn count_users(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM parking.users")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_role_and_find_by_id(pool: PgPool) {
    let input = CreateRole {
        role_name: "Operator".to_string(),
        role_description: Some("Manages zones".to_string()),
    };
    let role = RoleRepo::create(&pool, &input).await.unwrap();
    assert_eq!(role.role_name, "Operator");
    assert_eq!(role.role_description.as_deref(), Some("Manages zones"));

    let found = RoleRepo::find_by_id(&pool, role.id).await.unwrap();
    assert_eq!(found, Some(role));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_role_name_rejected(pool: PgPool) {
    let first = RoleRepo::create(&pool, &new_role("Admin")).await.unwrap();

    let err = RoleRepo::create(&pool, &new_role("Admin"))
        .await
        .expect_err("Duplicate role name should fail");
    assert_matches!(
        classify(&err),
        DbErrorKind::UniqueViolation { constraint } if constraint == "uq_roles_role_name"
    );

    // The first insert is untouched and still retrievable.
    let found = RoleRepo::find_by_id(&pool, first.id).await.unwrap();
    assert_eq!(found, Some(first));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_role_by_name(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Driver")).await.unwrap();

    let found = RoleRepo::find_by_name(&pool, "Driver").await.unwrap();
    assert_eq!(found.map(|r| r.id), Some(role.id));

    let missing = RoleRepo::find_by_name(&pool, "driver").await.unwrap();
    assert!(missing.is_none(), "Role lookup by name is case-sensitive");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_role_is_none(pool: PgPool) {
    let found = RoleRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_round_trip(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Admin")).await.unwrap();
    let input = CreateUser {
        full_name: Some("Alice Liddell".to_string()),
        email: Some("alice@example.com".to_string()),
        phone_number: Some("+44 20 7946 0000".to_string()),
        address: Some("1 Rabbit Hole".to_string()),
        ..new_user("alice", role.id)
    };

    let created = UserRepo::create(&pool, &input).await.unwrap();
    let fetched = UserRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("User should exist");

    assert_eq!(fetched, created);
    assert_eq!(fetched.username, input.username);
    assert_eq!(fetched.password_hash, input.password_hash);
    assert_eq!(fetched.role_id, role.id);
    assert_eq!(fetched.full_name, input.full_name);
    assert_eq!(fetched.email, input.email);
    assert_eq!(fetched.phone_number, input.phone_number);
    assert_eq!(fetched.address, input.address);
    assert!(fetched.created_at.is_some());
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_rejected(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Driver")).await.unwrap();
    UserRepo::create(&pool, &new_user("bob", role.id))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("bob", role.id))
        .await
        .expect_err("Duplicate username should fail");
    assert_matches!(
        classify(&err),
        DbErrorKind::UniqueViolation { constraint } if constraint == "uq_users_username"
    );
    assert_eq!(count_users(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fk_violation_user_bad_role(pool: PgPool) {
    let err = UserRepo::create(&pool, &new_user("ghost", 999_999))
        .await
        .expect_err("FK violation should fail for non-existent role_id");
    assert_matches!(
        classify(&err),
        DbErrorKind::ForeignKeyViolation { constraint } if constraint == "fk_users_role_id"
    );
    assert_eq!(count_users(&pool).await, 0, "No user row may be persisted");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_role_is_explicit_second_lookup(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Admin")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user("carol", role.id))
        .await
        .unwrap();

    let resolved = UserRepo::find_role(&pool, &user).await.unwrap();
    assert_eq!(resolved, Some(role));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_roles_are_shared_between_users(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Driver")).await.unwrap();
    let a = UserRepo::create(&pool, &new_user("dave", role.id))
        .await
        .unwrap();
    let b = UserRepo::create(&pool, &new_user("erin", role.id))
        .await
        .unwrap();
    assert_eq!(a.role_id, b.role_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_user_by_username(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Driver")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user("frank", role.id))
        .await
        .unwrap();

    let found = UserRepo::find_by_username(&pool, "frank").await.unwrap();
    assert_eq!(found, Some(user));
    assert!(UserRepo::find_by_username(&pool, "nobody")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_refreshes_updated_at(pool: PgPool) {
    let role = RoleRepo::create(&pool, &new_role("Driver")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user("gina", role.id))
        .await
        .unwrap();

    // Push created_at into the past so the trigger's NOW() is strictly later.
    sqlx::query(
        "UPDATE parking.users
         SET created_at = created_at - INTERVAL '1 hour',
             email = 'gina@example.com'
         WHERE id = $1",
    )
    .bind(user.id)
    .execute(&pool)
    .await
    .unwrap();

    let reloaded = UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.updated_at > reloaded.created_at);
}
