use blog_core::db::open_db_in_memory;
use blog_core::{
    Post, PostRepository, RepoError, ServiceError, SqliteBlogService, SqlitePostRepository,
    SqliteUserRepository, User, UserRepository,
};
use rusqlite::Connection;

#[test]
fn create_user_returns_persisted_user_with_id() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();

    let user = service.create_user("vanya", "Ivanov Ivan").unwrap();

    assert!(user.id.is_some());
    assert_eq!(user.username, "vanya");
    assert_eq!(user.fullname, "Ivanov Ivan");
    assert!(!user.is_admin);
}

#[test]
fn query_all_users_includes_created_user_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();

    let first = service.create_user("vanya", "Ivanov Ivan").unwrap();
    let second = service.create_user("qwerty", "Samuel L. Jackson").unwrap();

    let users = service.query_all_users().unwrap();
    assert_eq!(users.iter().filter(|user| **user == second).count(), 1);
    assert_eq!(users, vec![first, second]);
}

#[test]
fn duplicate_username_fails_on_second_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();

    service.create_user("vanya", "Ivanov Ivan").unwrap();
    let err = service.create_user("vanya", "Someone Else").unwrap_err();

    assert!(err.is_unique_violation(), "unexpected error: {err}");
    assert!(err.to_string().contains("users.username"));
    assert_eq!(service.query_all_users().unwrap().len(), 1);
}

#[test]
fn create_post_derives_slug_and_stamps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();
    let author = service.create_user("qwerty", "Samuel L. Jackson").unwrap();

    let post = service
        .create_post("Post 1", "Body of post 1", author.id.unwrap())
        .unwrap();

    assert!(post.id.is_some());
    assert_eq!(post.title.as_deref(), Some("Post 1"));
    assert_eq!(post.slug.as_deref(), Some("Post-1"));
    assert_eq!(post.body, "Body of post 1");
    assert_eq!(post.user_id, author.id.unwrap());
    assert!(post.created_at.unwrap() > 0);
}

#[test]
fn save_post_keeps_explicit_slug_and_created_at() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();
    let author_id = service.create_user("zorro", "Peter Jackson").unwrap().id.unwrap();

    let mut draft = Post::with_slug("Post 4", "fourth", "Body of post 4", author_id);
    draft.created_at = Some(1_600_000_000_000);
    let saved = service.save_post(draft).unwrap();

    assert_eq!(saved.slug.as_deref(), Some("fourth"));
    assert_eq!(saved.created_at, Some(1_600_000_000_000));
}

#[test]
fn duplicate_slug_fails_on_second_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();
    let author_id = service.create_user("vanya", "Ivanov Ivan").unwrap().id.unwrap();

    service.create_post("Post 1", "first", author_id).unwrap();
    let err = service.create_post("Post!1", "second", author_id).unwrap_err();

    assert!(err.is_unique_violation(), "unexpected error: {err}");
    assert!(err.to_string().contains("posts.slug"));
}

#[test]
fn untitled_posts_do_not_collide_on_slug() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();
    let author_id = service.create_user("vanya", "Ivanov Ivan").unwrap().id.unwrap();

    let first = service.save_post(Post::untitled("one", author_id)).unwrap();
    let second = service.save_post(Post::untitled("two", author_id)).unwrap();

    assert_eq!(first.slug, None);
    assert_eq!(second.slug, None);
}

#[test]
fn post_for_unknown_user_fails_with_foreign_key_violation() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();

    let err = service.create_post("Post 1", "orphan", 42).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::ForeignKeyViolation { .. })
    ));
}

#[test]
fn duplicate_tag_name_fails_on_second_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();

    let tag = service.create_tag("tag1").unwrap();
    assert!(tag.id.is_some());
    assert_eq!(tag.name, "tag1");

    let err = service.create_tag("tag1").unwrap_err();
    assert!(err.is_unique_violation(), "unexpected error: {err}");
}

#[test]
fn posts_by_user_and_author_lookup_follow_ownership() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteBlogService::try_from_conn(&conn).unwrap();
    let vanya = service.create_user("vanya", "Ivanov Ivan").unwrap();
    let qwerty = service.create_user("qwerty", "Samuel L. Jackson").unwrap();

    let p1 = service
        .create_post("Post 1", "b1", qwerty.id.unwrap())
        .unwrap();
    service
        .create_post("Post 2", "b2", vanya.id.unwrap())
        .unwrap();
    let p3 = service
        .create_post("Post 3", "b3", qwerty.id.unwrap())
        .unwrap();

    let owned = service.get_posts_by_user(qwerty.id.unwrap()).unwrap();
    assert_eq!(owned, vec![p1.clone(), p3]);
    assert!(service.get_posts_by_user(999).unwrap().is_empty());

    assert_eq!(
        service.get_post_author(p1.id.unwrap()).unwrap(),
        Some(qwerty)
    );
    assert_eq!(service.get_post_author(999).unwrap(), None);
}

#[test]
fn repositories_read_back_what_they_wrote() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let posts = SqlitePostRepository::try_new(&conn).unwrap();

    let mut admin = User::new("root", "Admin User");
    admin.is_admin = true;
    let admin_id = users.insert_user(&admin).unwrap();
    let loaded = users.get_user(admin_id).unwrap().unwrap();
    assert!(loaded.is_admin);
    assert_eq!(loaded.id, Some(admin_id));

    let post_id = posts
        .insert_post(&Post::new("Hello, World!", "hi", admin_id))
        .unwrap();
    let loaded = posts.get_post(post_id).unwrap().unwrap();
    assert_eq!(loaded.slug.as_deref(), Some("Hello--World-"));
    assert_eq!(posts.get_post(post_id + 1).unwrap(), None);
}

#[test]
fn invalid_persisted_admin_flag_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO users (id, username, fullname, is_admin) VALUES (7, 'bad', 'Bad Row', 5);",
        [],
    )
    .unwrap();

    let users = SqliteUserRepository::try_new(&conn).unwrap();
    let err = users.get_user(7).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repositories_require_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteUserRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("users")));

    let err = SqliteBlogService::try_from_conn(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("users")));
}
