//! Sample-data driver.
//!
//! # Responsibility
//! - Seed three users, five posts, two tags and five post/tag links.
//! - Print the user list and one author's posts.
//!
//! # Invariants
//! - Seeding is not idempotent: a second run against the same file fails on
//!   the first duplicate username.

use crate::model::post::Post;
use crate::model::tag::{PostTag, Tag};
use crate::model::user::User;
use crate::repo::RepoError;
use crate::service::blog_service::{ServiceError, SqliteBlogService};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

const BANNER_WIDTH: usize = 100;

const SAMPLE_USERS: [(&str, &str); 3] = [
    ("vanya", "Ivanov Ivan"),
    ("qwerty", "Samuel L. Jackson"),
    ("zorro", "Peter Jackson"),
];

/// Index into `SAMPLE_USERS` of each sample post's author.
const SAMPLE_POST_AUTHORS: [usize; 5] = [1, 1, 0, 2, 1];

/// `(post index, tag index)` pairs linked after seeding.
const SAMPLE_LINKS: [(usize, usize); 5] = [(0, 0), (1, 0), (1, 1), (2, 1), (3, 0)];

/// Author whose posts are printed.
const FEATURED_AUTHOR: usize = 1;

pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Debug)]
pub enum DemoError {
    Service(ServiceError),
    Io(std::io::Error),
}

impl Display for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "failed to write demo output: {err}"),
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ServiceError> for DemoError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for DemoError {
    fn from(value: RepoError) -> Self {
        Self::Service(ServiceError::Repo(value))
    }
}

impl From<std::io::Error> for DemoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// What a demo run stored and printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    pub users: Vec<User>,
    pub featured_author: User,
    pub featured_posts: Vec<Post>,
    pub tags: Vec<Tag>,
    pub links: Vec<PostTag>,
}

/// Seeds the sample blog on `conn` and writes the summary to `out`.
pub fn run_demo(conn: &Connection, out: &mut impl Write) -> DemoResult<DemoSummary> {
    info!("event=demo_run module=demo status=start");
    let service = SqliteBlogService::try_from_conn(conn)?;

    let mut seeded_users = Vec::with_capacity(SAMPLE_USERS.len());
    for (username, fullname) in SAMPLE_USERS {
        seeded_users.push(service.create_user(username, fullname)?);
    }

    let mut seeded_posts = Vec::with_capacity(SAMPLE_POST_AUTHORS.len());
    for (index, author) in SAMPLE_POST_AUTHORS.into_iter().enumerate() {
        let number = index + 1;
        seeded_posts.push(service.create_post(
            format!("Post {number}"),
            format!("Body of post {number}"),
            persisted_id(seeded_users[author].id)?,
        )?);
    }

    let tags = vec![service.create_tag("tag1")?, service.create_tag("tag2")?];

    let links = SAMPLE_LINKS
        .into_iter()
        .map(|(post, tag)| -> DemoResult<PostTag> {
            Ok(PostTag::new(
                persisted_id(seeded_posts[post].id)?,
                persisted_id(tags[tag].id)?,
            ))
        })
        .collect::<DemoResult<Vec<_>>>()?;
    service.tag_posts(&links)?;

    let users = service.query_all_users()?;
    let featured_author = seeded_users[FEATURED_AUTHOR].clone();
    let featured_posts = service.get_posts_by_user(persisted_id(featured_author.id)?)?;

    let banner = "#".repeat(BANNER_WIDTH);
    writeln!(out, "{banner}")?;
    writeln!(out, "Users: {}", bracketed(&users))?;
    writeln!(out, "{banner}")?;
    writeln!(
        out,
        "Posts of user {} {}",
        featured_author.fullname,
        bracketed(&featured_posts)
    )?;
    out.flush()?;

    info!(
        "event=demo_run module=demo status=ok users={} posts={} tags={} links={}",
        users.len(),
        seeded_posts.len(),
        tags.len(),
        links.len()
    );

    Ok(DemoSummary {
        users,
        featured_author,
        featured_posts,
        tags,
        links,
    })
}

/// Formats items as `[a, b, c]` using their `Display` form.
pub fn bracketed<T: Display>(items: &[T]) -> String {
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

fn persisted_id(id: Option<i64>) -> DemoResult<i64> {
    id.ok_or(DemoError::Service(ServiceError::InconsistentState(
        "persisted row has no id",
    )))
}
