use super::*;
use gp_core::ID;
use gp_core::Unique;
use gp_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Repository trait for guide persistence.
/// Only two predicates exist: lookup by id and field-equality scans.
#[allow(async_fn_in_trait)]
pub trait GuideRepository {
    async fn create(&self, guide: &Guide) -> Result<(), PgErr>;
    async fn find(&self, id: ID<Guide>) -> Result<Option<Guide>, PgErr>;
    async fn by_author(&self, author: &str) -> Result<Vec<Guide>, PgErr>;
    async fn by_tag(&self, tag: &str) -> Result<Vec<Guide>, PgErr>;
    async fn all(&self) -> Result<Vec<Guide>, PgErr>;
    async fn update(&self, guide: &Guide) -> Result<(), PgErr>;
    async fn delete(&self, id: ID<Guide>) -> Result<(), PgErr>;
}

/// A row whose section arrays disagree in length is unreadable; it is logged
/// and dropped from results rather than panicking mid-request.
fn hydrate(row: &tokio_postgres::Row) -> Option<Guide> {
    let id = row.get::<_, uuid::Uuid>(0);
    let headings: Vec<String> = row.get(4);
    let bodies: Vec<String> = row.get(5);
    let images: Vec<Option<String>> = row.get(6);
    let Some(sections) = Section::zip(headings, bodies, images) else {
        log::error!("guide {} has misaligned section arrays", id);
        return None;
    };
    Some(Guide::new(
        ID::from(id),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, String>(3),
        sections,
    ))
}

const COLUMNS: &str = "id, author, title, tag, headings, bodies, images";

impl GuideRepository for Arc<Client> {
    async fn create(&self, guide: &Guide) -> Result<(), PgErr> {
        let (headings, bodies, images) = guide.columns();
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                GUIDES,
                " (id, author, title, tag, headings, bodies, images)
                  VALUES ($1, $2, $3, $4, $5, $6, $7)"
            ),
            &[
                &guide.id().inner(),
                &guide.author(),
                &guide.title(),
                &guide.tag(),
                &headings,
                &bodies,
                &images,
            ],
        )
        .await
        .map(|_| ())
    }

    async fn find(&self, id: ID<Guide>) -> Result<Option<Guide>, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", GUIDES, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.and_then(|row| hydrate(&row)))
    }

    async fn by_author(&self, author: &str) -> Result<Vec<Guide>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                GUIDES,
                " WHERE author = $1 ORDER BY id DESC"
            ),
            &[&author],
        )
        .await
        .map(|rows| rows.iter().filter_map(hydrate).collect())
    }

    async fn by_tag(&self, tag: &str) -> Result<Vec<Guide>, PgErr> {
        self.query(
            const_format::concatcp!(
                "SELECT ",
                COLUMNS,
                " FROM ",
                GUIDES,
                " WHERE tag = $1 ORDER BY id DESC"
            ),
            &[&tag],
        )
        .await
        .map(|rows| rows.iter().filter_map(hydrate).collect())
    }

    async fn all(&self) -> Result<Vec<Guide>, PgErr> {
        self.query(
            const_format::concatcp!("SELECT ", COLUMNS, " FROM ", GUIDES, " ORDER BY id DESC"),
            &[],
        )
        .await
        .map(|rows| rows.iter().filter_map(hydrate).collect())
    }

    async fn update(&self, guide: &Guide) -> Result<(), PgErr> {
        let (headings, bodies, images) = guide.columns();
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                GUIDES,
                " SET title = $2, tag = $3, headings = $4, bodies = $5, images = $6
                  WHERE id = $1"
            ),
            &[
                &guide.id().inner(),
                &guide.title(),
                &guide.tag(),
                &headings,
                &bodies,
                &images,
            ],
        )
        .await
        .map(|_| ())
    }

    async fn delete(&self, id: ID<Guide>) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", GUIDES, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await
        .map(|_| ())
    }
}
