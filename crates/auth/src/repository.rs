use super::*;
use gp_core::ID;
use gp_core::Unique;
use gp_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Repository trait for user account persistence.
/// Abstracts SQL from domain modules.
#[allow(async_fn_in_trait)]
pub trait AuthRepository {
    async fn exists(&self, username: &str, email: &str) -> Result<bool, PgErr>;
    async fn create(&self, member: &Member, hashword: &str) -> Result<(), PgErr>;
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, PgErr>;
    async fn find(&self, id: ID<Member>) -> Result<Option<Member>, PgErr>;
    async fn named(&self, username: &str) -> Result<Option<Member>, PgErr>;
    async fn avatar(&self, id: ID<Member>, path: &str) -> Result<(), PgErr>;
}

fn hydrate(row: &tokio_postgres::Row) -> Member {
    Member::new(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, String>(3),
    )
}

impl AuthRepository for Arc<Client> {
    async fn exists(&self, username: &str, email: &str) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT 1 FROM ",
                USERS,
                " WHERE username = $1 OR email = $2"
            ),
            &[&username, &email],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, username, email, hashword, avatar) VALUES ($1, $2, $3, $4, $5)"
            ),
            &[
                &member.id().inner(),
                &member.username(),
                &member.email(),
                &hashword,
                &member.avatar(),
            ],
        )
        .await
        .map(|_| ())
    }

    /// Login lookup: the email is the contact key, and the stored credential
    /// rides along so the caller can verify without a second round trip.
    async fn lookup(&self, email: &str) -> Result<Option<(Member, String)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, email, avatar, hashword FROM ",
                USERS,
                " WHERE email = $1"
            ),
            &[&email],
        )
        .await
        .map(|opt| opt.map(|row| (hydrate(&row), row.get::<_, String>(4))))
    }

    async fn find(&self, id: ID<Member>) -> Result<Option<Member>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, email, avatar FROM ",
                USERS,
                " WHERE id = $1"
            ),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.map(|row| hydrate(&row)))
    }

    async fn named(&self, username: &str) -> Result<Option<Member>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, email, avatar FROM ",
                USERS,
                " WHERE username = $1"
            ),
            &[&username],
        )
        .await
        .map(|opt| opt.map(|row| hydrate(&row)))
    }

    async fn avatar(&self, id: ID<Member>, path: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET avatar = $2 WHERE id = $1"),
            &[&id.inner(), &path],
        )
        .await
        .map(|_| ())
    }
}
