//! SeaORM adapter for the books table.

use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ConnectionTrait, DbBackend, DbErr, EntityTrait, FromQueryResult, QueryOrder, QuerySelect,
    Select,
};

use crate::entities::books;

/// The displayed columns of one `books` row
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Signed 64-bit integer type name accepted by `CAST` on `backend`
fn wide_integer(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::MySql => "SIGNED",
        _ => "BIGINT",
    }
}

/// `SELECT CAST(id AS <i64>) AS id, title, author, description FROM books
///  ORDER BY sales_rank ASC, id ASC LIMIT {limit}`
///
/// `id` is widened in SQL so `INT`, `SERIAL`, `INT UNSIGNED` and `BIGINT`
/// keys all decode into `i64`.
pub fn top_by_sales_rank(backend: DbBackend, limit: u64) -> Select<books::Entity> {
    books::Entity::find()
        .select_only()
        .column_as(
            Expr::col((books::Entity, books::Column::Id)).cast_as(Alias::new(wide_integer(backend))),
            "id",
        )
        .columns([
            books::Column::Title,
            books::Column::Author,
            books::Column::Description,
        ])
        .order_by_asc(books::Column::SalesRank)
        .order_by_asc(books::Column::Id)
        .limit(limit)
}

pub async fn find_top_by_sales_rank<C: ConnectionTrait>(
    conn: &C,
    limit: u64,
) -> Result<Vec<BookRow>, DbErr> {
    top_by_sales_rank(conn.get_database_backend(), limit)
        .into_model::<BookRow>()
        .all(conn)
        .await
}
