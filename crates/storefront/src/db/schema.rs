//! Relation definitions and idempotent schema creation.

use super::Database;

/// `CREATE TABLE IF NOT EXISTS` statements in foreign key dependency order.
const RELATIONS: &[(&str, &str)] = &[
    (
        "users",
        r"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
    (
        "categories",
        r"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        ",
    ),
    (
        "products",
        r"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL CHECK (price >= 0),
            stock_quantity INTEGER NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0),
            category_id INTEGER REFERENCES categories (id),
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            name_folded TEXT NOT NULL DEFAULT '',
            description_folded TEXT NOT NULL DEFAULT ''
        )
        ",
    ),
    (
        "orders",
        r"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users (id),
            total_price REAL NOT NULL CHECK (total_price >= 0),
            status TEXT NOT NULL,
            order_date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
    (
        "carts",
        r"
        CREATE TABLE IF NOT EXISTS carts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users (id),
            product_id INTEGER NOT NULL REFERENCES products (id),
            quantity INTEGER NOT NULL CHECK (quantity >= 1),
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
    (
        "reviews",
        r"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users (id),
            product_id INTEGER NOT NULL REFERENCES products (id),
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            review_text TEXT NOT NULL,
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
    (
        "addresses",
        r"
        CREATE TABLE IF NOT EXISTS addresses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users (id),
            address_line1 TEXT NOT NULL CHECK (address_line1 <> ''),
            address_line2 TEXT,
            city TEXT NOT NULL CHECK (city <> ''),
            state TEXT NOT NULL CHECK (state <> ''),
            zip_code TEXT NOT NULL CHECK (zip_code <> ''),
            country TEXT NOT NULL CHECK (country <> ''),
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
    (
        "payments",
        r"
        CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users (id),
            order_id INTEGER NOT NULL REFERENCES orders (id),
            payment_method TEXT NOT NULL,
            transaction_id TEXT NOT NULL,
            payment_status TEXT NOT NULL,
            date_added TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
    (
        "sessions",
        r"
        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users (id),
            session_token TEXT NOT NULL,
            expiration_date TEXT NOT NULL,
            date_created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        ",
    ),
];

/// Names of every relation created by [`ensure_schema`], in creation order.
#[must_use]
pub fn relation_names() -> Vec<&'static str> {
    RELATIONS.iter().map(|(name, _)| *name).collect()
}

/// Create every relation that does not exist yet.
///
/// Safe to call on every start. A failure on one relation is logged and the
/// remaining relations are still attempted; the names of the failed relations
/// are returned so callers can decide whether to continue.
pub async fn ensure_schema(db: &Database) -> Vec<&'static str> {
    let mut failed = Vec::new();

    for &(name, ddl) in RELATIONS {
        let result = db
            .with_connection(move |conn| {
                Box::pin(async move {
                    sqlx::query(ddl).execute(conn).await?;
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => tracing::debug!(relation = name, "Relation ensured"),
            Err(e) => {
                tracing::error!(relation = name, error = %e, "Failed to create relation");
                failed.push(name);
            }
        }
    }

    if failed.is_empty() {
        tracing::info!(relations = RELATIONS.len(), "Schema ready");
    }

    failed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn table_names(db: &Database) -> Vec<String> {
        db.with_connection(|conn| {
            Box::pin(async move {
                let names = sqlx::query_scalar::<_, String>(
                    "SELECT name FROM sqlite_master WHERE type = 'table' \
                     AND name NOT LIKE 'sqlite_%' ORDER BY name",
                )
                .fetch_all(conn)
                .await?;
                Ok(names)
            })
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_creates_all_relations() {
        let db = Database::in_memory().await.unwrap();
        assert!(ensure_schema(&db).await.is_empty());

        let mut expected: Vec<String> = relation_names().iter().map(ToString::to_string).collect();
        expected.sort();
        assert_eq!(table_names(&db).await, expected);
    }

    #[tokio::test]
    async fn test_ensure_twice_keeps_rows() {
        let db = Database::in_memory().await.unwrap();
        assert!(ensure_schema(&db).await.is_empty());

        db.with_connection(|conn| {
            Box::pin(async move {
                sqlx::query("INSERT INTO categories (name) VALUES (?)")
                    .bind("Tea")
                    .execute(conn)
                    .await?;
                Ok(())
            })
        })
        .await
        .unwrap();

        let before = table_names(&db).await;
        assert!(ensure_schema(&db).await.is_empty());
        assert_eq!(table_names(&db).await, before);

        let count = db
            .with_connection(|conn| {
                Box::pin(async move {
                    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
                        .fetch_one(conn)
                        .await?;
                    Ok(count)
                })
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_use_real_relation_names() {
        let db = Database::in_memory().await.unwrap();
        assert!(ensure_schema(&db).await.is_empty());

        let targets = db
            .with_connection(|conn| {
                Box::pin(async move {
                    let targets = sqlx::query_scalar::<_, String>(
                        "SELECT DISTINCT \"table\" FROM pragma_foreign_key_list('orders')",
                    )
                    .fetch_all(conn)
                    .await?;
                    Ok(targets)
                })
            })
            .await
            .unwrap();
        assert_eq!(targets, vec!["users".to_string()]);
    }
}
