//! Product repository with filtered, sorted and paginated listing.
//!
//! Every caller-supplied value is bound as a parameter. Sort columns cannot be
//! bound, so they only ever come from [`SortField::column`].

use std::str::FromStr;

use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

use shopfront_core::{CategoryId, Price, ProductId};

use super::{Database, RepositoryError};
use crate::models::{NewProduct, Product};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors from parsing listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid price_range '{0}': use <N, <=N, >N, >=N, =N or N-M")]
    InvalidPriceRange(String),

    #[error("cannot sort by '{0}': use id, name, price, stock_quantity or date_added")]
    UnknownSortField(String),

    #[error("page must be 1 or greater")]
    InvalidPage,

    #[error("page_size must be between 1 and 100")]
    InvalidPageSize,
}

/// A comparison against the product price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFilter {
    Below(Price),
    AtMost(Price),
    Above(Price),
    AtLeast(Price),
    Exactly(Price),
    /// Inclusive on both ends.
    Between(Price, Price),
}

impl FromStr for PriceFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = || FilterError::InvalidPriceRange(s.to_owned());
        let price = |v: &str| Price::parse(v).map_err(|_| invalid());

        if let Some(rest) = input.strip_prefix("<=") {
            Ok(Self::AtMost(price(rest)?))
        } else if let Some(rest) = input.strip_prefix(">=") {
            Ok(Self::AtLeast(price(rest)?))
        } else if let Some(rest) = input.strip_prefix('<') {
            Ok(Self::Below(price(rest)?))
        } else if let Some(rest) = input.strip_prefix('>') {
            Ok(Self::Above(price(rest)?))
        } else if let Some(rest) = input.strip_prefix('=') {
            Ok(Self::Exactly(price(rest)?))
        } else if let Some((lo, hi)) = input.split_once('-') {
            let (lo, hi) = (price(lo)?, price(hi)?);
            if lo > hi {
                return Err(invalid());
            }
            Ok(Self::Between(lo, hi))
        } else {
            Err(invalid())
        }
    }
}

impl PriceFilter {
    fn push_condition(self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let (op, value) = match self {
            Self::Below(v) => ("<", v),
            Self::AtMost(v) => ("<=", v),
            Self::Above(v) => (">", v),
            Self::AtLeast(v) => (">=", v),
            Self::Exactly(v) => ("=", v),
            Self::Between(lo, hi) => {
                builder.push(" AND price BETWEEN ");
                builder.push_bind(lo);
                builder.push(" AND ");
                builder.push_bind(hi);
                return;
            }
        };
        builder.push(format_args!(" AND price {op} "));
        builder.push_bind(value);
    }
}

/// Columns a product listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Price,
    StockQuantity,
    DateAdded,
}

impl SortField {
    /// The column name placed in the `ORDER BY` clause.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::StockQuantity => "stock_quantity",
            Self::DateAdded => "date_added",
        }
    }
}

/// Sort order for a product listing, e.g. `price` or `-date_added`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductSort {
    pub field: SortField,
    pub descending: bool,
}

impl FromStr for ProductSort {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (name, descending) = trimmed
            .strip_prefix('-')
            .map_or((trimmed, false), |rest| (rest, true));

        let field = match name {
            "id" => SortField::Id,
            "name" => SortField::Name,
            "price" => SortField::Price,
            "stock_quantity" => SortField::StockQuantity,
            "date_added" => SortField::DateAdded,
            _ => return Err(FilterError::UnknownSortField(s.to_owned())),
        };

        Ok(Self { field, descending })
    }
}

/// One page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Page {
    /// Create a page from a 1-based page number and a page size.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPage` for page 0 and
    /// `FilterError::InvalidPageSize` for a size outside `1..=MAX_PAGE_SIZE`.
    pub const fn new(number: u32, size: u32) -> Result<Self, FilterError> {
        if number == 0 {
            return Err(FilterError::InvalidPage);
        }
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(FilterError::InvalidPageSize);
        }
        Ok(Self { number, size })
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        self.number
    }

    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Rows skipped before this page: `(number - 1) * size`.
    #[must_use]
    pub fn offset(self) -> i64 {
        (i64::from(self.number) - 1) * i64::from(self.size)
    }
}

/// Criteria for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<CategoryId>,
    pub price: Option<PriceFilter>,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    pub sort: ProductSort,
    pub page: Page,
}

/// Unicode lowercase form stored next to searchable text.
///
/// SQLite's `LOWER` only folds ASCII, so folding happens here on both the
/// stored columns and the search term.
fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Escape `LIKE` wildcards so the search text only matches literally.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in fold_case(search).chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn list_query(filter: ProductFilter) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(
        "SELECT id, name, description, price, stock_quantity, category_id, date_added \
         FROM products WHERE 1 = 1",
    );

    if let Some(category) = filter.category {
        builder.push(" AND category_id = ");
        builder.push_bind(category);
    }

    if let Some(price) = filter.price {
        price.push_condition(&mut builder);
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        builder.push(" AND (name_folded LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR description_folded LIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }

    let direction = if filter.sort.descending { "DESC" } else { "ASC" };
    builder.push(format_args!(
        " ORDER BY {} {direction}",
        filter.sort.field.column()
    ));
    if filter.sort.field != SortField::Id {
        builder.push(", id ASC");
    }

    builder.push(" LIMIT ");
    builder.push_bind(i64::from(filter.page.size()));
    builder.push(" OFFSET ");
    builder.push_bind(filter.page.offset());

    builder
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    db: &'a Database,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a product and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the category does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: NewProduct) -> Result<ProductId, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let id = sqlx::query_scalar::<_, ProductId>(
                        r"
                        INSERT INTO products (
                            name, description, price, stock_quantity, category_id,
                            name_folded, description_folded
                        )
                        VALUES (?, ?, ?, ?, ?, ?, ?)
                        RETURNING id
                        ",
                    )
                    .bind(&product.name)
                    .bind(&product.description)
                    .bind(product.price)
                    .bind(product.stock_quantity)
                    .bind(product.category_id)
                    .bind(fold_case(&product.name))
                    .bind(fold_case(&product.description))
                    .fetch_one(conn)
                    .await?;
                    Ok(id)
                })
            })
            .await
    }

    /// List one page of products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        self.db
            .with_connection(move |conn| {
                Box::pin(async move {
                    let mut builder = list_query(filter);
                    let products = builder
                        .build_query_as::<Product>()
                        .fetch_all(conn)
                        .await?;
                    Ok(products)
                })
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::{CategoryRepository, test_support};

    fn price(s: &str) -> Price {
        Price::parse(s).unwrap()
    }

    #[test]
    fn test_price_filter_parses_every_form() {
        assert_eq!("<10".parse(), Ok(PriceFilter::Below(price("10"))));
        assert_eq!("<=10".parse(), Ok(PriceFilter::AtMost(price("10"))));
        assert_eq!(">5.5".parse(), Ok(PriceFilter::Above(price("5.5"))));
        assert_eq!(">= 5".parse(), Ok(PriceFilter::AtLeast(price("5"))));
        assert_eq!("=3".parse(), Ok(PriceFilter::Exactly(price("3"))));
        assert_eq!(
            "10-20".parse(),
            Ok(PriceFilter::Between(price("10"), price("20")))
        );
    }

    #[test]
    fn test_price_filter_rejects_injection_and_garbage() {
        for input in ["", "abc", "20-10", "<", "< 10 OR 1=1", "1-2-3", "-5"] {
            assert!(
                input.parse::<PriceFilter>().is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_sort_allow_list() {
        assert_eq!(
            "price".parse(),
            Ok(ProductSort {
                field: SortField::Price,
                descending: false
            })
        );
        assert_eq!(
            "-date_added".parse(),
            Ok(ProductSort {
                field: SortField::DateAdded,
                descending: true
            })
        );
        assert!("name; DROP TABLE products".parse::<ProductSort>().is_err());
        assert!("password".parse::<ProductSort>().is_err());
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::default().offset(), 0);
        assert_eq!(Page::new(2, 10).unwrap().offset(), 10);
        assert_eq!(Page::new(0, 10), Err(FilterError::InvalidPage));
        assert_eq!(Page::new(1, 0), Err(FilterError::InvalidPageSize));
        assert_eq!(Page::new(1, MAX_PAGE_SIZE + 1), Err(FilterError::InvalidPageSize));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Tea"), "%tea%");
        assert_eq!(like_pattern("100%_off\\"), "%100\\%\\_off\\\\%");
    }

    #[test]
    fn test_list_query_binds_values() {
        let filter = ProductFilter {
            category: Some(CategoryId::new(3)),
            price: Some(PriceFilter::Between(price("1"), price("9"))),
            search: Some("x' OR '1'='1".to_owned()),
            sort: "-price".parse().unwrap(),
            page: Page::new(2, 5).unwrap(),
        };
        let sql = list_query(filter).into_sql();
        assert!(!sql.contains("OR '1'='1"));
        assert!(sql.contains("category_id = ?"));
        assert!(sql.contains("price BETWEEN ? AND ?"));
        assert!(sql.contains("ORDER BY price DESC, id ASC"));
        assert!(sql.ends_with("LIMIT ? OFFSET ?"));
    }

    async fn seed(db: &Database, count: u32) -> CategoryId {
        let tea = CategoryRepository::new(db).create("Tea").await.unwrap();
        let products = ProductRepository::new(db);
        for i in 1..=count {
            products
                .create(NewProduct {
                    name: format!("Product {i:02}"),
                    description: if i % 2 == 0 {
                        "Loose leaf".to_owned()
                    } else {
                        "Bagged".to_owned()
                    },
                    price: Price::parse(&i.to_string()).unwrap(),
                    stock_quantity: i,
                    category_id: (i % 3 == 0).then_some(tea),
                })
                .await
                .unwrap();
        }
        tea
    }

    #[tokio::test]
    async fn test_second_page_returns_rows_eleven_to_twenty() {
        let db = test_support::database().await;
        seed(&db, 25).await;

        let products = ProductRepository::new(&db)
            .list(ProductFilter {
                page: Page::new(2, 10).unwrap(),
                ..ProductFilter::default()
            })
            .await
            .unwrap();

        let ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let db = test_support::database().await;
        seed(&db, 8).await;

        let products = ProductRepository::new(&db)
            .list(ProductFilter {
                page: Page::new(2, 10).unwrap(),
                ..ProductFilter::default()
            })
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_filters_combine() {
        let db = test_support::database().await;
        let tea = seed(&db, 12).await;

        let products = ProductRepository::new(&db)
            .list(ProductFilter {
                category: Some(tea),
                price: Some(">=6".parse().unwrap()),
                search: Some("LOOSE".to_owned()),
                sort: "-price".parse().unwrap(),
                page: Page::default(),
            })
            .await
            .unwrap();

        // Category rows are multiples of three; "Loose leaf" rows are even
        let ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![12, 6]);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = test_support::database().await;
        seed(&db, 3).await;

        let products = ProductRepository::new(&db)
            .list(ProductFilter {
                search: Some("%".to_owned()),
                ..ProductFilter::default()
            })
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_like_pattern_folds_non_ascii() {
        assert_eq!(like_pattern("ÉCLAIR"), "%éclair%");
    }

    #[tokio::test]
    async fn test_search_folds_non_ascii_case() {
        let db = test_support::database().await;
        let products = ProductRepository::new(&db);
        products
            .create(NewProduct {
                name: "Éclair".to_owned(),
                description: "Crème pâtissière".to_owned(),
                price: price("3.20"),
                stock_quantity: 6,
                category_id: None,
            })
            .await
            .unwrap();

        for term in ["éclair", "ÉCLAIR", "CRÈME"] {
            let found = products
                .list(ProductFilter {
                    search: Some(term.to_owned()),
                    ..ProductFilter::default()
                })
                .await
                .unwrap();
            assert_eq!(found.len(), 1, "{term} should match");
            assert_eq!(found[0].name, "Éclair");
        }
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let db = test_support::database().await;
        let err = ProductRepository::new(&db)
            .create(NewProduct {
                name: "Orphan".to_owned(),
                description: String::new(),
                price: Price::ZERO,
                stock_quantity: 0,
                category_id: Some(CategoryId::new(99)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference));
    }

    #[tokio::test]
    async fn test_price_round_trips() {
        let db = test_support::database().await;
        let products = ProductRepository::new(&db);
        products
            .create(NewProduct {
                name: "Kettle".to_owned(),
                description: "Steel".to_owned(),
                price: price("19.99"),
                stock_quantity: 4,
                category_id: None,
            })
            .await
            .unwrap();

        let listed = products.list(ProductFilter::default()).await.unwrap();
        assert_eq!(listed[0].price, price("19.99"));
        assert_eq!(listed[0].category_id, None);
    }
}
