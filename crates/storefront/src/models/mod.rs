//! Domain models for the storefront.
//!
//! Row types derive `sqlx::FromRow` and `Serialize` so repositories can read
//! them directly and handlers can return them as JSON. `New*` types carry
//! validated input for inserts.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod order;
pub mod review;
pub mod session;
pub mod session_record;
pub mod user;

pub use address::{Address, NewAddress};
pub use cart::{CartEntry, NewCartEntry};
pub use catalog::{Category, NewProduct, Product};
pub use dashboard::{Dashboard, OrderStats};
pub use order::{NewOrder, NewPayment, Order, Payment};
pub use review::{NewReview, Review};
pub use session::{CurrentUser, keys as session_keys};
pub use session_record::{NewSessionRecord, SessionRecord};
pub use user::{NewUser, User};
