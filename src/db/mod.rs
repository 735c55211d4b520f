mod from_row;
mod schema;
pub mod queries;

pub use schema::init_db;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::gateway::GatewayClient;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state holding the database pool, the injected gateway
/// client, and configuration the handlers need.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    /// Payment gateway client; lifecycle owned by the composition root
    pub gateway: GatewayClient,
    /// Base URL for gateway callbacks (e.g., https://api.example.com)
    pub base_url: String,
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    Pool::builder().max_size(10).build(manager)
}
