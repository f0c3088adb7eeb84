use std::sync::Arc;

use service::listing::{store::memory::InMemoryItemStore, repo::SeaOrmItemStore, ListingService};
use service::users::{repository::memory::InMemoryUserRepository, repo::SeaOrmUserRepository, UserService};
use sea_orm::DatabaseConnection;

/// Settings used to verify caller tokens.
#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub listings: ListingService,
    pub users: UserService,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    /// PostgreSQL-backed services sharing one pool.
    pub fn with_database(db: DatabaseConnection, auth: ServerAuthConfig) -> Self {
        Self {
            listings: ListingService::new(Arc::new(SeaOrmItemStore::new(db.clone()))),
            users: UserService::new(Arc::new(SeaOrmUserRepository { db })),
            auth,
        }
    }

    /// Process-local services; data is lost on restart.
    pub fn in_memory(auth: ServerAuthConfig) -> Self {
        Self {
            listings: ListingService::new(Arc::new(InMemoryItemStore::new())),
            users: UserService::new(Arc::new(InMemoryUserRepository::new())),
            auth,
        }
    }
}
