//! MongoDB connection
//!
//! Owns the driver client and the database all entity collections live in.

use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use mongorm::{DocumentStore, Entity, StoreError};

use crate::collection::MongoCollection;
use crate::config::MongoConfig;
use crate::error::store_error;

/// Connected MongoDB client and database
#[derive(Debug, Clone)]
pub struct MongoDb {
    client: Client,
    database: Database,
}

impl MongoDb {
    /// Connect using the given configuration.
    ///
    /// The driver connects lazily; call [`MongoDb::ping`] to verify the
    /// server is reachable.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.connection_string)
            .await
            .map_err(store_error)?;
        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options).map_err(store_error)?;
        tracing::info!("MongoDB client ready for database {}", config.database_name);

        Ok(Self::from_client(client, &config.database_name))
    }

    pub fn from_client(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Self { client, database }
    }

    /// Round-trip a `ping` command to the server
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }

    /// The underlying driver client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The database holding the entity collections
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl DocumentStore for MongoDb {
    type Collection<T: Entity> = MongoCollection<T>;

    fn collection<T: Entity>(&self, name: &str) -> MongoCollection<T> {
        MongoCollection::new(self.database.collection::<Document>(name))
    }
}
