//! LMDB implementation of KeyValueStore.

use std::sync::Arc;

use heed::types::Str;
use heed::{Database, Env};

use redeem_store::{KeyValueStore, StoreError};

use crate::LmdbError;

#[derive(Clone)]
pub struct LmdbKvStore {
    pub(crate) env: Arc<Env>,
    pub(crate) kv_db: Database<Str, Str>,
}

impl KeyValueStore for LmdbKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .kv_db
            .get(&rtxn, key)
            .map_err(LmdbError::from)?
            .map(str::to_owned);
        Ok(val)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.kv_db
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.kv_db
            .delete(&mut wtxn, key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
