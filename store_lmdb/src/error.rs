use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("LMDB map is full: {0}")]
    MapFull(String),

    #[error("LMDB value failed to decode: {0}")]
    Decoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        match e {
            heed::Error::Mdb(heed::MdbError::MapFull) => LmdbError::MapFull(e.to_string()),
            heed::Error::Decoding(_) => LmdbError::Decoding(e.to_string()),
            other => LmdbError::Heed(other.to_string()),
        }
    }
}

impl From<LmdbError> for redeem_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::MapFull(msg) => redeem_store::StoreError::Full(msg),
            LmdbError::Decoding(msg) => redeem_store::StoreError::Encoding(msg),
            other => redeem_store::StoreError::Backend(other.to_string()),
        }
    }
}
