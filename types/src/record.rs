//! Burn records: the committed set of a redemption campaign.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Address, TokenIds};

/// One holder's burned tokens.
///
/// The address and ids are normalized on construction and on deserialization,
/// so a record built from `"0xABC…"` with `[501, 500]` is identical to one
/// built from `"0xabc…"` with `[500, 501]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BurnRecord {
    pub address: Address,
    #[serde(rename = "tokenIds", alias = "token_ids")]
    pub token_ids: TokenIds,
}

impl BurnRecord {
    pub fn new(address: Address, token_ids: impl Into<TokenIds>) -> Self {
        Self {
            address,
            token_ids: token_ids.into(),
        }
    }
}

impl fmt::Display for BurnRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} burned {}", self.address, self.token_ids)
    }
}
