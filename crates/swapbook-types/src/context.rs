//! Ambient context of one external call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, TransactionId};

/// Who is calling, when, and under which host transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    pub caller: Address,
    pub timestamp: DateTime<Utc>,
    pub transaction: TransactionId,
}

impl CallContext {
    #[must_use]
    pub fn new(caller: Address, timestamp: DateTime<Utc>, transaction: TransactionId) -> Self {
        Self {
            caller,
            timestamp,
            transaction,
        }
    }
}
