//! Capability rights with a view-only exclusion group
//!
//! A [`RightsSchema`] is a fixed, ordered set of boolean flags, one of which
//! is exclusive: while it is set, no other flag in the row may be set.
//! Every schema uses [`VIEW_ONLY`] as its exclusive flag, so deserialized
//! rights are checked against it before they are accepted.

use crate::error::RowError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the view-only flag
pub const VIEW_ONLY: &str = "viewOnly";

/// One named capability flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityFlag {
    /// Stable key
    pub key: &'static str,
    /// Column label shown on the form
    pub label: &'static str,
}

/// Ordered capability flags with one exclusive flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightsSchema {
    /// Schema name
    pub name: &'static str,
    /// Flags in column order
    pub flags: &'static [CapabilityFlag],
    /// Key of the exclusive (view-only) flag
    pub exclusive: &'static str,
}

/// Rights on the Lynx user interface
pub const LYNX_RIGHTS: RightsSchema = RightsSchema {
    name: "lynx",
    flags: &[
        CapabilityFlag {
            key: VIEW_ONLY,
            label: "View only",
        },
        CapabilityFlag {
            key: "transfer",
            label: "Transfer of crypto assets and FIAT",
        },
        CapabilityFlag {
            key: "trading",
            label: "Trading rights",
        },
        CapabilityFlag {
            key: "staking",
            label: "Staking rights",
        },
    ],
    exclusive: VIEW_ONLY,
};

/// Rights on the API portal
pub const API_RIGHTS: RightsSchema = RightsSchema {
    name: "api",
    flags: &[
        CapabilityFlag {
            key: VIEW_ONLY,
            label: "View only via REST API",
        },
        CapabilityFlag {
            key: "whitelist",
            label: "Requesting whitelisting of wallet address via REST API",
        },
        CapabilityFlag {
            key: "transfer",
            label: "Instruct transfer of crypto assets and FIAT via REST API",
        },
        CapabilityFlag {
            key: "tradingRest",
            label: "Trading rights via REST API",
        },
        CapabilityFlag {
            key: "stakingRest",
            label: "Staking rights via REST API",
        },
        CapabilityFlag {
            key: "tradingFix",
            label: "Trading rights via FIX API",
        },
    ],
    exclusive: VIEW_ONLY,
};

impl RightsSchema {
    /// Check if `key` names a flag of this schema
    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.iter().any(|f| f.key == key)
    }

    /// Flag keys in column order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.flags.iter().map(|f| f.key)
    }

    /// Rights with every flag cleared
    #[must_use]
    pub fn blank(&self) -> CapabilityRights {
        CapabilityRights {
            flags: self.keys().map(|k| (k.to_string(), false)).collect(),
        }
    }
}

/// Flag values of one row, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, bool>",
    into = "IndexMap<String, bool>"
)]
pub struct CapabilityRights {
    flags: IndexMap<String, bool>,
}

impl TryFrom<IndexMap<String, bool>> for CapabilityRights {
    type Error = RowError;

    fn try_from(flags: IndexMap<String, bool>) -> Result<Self, Self::Error> {
        let rights = Self { flags };
        if rights.is_set(VIEW_ONLY) {
            let others: Vec<&str> = rights.granted().filter(|k| *k != VIEW_ONLY).collect();
            if !others.is_empty() {
                return Err(RowError::InconsistentRights(others.join(", ")));
            }
        }
        Ok(rights)
    }
}

impl From<CapabilityRights> for IndexMap<String, bool> {
    fn from(rights: CapabilityRights) -> Self {
        rights.flags
    }
}

impl CapabilityRights {
    /// Value of a flag (false if unknown)
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    /// Keys of the set flags, in schema order
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, value)` in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Set or clear a flag, applying the exclusion rule
    ///
    /// - exclusive flag set → every other flag cleared
    /// - other flag set → exclusive flag cleared
    /// - clearing touches only the named flag
    ///
    /// # Errors
    /// `RowError::UnknownFlag` if `key` is not part of `schema`
    pub fn set(&mut self, schema: &RightsSchema, key: &str, checked: bool) -> Result<(), RowError> {
        if !schema.has_flag(key) {
            return Err(RowError::UnknownFlag {
                schema: schema.name.to_string(),
                flag: key.to_string(),
            });
        }

        if checked {
            if key == schema.exclusive {
                for (k, v) in &mut self.flags {
                    *v = k == key;
                }
            } else {
                self.flags.insert(schema.exclusive.to_string(), false);
            }
        }
        self.flags.insert(key.to_string(), checked);
        Ok(())
    }

    /// Check the exclusion rule
    #[must_use]
    pub fn is_consistent(&self, schema: &RightsSchema) -> bool {
        !self.is_set(schema.exclusive) || self.granted().all(|k| k == schema.exclusive)
    }
}
