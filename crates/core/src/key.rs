// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical reconciliation keys.
//!
//! A key joins `type:id` pairs with `-` in path order, e.g.
//! `biz:1-set:7-host:1000`. Both sides of a reconciliation are keyed this
//! way and compared byte-for-byte. No escaping is applied: ids containing
//! `:` or `-` can alias one another.

use crate::resource::{BackendResource, CanonicalResource};
use serde::{Deserialize, Serialize};
use std::fmt;

const PAIR_SEPARATOR: char = ':';
const SEGMENT_SEPARATOR: char = '-';

/// Equality key for a layered resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Key of an IAM-side record, over every layer.
    pub fn from_backend(resource: &BackendResource) -> Self {
        Self::join(
            resource.layers().iter().map(|l| (l.resource_type.as_str(), l.resource_id.as_str())),
        )
    }

    /// Key of a dry-run projection, over its resource-id path.
    pub fn from_canonical(resource: &CanonicalResource) -> Self {
        Self::join(resource.path.iter().map(|s| (s.resource_type.as_str(), s.resource_id.as_str())))
    }

    fn join<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut key = String::new();
        for (i, (resource_type, resource_id)) in pairs.enumerate() {
            if i > 0 {
                key.push(SEGMENT_SEPARATOR);
            }
            key.push_str(resource_type);
            key.push(PAIR_SEPARATOR);
            key.push_str(resource_id);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
