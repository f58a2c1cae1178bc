//! Entities: clusters of mentions believed to corefer.
//!
//! Following multi-sieve coreference (Lee et al., 2013), an entity can be
//! queried for any mention feature and answers with the set of values of its
//! members. Members without a value are skipped quietly; only when no member
//! has a value does the query fail.

use crate::error::{Error, Result};
use crate::mention::{Mention, MentionId};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// A non-empty cluster of mentions.
///
/// No promises are made about the order or uniqueness of members after a
/// merge: merging the same entity twice duplicates its mentions.
#[derive(Debug, Clone)]
pub struct Entity {
    mentions: Vec<Arc<Mention>>,
}

impl Entity {
    /// Create an entity from one or more mentions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `mentions` is empty.
    pub fn new(mentions: impl IntoIterator<Item = Arc<Mention>>) -> Result<Self> {
        let mentions: Vec<_> = mentions.into_iter().collect();
        if mentions.is_empty() {
            return Err(Error::invalid_input(
                "An Entity must consist of at least one Mention",
            ));
        }
        Ok(Self { mentions })
    }

    /// Create an entity holding a single mention.
    #[must_use]
    pub fn singleton(mention: impl Into<Arc<Mention>>) -> Self {
        Self {
            mentions: vec![mention.into()],
        }
    }

    /// Number of member mentions (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// Never true for a constructed entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Iterate over the member mentions.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Mention> + ExactSizeIterator + '_ {
        self.mentions.iter().map(|m| &**m)
    }

    /// Shared handles to the member mentions.
    #[must_use]
    pub fn mentions(&self) -> &[Arc<Mention>] {
        &self.mentions
    }

    /// Ids of the member mentions, in member order.
    pub fn mention_ids(&self) -> impl Iterator<Item = MentionId> + '_ {
        self.mentions.iter().map(|m| m.id)
    }

    /// Returns true if a member mention has the given id.
    #[must_use]
    pub fn contains(&self, id: MentionId) -> bool {
        self.mentions.iter().any(|m| m.id == id)
    }

    /// Returns true if `self` and `other` have a mention id in common.
    #[must_use]
    pub fn shares_mention_with(&self, other: &Entity) -> bool {
        let ids: HashSet<MentionId> = self.mention_ids().collect();
        other.mention_ids().any(|id| ids.contains(&id))
    }

    /// Values of a mention feature, one per member that has it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] if no member has a value.
    pub fn non_unique_mention_attr<T, F>(&self, name: &'static str, get: F) -> Result<Vec<T>>
    where
        F: Fn(&Mention) -> Option<T>,
    {
        let values: Vec<T> = self.iter().filter_map(get).collect();
        if values.is_empty() {
            return Err(Error::MissingAttribute(name));
        }
        Ok(values)
    }

    /// Set of the values of a mention feature over the members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] if no member has a value.
    ///
    /// # Example
    ///
    /// ```
    /// use multisieve_core::{Entity, Mention};
    ///
    /// let entity = Entity::new([
    ///     Mention::new(0, [0], 0).with_gender("masc").into(),
    ///     Mention::new(1, [5], 5).into(),
    /// ]).unwrap();
    /// let genders = entity.mention_attr("gender", |m| m.gender.clone()).unwrap();
    /// assert_eq!(genders.len(), 1);
    /// assert!(entity.mention_attr("number", |m| m.number.clone()).is_err());
    /// ```
    pub fn mention_attr<T, F>(&self, name: &'static str, get: F) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
        F: Fn(&Mention) -> Option<T>,
    {
        Ok(self.non_unique_mention_attr(name, get)?.into_iter().collect())
    }

    /// Union of a collection-valued mention feature over the members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] if no member has a value.
    pub fn flat_mention_attr<T, I, F>(&self, name: &'static str, get: F) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
        I: IntoIterator<Item = T>,
        F: Fn(&Mention) -> Option<I>,
    {
        Ok(self
            .non_unique_mention_attr(name, get)?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Append the mentions of `other` to this entity.
    ///
    /// No attention is paid to whether a mention of `other` is already a
    /// member. Use [`crate::Entities::merge`] to merge within a collection.
    pub fn merge_into(&mut self, other: &Entity) {
        if std::ptr::eq(self, other) {
            return;
        }
        self.mentions.extend(other.mentions.iter().cloned());
    }
}

/// Entities are equal when their mention sequences are equal.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.mentions.len() == other.mentions.len()
            && self
                .mentions
                .iter()
                .zip(&other.mentions)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Entity([")?;
        for (i, id) in self.mention_ids().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("])")
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = &'a Mention;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Arc<Mention>>, fn(&'a Arc<Mention>) -> &'a Mention>;

    fn into_iter(self) -> Self::IntoIter {
        let deref: fn(&'a Arc<Mention>) -> &'a Mention = |m| &**m;
        self.mentions.iter().map(deref)
    }
}
