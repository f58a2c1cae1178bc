//! The entity collection: the mutable partition state of one document.
//!
//! [`Entities`] is an arena of [`Entity`] values addressed by stable
//! [`EntityId`] handles. A position table records document order and doubles
//! as the tombstone table: removing an entity empties its slot instead of
//! shifting later entities, so a surviving entity keeps the position it got
//! at insertion even after absorbing others.
//!
//! Non-coreference constraints are stored as canonical `(smaller, larger)`
//! mention id pairs. `merge` never consults them; candidate selection does.

use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::mention::{Mention, MentionId};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Stable handle of an entity within one [`Entities`] collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Index of this handle in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// An active entity together with its handle.
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'a> {
    /// Handle of the entity.
    pub id: EntityId,
    /// The entity itself.
    pub entity: &'a Entity,
}

impl Deref for EntityRef<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        self.entity
    }
}

/// Filter applied to candidates before the disjointness check.
pub type CandidateFilter<'a> = &'a dyn Fn(&Entity) -> bool;

/// Handle of the entity stored at arena index `index`.
fn handle_for(index: usize) -> Result<EntityId> {
    u32::try_from(index)
        .map(EntityId)
        .map_err(|_| Error::invalid_input(format!("Entity arena is full at {index} entities")))
}

fn canonical_pair(a: MentionId, b: MentionId) -> (MentionId, MentionId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Ordered, mutable collection of entities.
#[derive(Debug, Default)]
pub struct Entities {
    arena: Vec<Entity>,
    /// Position -> entity; `None` marks a removed entity.
    slots: Vec<Option<EntityId>>,
    /// Entity -> current position, `None` when inactive.
    positions: Vec<Option<usize>>,
    active: usize,
    disjoint: RefCell<HashSet<(MentionId, MentionId)>>,
}

impl Entities {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one singleton entity per mention, in input order.
    ///
    /// Prohibitions listed in each mention's `coreference_prohibited` become
    /// disjointness constraints. Prohibitions naming unknown ids or the
    /// mention itself are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateMentionIds`] if two mentions share an id.
    pub fn from_mentions<I, M>(mentions: I) -> Result<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<Arc<Mention>>,
    {
        let mentions: Vec<Arc<Mention>> = mentions.into_iter().map(Into::into).collect();

        let mut counts: HashMap<MentionId, usize> = HashMap::with_capacity(mentions.len());
        for m in &mentions {
            *counts.entry(m.id).or_default() += 1;
        }
        let mut duplicates: Vec<MentionId> = counts
            .iter()
            .filter(|&(_, &n)| n > 1)
            .map(|(&id, _)| id)
            .collect();
        if !duplicates.is_empty() {
            duplicates.sort_unstable();
            let listed: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
            return Err(Error::DuplicateMentionIds(listed.join(", ")));
        }

        let mut entities = Self::new();
        {
            let mut disjoint = entities.disjoint.borrow_mut();
            for m in &mentions {
                for &other in &m.coreference_prohibited {
                    if other == m.id {
                        continue;
                    }
                    if !counts.contains_key(&other) {
                        log::warn!("Mention {} prohibits unknown mention {other}", m.id);
                        continue;
                    }
                    disjoint.insert(canonical_pair(m.id, other));
                }
            }
        }
        for m in mentions {
            entities.insert(Entity::singleton(m))?;
        }
        Ok(entities)
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Store a new entity at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] once every handle is issued.
    pub fn insert(&mut self, entity: Entity) -> Result<EntityId> {
        let id = handle_for(self.arena.len())?;
        self.arena.push(entity);
        self.positions.push(None);
        self.activate(id);
        Ok(id)
    }

    fn activate(&mut self, id: EntityId) {
        self.positions[id.index()] = Some(self.slots.len());
        self.slots.push(Some(id));
        self.active += 1;
    }

    /// Re-activate a previously removed entity at the end of the collection.
    ///
    /// Does nothing if the entity is already a member.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the handle was not issued by this
    /// collection.
    pub fn add(&mut self, id: EntityId) -> Result<()> {
        self.check_issued(id)?;
        if !self.contains(id) {
            self.activate(id);
        }
        Ok(())
    }

    /// Remove an entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the entity is not a member.
    pub fn remove(&mut self, id: EntityId) -> Result<()> {
        let Some(position) = self.positions.get(id.index()).copied().flatten() else {
            return Err(Error::not_found(id.to_string()));
        };
        self.slots[position] = None;
        self.positions[id.index()] = None;
        self.active -= 1;
        Ok(())
    }

    /// Remove an entity if it is a member.
    pub fn discard(&mut self, id: EntityId) {
        // Absent entities are ignored.
        let _ = self.remove(id);
    }

    /// Returns true if the entity is a member.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    /// Number of member entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active
    }

    /// Returns true if the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Fixed position of a member entity; its document-order sort key.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.positions.get(id.index()).copied().flatten()
    }

    /// Number of positions, tombstones included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Handle of the entity at a position, if that position is live.
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<EntityId> {
        self.slots.get(position).copied().flatten()
    }

    /// A member entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.contains(id).then(|| &self.arena[id.index()])
    }

    /// Member entities in document order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = EntityRef<'_>> + '_ {
        self.slots.iter().filter_map(move |slot| {
            slot.map(|id| EntityRef {
                id,
                entity: &self.arena[id.index()],
            })
        })
    }

    /// The member entity containing a mention.
    #[must_use]
    pub fn find_mention(&self, mention: MentionId) -> Option<EntityId> {
        self.iter().find(|e| e.contains(mention)).map(|e| e.id)
    }

    fn check_issued(&self, id: EntityId) -> Result<()> {
        if id.index() < self.arena.len() {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "{id} was not issued by this collection"
            )))
        }
    }

    fn check_member(&self, id: EntityId, what: &str) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "{what}: {id} is not in the collection"
            )))
        }
    }

    // =========================================================================
    // Disjointness
    // =========================================================================

    /// Forbid every mention of `a` from ever sharing an entity with every
    /// mention of `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either handle is unknown or if the
    /// two entities share a mention (this includes `a == b`).
    pub fn mark_disjoint(&self, a: EntityId, b: EntityId) -> Result<()> {
        self.check_issued(a)?;
        self.check_issued(b)?;
        let (ea, eb) = (&self.arena[a.index()], &self.arena[b.index()]);
        if ea.shares_mention_with(eb) {
            return Err(Error::invalid_input(format!(
                "cannot mark {ea} disjoint from {eb}: they share mentions"
            )));
        }
        let mut disjoint = self.disjoint.borrow_mut();
        for ma in ea.mention_ids() {
            for mb in eb.mention_ids() {
                disjoint.insert(canonical_pair(ma, mb));
            }
        }
        Ok(())
    }

    /// Returns true if no mention pair across `a` and `b` is disjoint.
    ///
    /// Unknown handles are never merge-allowed.
    #[must_use]
    pub fn merge_allowed(&self, a: EntityId, b: EntityId) -> bool {
        match (self.arena.get(a.index()), self.arena.get(b.index())) {
            (Some(ea), Some(eb)) => self.entities_merge_allowed(ea, eb),
            _ => false,
        }
    }

    fn entities_merge_allowed(&self, a: &Entity, b: &Entity) -> bool {
        let disjoint = self.disjoint.borrow();
        if disjoint.is_empty() {
            return true;
        }
        a.mention_ids().all(|ma| {
            b.mention_ids()
                .all(|mb| !disjoint.contains(&canonical_pair(ma, mb)))
        })
    }

    /// Returns true if no member entity contains a disjoint mention pair.
    #[must_use]
    pub fn disjointness_constraints_satisfied(&self) -> bool {
        let disjoint = self.disjoint.borrow();
        self.iter().all(|e| {
            let ids: Vec<MentionId> = e.mention_ids().collect();
            ids.iter().enumerate().all(|(i, &a)| {
                ids[i + 1..]
                    .iter()
                    .all(|&b| a == b || !disjoint.contains(&canonical_pair(a, b)))
            })
        })
    }

    /// Number of stored disjoint mention pairs.
    #[must_use]
    pub fn disjoint_pair_count(&self) -> usize {
        self.disjoint.borrow().len()
    }

    // =========================================================================
    // Merging
    // =========================================================================

    /// Merge `other` into `keep` and remove `other` from the collection.
    ///
    /// Disjointness is not checked here; candidates handed out by
    /// [`Entities::get_candidates`] are already merge-allowed. Merging an
    /// entity with itself does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `keep` is not a member or `other`
    /// is an unknown handle.
    pub fn merge(&mut self, keep: EntityId, other: EntityId) -> Result<()> {
        self.check_member(keep, "cannot keep an entity that is not a member")?;
        self.check_issued(other)?;
        if keep == other {
            return Ok(());
        }
        let absorbed = self.arena[other.index()].clone();
        self.arena[keep.index()].merge_into(&absorbed);
        self.discard(other);
        Ok(())
    }

    // =========================================================================
    // Candidates
    // =========================================================================

    /// Member entities at positions strictly before `id`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `id` is not a member.
    pub fn entities_before(&self, id: EntityId) -> Result<impl Iterator<Item = EntityRef<'_>> + '_> {
        let position = self
            .position(id)
            .ok_or_else(|| Error::invalid_input(format!("{id} is not in the collection")))?;
        Ok(self.slots[..position].iter().filter_map(move |slot| {
            slot.map(|id| EntityRef {
                id,
                entity: &self.arena[id.index()],
            })
        }))
    }

    /// Possible antecedents of `id`.
    ///
    /// Yields, in order, the entities before `id` that pass `filter` and are
    /// merge-allowed with `id`. Both checks run lazily, the filter first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `id` is not a member.
    pub fn get_candidates<'a>(
        &'a self,
        id: EntityId,
        filter: Option<CandidateFilter<'a>>,
    ) -> Result<Candidates<'a>> {
        let end = self.position(id).ok_or_else(|| {
            Error::invalid_input(format!("cannot get candidates: {id} is not in the collection"))
        })?;
        Ok(Candidates {
            entities: self,
            subject: &self.arena[id.index()],
            filter,
            next: 0,
            end,
        })
    }

    // =========================================================================
    // Clearing
    // =========================================================================

    /// Remove every entity. Issued handles become invalid.
    pub fn clear_entities(&mut self) {
        self.arena.clear();
        self.slots.clear();
        self.positions.clear();
        self.active = 0;
    }

    /// Forget every disjointness constraint.
    pub fn clear_disjointness_constraints(&mut self) {
        self.disjoint.get_mut().clear();
    }

    /// Remove every entity and every constraint.
    pub fn clear_all(&mut self) {
        self.clear_entities();
        self.clear_disjointness_constraints();
    }
}

impl fmt::Display for Entities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Entities([")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e.entity)?;
        }
        f.write_str("])")
    }
}

/// Lazy iterator over the candidate antecedents of one entity.
///
/// Created by [`Entities::get_candidates`].
pub struct Candidates<'a> {
    entities: &'a Entities,
    subject: &'a Entity,
    filter: Option<CandidateFilter<'a>>,
    next: usize,
    end: usize,
}

impl fmt::Debug for Candidates<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidates")
            .field("subject", &self.subject.to_string())
            .field("next", &self.next)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = EntityRef<'a>;

    fn next(&mut self) -> Option<EntityRef<'a>> {
        while self.next < self.end {
            let position = self.next;
            self.next += 1;
            let Some(id) = self.entities.slots[position] else {
                continue;
            };
            let entity = &self.entities.arena[id.index()];
            if let Some(filter) = self.filter {
                if !filter(entity) {
                    continue;
                }
            }
            if self.entities.entities_merge_allowed(self.subject, entity) {
                return Some(EntityRef { id, entity });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentions(n: u32) -> Vec<Mention> {
        (0..n).map(|i| Mention::new(i, [i * 10], i * 10)).collect()
    }

    fn ids(entities: &Entities) -> Vec<EntityId> {
        entities.iter().map(|e| e.id).collect()
    }

    #[test]
    fn from_mentions_keeps_input_order() {
        let entities = Entities::from_mentions(mentions(4)).unwrap();
        assert_eq!(entities.len(), 4);
        let firsts: Vec<MentionId> = entities
            .iter()
            .map(|e| e.mention_ids().next().unwrap())
            .collect();
        assert_eq!(firsts, (0..4).map(MentionId).collect::<Vec<_>>());
    }

    #[test]
    fn handles_stop_at_u32_range() {
        assert_eq!(handle_for(7).unwrap(), EntityId(7));
        assert_eq!(handle_for(u32::MAX as usize).unwrap(), EntityId(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            handle_for(u32::MAX as usize + 1),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn insert_issues_sequential_handles() {
        let mut entities = Entities::new();
        let a = entities.insert(Entity::singleton(Mention::new(0, [0], 0))).unwrap();
        let b = entities.insert(Entity::singleton(Mention::new(1, [5], 5))).unwrap();
        assert_eq!((a, b), (EntityId(0), EntityId(1)));
        assert_eq!(ids(&entities), vec![a, b]);
    }

    #[test]
    fn from_mentions_reports_duplicates() {
        let mut ms = mentions(3);
        ms.push(Mention::new(1, [99], 99));
        ms.push(Mention::new(2, [98], 98));
        let err = Entities::from_mentions(ms).unwrap_err();
        assert_eq!(err, Error::DuplicateMentionIds("m1, m2".to_string()));
    }

    #[test]
    fn from_mentions_seeds_prohibitions() {
        let ms = vec![
            Mention::new(0, [0], 0),
            Mention::new(1, [5], 5).with_prohibited([MentionId(0), MentionId(1), MentionId(42)]),
        ];
        let entities = Entities::from_mentions(ms).unwrap();
        assert_eq!(entities.disjoint_pair_count(), 1);
        let all = ids(&entities);
        assert!(!entities.merge_allowed(all[0], all[1]));
    }

    #[test]
    fn remove_and_discard() {
        let mut entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        entities.remove(all[1]).unwrap();
        assert_eq!(entities.remove(all[1]), Err(Error::NotFound("e1".into())));
        entities.discard(all[1]);
        assert_eq!(entities.len(), 2);
        assert_eq!(ids(&entities), vec![all[0], all[2]]);
        assert_eq!(entities.slot_count(), 3);
        assert_eq!(entities.id_at(1), None);
    }

    #[test]
    fn add_reactivates_at_end() {
        let mut entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        entities.add(all[0]).unwrap();
        assert_eq!(entities.len(), 3);
        entities.remove(all[0]).unwrap();
        entities.add(all[0]).unwrap();
        assert_eq!(ids(&entities), vec![all[1], all[2], all[0]]);
        assert_eq!(entities.position(all[0]), Some(3));
        assert!(entities.add(EntityId(17)).is_err());
    }

    #[test]
    fn merge_keeps_position_of_survivor() {
        let mut entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        entities.merge(all[0], all[2]).unwrap();
        assert_eq!(ids(&entities), vec![all[0], all[1]]);
        assert_eq!(entities.get(all[0]).unwrap().len(), 2);
        assert_eq!(entities.position(all[0]), Some(0));
        assert_eq!(entities.find_mention(MentionId(2)), Some(all[0]));
    }

    #[test]
    fn merge_into_non_member_fails() {
        let mut entities = Entities::from_mentions(mentions(2)).unwrap();
        let all = ids(&entities);
        entities.merge(all[0], all[1]).unwrap();
        assert!(matches!(
            entities.merge(all[1], all[0]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn merge_with_self_is_noop() {
        let mut entities = Entities::from_mentions(mentions(2)).unwrap();
        let all = ids(&entities);
        entities.merge(all[1], all[1]).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities.get(all[1]).unwrap().len(), 1);
    }

    #[test]
    fn self_disjointness_fails() {
        let mut entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        assert!(entities.mark_disjoint(all[0], all[0]).is_err());
        entities.merge(all[0], all[1]).unwrap();
        // all[1] still shares its mention with the survivor
        assert!(entities.mark_disjoint(all[0], all[1]).is_err());
        assert_eq!(entities.disjoint_pair_count(), 0);
    }

    #[test]
    fn disjointness_carries_over_merges() {
        let mut entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        entities.mark_disjoint(all[0], all[1]).unwrap();
        assert!(!entities.merge_allowed(all[0], all[1]));
        assert!(!entities.merge_allowed(all[1], all[0]));
        entities.merge(all[2], all[1]).unwrap();
        assert!(!entities.merge_allowed(all[0], all[2]));
        assert!(entities.disjointness_constraints_satisfied());
    }

    #[test]
    fn candidates_respect_order_filter_and_disjointness() {
        let entities = Entities::from_mentions(mentions(4)).unwrap();
        let all = ids(&entities);
        entities.mark_disjoint(all[3], all[1]).unwrap();

        let before: Vec<EntityId> = entities.entities_before(all[3]).unwrap().map(|e| e.id).collect();
        assert_eq!(before, vec![all[0], all[1], all[2]]);

        let candidates: Vec<EntityId> = entities
            .get_candidates(all[3], None)
            .unwrap()
            .map(|e| e.id)
            .collect();
        assert_eq!(candidates, vec![all[0], all[2]]);

        let reject = |_: &Entity| false;
        assert_eq!(entities.get_candidates(all[3], Some(&reject)).unwrap().count(), 0);

        assert_eq!(entities.get_candidates(all[0], None).unwrap().count(), 0);
    }

    #[test]
    fn candidates_see_marks_made_during_iteration() {
        let entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        let mut candidates = entities.get_candidates(all[2], None).unwrap();
        let first = candidates.next().unwrap();
        assert_eq!(first.id, all[0]);
        entities.mark_disjoint(all[2], all[1]).unwrap();
        assert!(candidates.next().is_none());
    }

    #[test]
    fn candidates_of_non_member_fail() {
        let mut entities = Entities::from_mentions(mentions(2)).unwrap();
        let all = ids(&entities);
        entities.remove(all[1]).unwrap();
        assert!(entities.get_candidates(all[1], None).is_err());
        assert!(entities.entities_before(all[1]).is_err());
    }

    #[test]
    fn clearing() {
        let mut entities = Entities::from_mentions(mentions(3)).unwrap();
        let all = ids(&entities);
        entities.mark_disjoint(all[0], all[1]).unwrap();
        entities.clear_disjointness_constraints();
        assert_eq!(entities.disjoint_pair_count(), 0);
        assert_eq!(entities.len(), 3);
        entities.clear_all();
        assert!(entities.is_empty());
        assert_eq!(entities.iter().count(), 0);
    }
}
