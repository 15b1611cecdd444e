//! In-memory implementation of every store capability.
//!
//! Mirrors the SQLite schema's constraints so tests and tools can substitute
//! it for the SQLite adapters without changing observed error kinds:
//! - member email and sport name are unique (`AlreadyExists`);
//! - memberships must reference existing members and sports, and referenced
//!   parents cannot be deleted (`MissingRequiredField`);
//! - a NaN membership fee counts as a missing value (`MissingRequiredField`);
//! - updating an unknown id is `NotFound` before any uniqueness check.

use super::error::{EntityKind, StoreError, StoreResult};
use super::{MemberStore, MembershipStore, SportStore};
use crate::model::{Member, MemberId, Membership, MembershipId, Sport, SportId};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    members: Vec<Member>,
    sports: Vec<Sport>,
    memberships: Vec<Membership>,
}

/// Mutex-guarded store holding all entities in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, entity: EntityKind, operation: &str) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::unknown(entity, operation, "in-memory store lock poisoned"))
    }
}

impl MemberStore for InMemoryStore {
    fn add_member(&self, member: &Member) -> StoreResult<Member> {
        let mut state = self.lock(EntityKind::Member, "add")?;
        if state.members.iter().any(|m| m.email == member.email) {
            return Err(StoreError::already_exists(EntityKind::Member, None));
        }
        let stored = Member {
            id: Uuid::new_v4(),
            ..member.clone()
        };
        state.members.push(stored.clone());
        Ok(stored)
    }

    fn get_member_by_id(&self, id: MemberId) -> StoreResult<Member> {
        let state = self.lock(EntityKind::Member, "get")?;
        state
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Member, id))
    }

    fn get_member_by_email(&self, email: &str) -> StoreResult<Member> {
        let state = self.lock(EntityKind::Member, "get")?;
        state
            .members
            .iter()
            .find(|m| m.email == email)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Member, email))
    }

    fn get_all_members(&self) -> StoreResult<Vec<Member>> {
        let state = self.lock(EntityKind::Member, "list")?;
        Ok(state.members.clone())
    }

    fn update_member(&self, member: &Member) -> StoreResult<Member> {
        let mut state = self.lock(EntityKind::Member, "update")?;
        let index = state
            .members
            .iter()
            .position(|m| m.id == member.id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Member, member.id))?;
        if state
            .members
            .iter()
            .any(|m| m.id != member.id && m.email == member.email)
        {
            return Err(StoreError::already_exists(EntityKind::Member, None));
        }
        state.members[index] = member.clone();
        Ok(member.clone())
    }

    fn delete_member(&self, id: MemberId) -> StoreResult<()> {
        let mut state = self.lock(EntityKind::Member, "delete")?;
        let index = state
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Member, id))?;
        if state.memberships.iter().any(|ms| ms.member_id == id) {
            return Err(StoreError::missing_required_field(EntityKind::Member, None));
        }
        state.members.remove(index);
        Ok(())
    }
}

impl SportStore for InMemoryStore {
    fn add_sport(&self, sport: &Sport) -> StoreResult<Sport> {
        let mut state = self.lock(EntityKind::Sport, "add")?;
        if state.sports.iter().any(|s| s.name == sport.name) {
            return Err(StoreError::already_exists(EntityKind::Sport, None));
        }
        let stored = Sport {
            id: Uuid::new_v4(),
            ..sport.clone()
        };
        state.sports.push(stored.clone());
        Ok(stored)
    }

    fn get_sport_by_id(&self, id: SportId) -> StoreResult<Sport> {
        let state = self.lock(EntityKind::Sport, "get")?;
        state
            .sports
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Sport, id))
    }

    fn get_all_sports(&self) -> StoreResult<Vec<Sport>> {
        let state = self.lock(EntityKind::Sport, "list")?;
        Ok(state.sports.clone())
    }

    fn update_sport(&self, sport: &Sport) -> StoreResult<Sport> {
        let mut state = self.lock(EntityKind::Sport, "update")?;
        let index = state
            .sports
            .iter()
            .position(|s| s.id == sport.id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Sport, sport.id))?;
        if state
            .sports
            .iter()
            .any(|s| s.id != sport.id && s.name == sport.name)
        {
            return Err(StoreError::already_exists(EntityKind::Sport, None));
        }
        state.sports[index] = sport.clone();
        Ok(sport.clone())
    }

    fn delete_sport(&self, id: SportId) -> StoreResult<()> {
        let mut state = self.lock(EntityKind::Sport, "delete")?;
        let index = state
            .sports
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Sport, id))?;
        if state.memberships.iter().any(|ms| ms.sport_id == id) {
            return Err(StoreError::missing_required_field(EntityKind::Sport, None));
        }
        state.sports.remove(index);
        Ok(())
    }
}

impl MembershipStore for InMemoryStore {
    fn add_membership(&self, membership: &Membership) -> StoreResult<Membership> {
        // SQLite binds NaN as NULL, which the NOT NULL fee column rejects.
        if membership.fee.is_nan() {
            return Err(StoreError::missing_required_field(
                EntityKind::Membership,
                None,
            ));
        }
        let mut state = self.lock(EntityKind::Membership, "add")?;
        let member_known = state.members.iter().any(|m| m.id == membership.member_id);
        let sport_known = state.sports.iter().any(|s| s.id == membership.sport_id);
        if !member_known || !sport_known {
            return Err(StoreError::missing_required_field(
                EntityKind::Membership,
                None,
            ));
        }
        let stored = Membership {
            id: Uuid::new_v4(),
            ..membership.clone()
        };
        state.memberships.push(stored.clone());
        Ok(stored)
    }

    fn get_membership_by_id(&self, id: MembershipId) -> StoreResult<Membership> {
        let state = self.lock(EntityKind::Membership, "get")?;
        state
            .memberships
            .iter()
            .find(|ms| ms.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Membership, id))
    }

    fn get_all_memberships(&self) -> StoreResult<Vec<Membership>> {
        let state = self.lock(EntityKind::Membership, "list")?;
        Ok(state.memberships.clone())
    }
}
