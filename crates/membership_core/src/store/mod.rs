//! Store adapters and the composed store facade.
//!
//! # Responsibility
//! - Define one capability trait per entity (`MemberStore`, `SportStore`,
//!   `MembershipStore`) and their union (`Store`).
//! - Provide SQLite and in-memory implementations of those capabilities.
//!
//! # Invariants
//! - Every failure is returned as a `StoreError` with one domain kind; SQLite
//!   codes never cross this module boundary.
//! - Adapters do not validate business rules; callers run `validate()`.
//! - Adapters keep no per-call state, so they are safe to share across threads.

pub mod error;
pub mod member_store;
pub mod membership_store;
pub mod memory;
pub mod sport_store;

mod row;

use crate::db::ConnectionPool;
use crate::model::{Member, MemberId, Membership, MembershipId, Sport, SportId};
use log::{debug, error, warn};
use std::time::Instant;

pub use error::{EntityKind, StoreError, StoreErrorKind, StoreResult};
pub use member_store::SqliteMemberStore;
pub use membership_store::SqliteMembershipStore;
pub use memory::InMemoryStore;
pub use sport_store::SqliteSportStore;

/// Member persistence capability.
pub trait MemberStore: Send + Sync {
    /// Inserts a member and returns it with its store-assigned id.
    fn add_member(&self, member: &Member) -> StoreResult<Member>;
    fn get_member_by_id(&self, id: MemberId) -> StoreResult<Member>;
    fn get_member_by_email(&self, email: &str) -> StoreResult<Member>;
    /// Returns every member; empty when none exist.
    fn get_all_members(&self) -> StoreResult<Vec<Member>>;
    /// Replaces the stored row keyed by `member.id` and returns the persisted row.
    fn update_member(&self, member: &Member) -> StoreResult<Member>;
    fn delete_member(&self, id: MemberId) -> StoreResult<()>;
}

/// Sport persistence capability.
pub trait SportStore: Send + Sync {
    fn add_sport(&self, sport: &Sport) -> StoreResult<Sport>;
    fn get_sport_by_id(&self, id: SportId) -> StoreResult<Sport>;
    fn get_all_sports(&self) -> StoreResult<Vec<Sport>>;
    fn update_sport(&self, sport: &Sport) -> StoreResult<Sport>;
    fn delete_sport(&self, id: SportId) -> StoreResult<()>;
}

/// Membership persistence capability.
pub trait MembershipStore: Send + Sync {
    fn add_membership(&self, membership: &Membership) -> StoreResult<Membership>;
    fn get_membership_by_id(&self, id: MembershipId) -> StoreResult<Membership>;
    fn get_all_memberships(&self) -> StoreResult<Vec<Membership>>;
}

/// Union of all entity capabilities, consumed by request handlers.
pub trait Store: MemberStore + SportStore + MembershipStore {}

impl<T> Store for T where T: MemberStore + SportStore + MembershipStore {}

/// Composes three independent adapters into one [`Store`].
///
/// Each capability is forwarded to its own part, so parts can be swapped
/// independently (for example an in-memory member store next to SQLite
/// sports).
#[derive(Clone)]
pub struct Stores<M, S, P> {
    pub members: M,
    pub sports: S,
    pub memberships: P,
}

/// Facade over the SQLite adapters sharing one pool.
pub type SqliteStore = Stores<SqliteMemberStore, SqliteSportStore, SqliteMembershipStore>;

impl<M, S, P> Stores<M, S, P> {
    pub fn new(members: M, sports: S, memberships: P) -> Self {
        Self {
            members,
            sports,
            memberships,
        }
    }
}

impl SqliteStore {
    /// Builds all SQLite adapters over clones of the same pool handle.
    pub fn from_pool(pool: ConnectionPool) -> Self {
        Self::new(
            SqliteMemberStore::new(pool.clone()),
            SqliteSportStore::new(pool.clone()),
            SqliteMembershipStore::new(pool),
        )
    }
}

impl<M, S, P> MemberStore for Stores<M, S, P>
where
    M: MemberStore,
    S: Send + Sync,
    P: Send + Sync,
{
    fn add_member(&self, member: &Member) -> StoreResult<Member> {
        self.members.add_member(member)
    }

    fn get_member_by_id(&self, id: MemberId) -> StoreResult<Member> {
        self.members.get_member_by_id(id)
    }

    fn get_member_by_email(&self, email: &str) -> StoreResult<Member> {
        self.members.get_member_by_email(email)
    }

    fn get_all_members(&self) -> StoreResult<Vec<Member>> {
        self.members.get_all_members()
    }

    fn update_member(&self, member: &Member) -> StoreResult<Member> {
        self.members.update_member(member)
    }

    fn delete_member(&self, id: MemberId) -> StoreResult<()> {
        self.members.delete_member(id)
    }
}

impl<M, S, P> SportStore for Stores<M, S, P>
where
    M: Send + Sync,
    S: SportStore,
    P: Send + Sync,
{
    fn add_sport(&self, sport: &Sport) -> StoreResult<Sport> {
        self.sports.add_sport(sport)
    }

    fn get_sport_by_id(&self, id: SportId) -> StoreResult<Sport> {
        self.sports.get_sport_by_id(id)
    }

    fn get_all_sports(&self) -> StoreResult<Vec<Sport>> {
        self.sports.get_all_sports()
    }

    fn update_sport(&self, sport: &Sport) -> StoreResult<Sport> {
        self.sports.update_sport(sport)
    }

    fn delete_sport(&self, id: SportId) -> StoreResult<()> {
        self.sports.delete_sport(id)
    }
}

impl<M, S, P> MembershipStore for Stores<M, S, P>
where
    M: Send + Sync,
    S: Send + Sync,
    P: MembershipStore,
{
    fn add_membership(&self, membership: &Membership) -> StoreResult<Membership> {
        self.memberships.add_membership(membership)
    }

    fn get_membership_by_id(&self, id: MembershipId) -> StoreResult<Membership> {
        self.memberships.get_membership_by_id(id)
    }

    fn get_all_memberships(&self) -> StoreResult<Vec<Membership>> {
        self.memberships.get_all_memberships()
    }
}

/// Emits one `event=<name> module=store` line for an adapter call.
///
/// `NotFound` is routine and logged at debug; `Unknown` at error.
pub(crate) fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: StoreResult<T>,
) -> StoreResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => debug!("event={event} module=store status=ok duration_ms={duration_ms}"),
        Err(err) => match err.kind() {
            StoreErrorKind::NotFound => debug!(
                "event={event} module=store status=not_found duration_ms={duration_ms}"
            ),
            StoreErrorKind::Unknown => error!(
                "event={event} module=store status=error kind={} duration_ms={duration_ms} error={err}",
                err.kind()
            ),
            kind => warn!(
                "event={event} module=store status=rejected kind={kind} duration_ms={duration_ms}"
            ),
        },
    }
    result
}
