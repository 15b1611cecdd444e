//! Membership use-case service.

use super::ServiceResult;
use crate::model::{Membership, MembershipId};
use crate::store::MembershipStore;
use log::info;
use std::sync::Arc;

pub struct MembershipService<S: MembershipStore + ?Sized> {
    store: Arc<S>,
}

impl<S: MembershipStore + ?Sized> MembershipService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validates and records a membership.
    ///
    /// Unknown member/sport references are reported by the store as
    /// `MissingRequiredField`.
    pub fn enroll(&self, membership: &Membership) -> ServiceResult<Membership> {
        if let Err(err) = membership.validate() {
            info!(
                "event=membership_enroll module=service status=invalid member_id={} sport_id={} reason={err}",
                membership.member_id, membership.sport_id
            );
            return Err(err.into());
        }
        Ok(self.store.add_membership(membership)?)
    }

    pub fn get_membership(&self, id: MembershipId) -> ServiceResult<Membership> {
        Ok(self.store.get_membership_by_id(id)?)
    }

    pub fn list_memberships(&self) -> ServiceResult<Vec<Membership>> {
        Ok(self.store.get_all_memberships()?)
    }
}
