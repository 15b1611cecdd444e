//! Member use-case service.
//!
//! # Responsibility
//! - Validate members before registration and after patching.
//! - Delegate persistence to a `MemberStore`.

use super::ServiceResult;
use crate::model::{Member, MemberId, MemberPatch};
use crate::store::MemberStore;
use log::info;
use std::sync::Arc;

pub struct MemberService<S: MemberStore + ?Sized> {
    store: Arc<S>,
}

impl<S: MemberStore + ?Sized> MemberService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validates and inserts a member, returning it with its assigned id.
    pub fn register_member(&self, member: &Member) -> ServiceResult<Member> {
        if let Err(err) = member.validate() {
            info!("event=member_register module=service status=invalid reason={err}");
            return Err(err.into());
        }
        Ok(self.store.add_member(member)?)
    }

    pub fn get_member(&self, id: MemberId) -> ServiceResult<Member> {
        Ok(self.store.get_member_by_id(id)?)
    }

    pub fn find_member_by_email(&self, email: &str) -> ServiceResult<Member> {
        Ok(self.store.get_member_by_email(email)?)
    }

    pub fn list_members(&self) -> ServiceResult<Vec<Member>> {
        Ok(self.store.get_all_members()?)
    }

    /// Applies only the supplied fields of `patch` to the stored member.
    ///
    /// # Errors
    /// - `Store(NotFound)` when `id` has no record.
    /// - `Invalid` when the patched member fails validation; nothing is written.
    pub fn update_member(&self, id: MemberId, patch: &MemberPatch) -> ServiceResult<Member> {
        let mut member = self.store.get_member_by_id(id)?;
        patch.apply_to(&mut member);
        if let Err(err) = member.validate() {
            info!("event=member_update module=service status=invalid member_id={id} reason={err}");
            return Err(err.into());
        }
        Ok(self.store.update_member(&member)?)
    }

    pub fn remove_member(&self, id: MemberId) -> ServiceResult<()> {
        Ok(self.store.delete_member(id)?)
    }
}
