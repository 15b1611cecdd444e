//! Sport use-case service.

use super::ServiceResult;
use crate::model::{Sport, SportId, SportPatch};
use crate::store::SportStore;
use log::info;
use std::sync::Arc;

pub struct SportService<S: SportStore + ?Sized> {
    store: Arc<S>,
}

impl<S: SportStore + ?Sized> SportService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create_sport(&self, sport: &Sport) -> ServiceResult<Sport> {
        if let Err(err) = sport.validate() {
            info!("event=sport_create module=service status=invalid reason={err}");
            return Err(err.into());
        }
        Ok(self.store.add_sport(sport)?)
    }

    pub fn get_sport(&self, id: SportId) -> ServiceResult<Sport> {
        Ok(self.store.get_sport_by_id(id)?)
    }

    pub fn list_sports(&self) -> ServiceResult<Vec<Sport>> {
        Ok(self.store.get_all_sports()?)
    }

    /// Applies only the supplied fields of `patch`; see
    /// [`MemberService::update_member`](super::MemberService::update_member).
    pub fn update_sport(&self, id: SportId, patch: &SportPatch) -> ServiceResult<Sport> {
        let mut sport = self.store.get_sport_by_id(id)?;
        patch.apply_to(&mut sport);
        if let Err(err) = sport.validate() {
            info!("event=sport_update module=service status=invalid sport_id={id} reason={err}");
            return Err(err.into());
        }
        Ok(self.store.update_sport(&sport)?)
    }

    pub fn remove_sport(&self, id: SportId) -> ServiceResult<()> {
        Ok(self.store.delete_sport(id)?)
    }
}
