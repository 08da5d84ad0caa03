// state/user.rs
use std::collections::HashMap;

use teloxide::types::{User, UserId};

use crate::error::{GiveawayError, Result};

/// Display fields taken from an incoming Telegram user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub id: UserId,
    pub first_name: String,
    pub username: Option<String>,
}

impl Profile {
    pub fn new(id: UserId, first_name: impl Into<String>, username: Option<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            username,
        }
    }
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.first_name.clone(), user.username.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserRecord {
    pub id: UserId,
    pub points: u64,
    pub referred_by: Option<UserId>,
    pub referrals_made: u64,
    pub first_name: String,
    pub username: Option<String>,
}

impl UserRecord {
    /// Create new user with an empty balance
    pub fn new(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            points: 0,
            referred_by: None,
            referrals_made: 0,
            first_name: profile.first_name.clone(),
            username: profile.username.clone(),
        }
    }

    /// Refreshes display fields; returns true when something changed
    pub fn refresh_profile(&mut self, profile: &Profile) -> bool {
        if self.first_name == profile.first_name && self.username == profile.username {
            return false;
        }
        self.first_name.clone_from(&profile.first_name);
        self.username.clone_from(&profile.username);
        true
    }

    /// Sets the referrer once; later calls leave the record untouched
    pub fn set_referrer(&mut self, referrer: UserId) -> bool {
        if self.referred_by.is_some() || referrer == self.id {
            return false;
        }
        self.referred_by = Some(referrer);
        true
    }

    pub fn add_points(&mut self, amount: u64) -> Result<u64> {
        self.points = self
            .points
            .checked_add(amount)
            .ok_or(GiveawayError::MathOverflow)?;
        Ok(self.points)
    }

    pub fn spend_points(&mut self, amount: u64) -> Result<u64> {
        self.points = self
            .points
            .checked_sub(amount)
            .ok_or(GiveawayError::InsufficientPoints {
                needed: amount,
                available: self.points,
            })?;
        Ok(self.points)
    }

    pub fn add_referral(&mut self) -> Result<()> {
        self.referrals_made = self
            .referrals_made
            .checked_add(1)
            .ok_or(GiveawayError::MathOverflow)?;
        Ok(())
    }

    /// `@username`, or `@N/A` when the user has none
    pub fn handle(&self) -> String {
        format!("@{}", self.username.as_deref().unwrap_or("N/A"))
    }
}

/// All known users, kept in first-seen order
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserLedger {
    records: HashMap<UserId, UserRecord>,
    order: Vec<UserId>,
}

impl UserLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: UserId) -> Option<&mut UserRecord> {
        self.records.get_mut(&id)
    }

    fn require_mut(&mut self, id: UserId) -> Result<&mut UserRecord> {
        self.records
            .get_mut(&id)
            .ok_or(GiveawayError::UnknownUser(id.0))
    }

    /// Looks a user up, creating or refreshing the record as needed
    pub fn get_or_create(&mut self, profile: &Profile) -> &UserRecord {
        if let Some(record) = self.records.get_mut(&profile.id) {
            if record.refresh_profile(profile) {
                tracing::debug!(user = profile.id.0, "profile refreshed");
            }
        } else {
            tracing::debug!(user = profile.id.0, "new user registered");
            self.order.push(profile.id);
            self.records.insert(profile.id, UserRecord::new(profile));
        }
        &self.records[&profile.id]
    }

    /// Inserts or replaces a whole record, keeping its place in the order
    pub fn upsert(&mut self, record: UserRecord) {
        if !self.records.contains_key(&record.id) {
            self.order.push(record.id);
        }
        self.records.insert(record.id, record);
    }

    pub fn credit(&mut self, id: UserId, amount: u64) -> Result<u64> {
        self.require_mut(id)?.add_points(amount)
    }

    pub fn debit(&mut self, id: UserId, amount: u64) -> Result<u64> {
        self.require_mut(id)?.spend_points(amount)
    }

    pub fn points(&self, id: UserId) -> u64 {
        self.get(id).map_or(0, |r| r.points)
    }

    /// Records in first-seen order
    pub fn list_all(&self) -> impl Iterator<Item = &UserRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.order.clone()
    }

    pub fn total_points(&self) -> u64 {
        self.records.values().map(|r| r.points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Profile {
        Profile::new(UserId(1), "Alice", Some("alice".into()))
    }

    #[test]
    fn get_or_create_starts_at_zero() {
        let mut users = UserLedger::new();
        let record = users.get_or_create(&alice());
        assert_eq!(record.points, 0);
        assert_eq!(record.referrals_made, 0);
        assert_eq!(record.referred_by, None);
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn refresh_keeps_balance_and_lineage() {
        let mut users = UserLedger::new();
        users.get_or_create(&alice());
        users.credit(UserId(1), 7).unwrap();
        users.get_mut(UserId(1)).unwrap().set_referrer(UserId(9));

        let renamed = Profile::new(UserId(1), "Alicia", None);
        let record = users.get_or_create(&renamed);
        assert_eq!(record.first_name, "Alicia");
        assert_eq!(record.username, None);
        assert_eq!(record.points, 7);
        assert_eq!(record.referred_by, Some(UserId(9)));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn referrer_is_set_once_and_never_self() {
        let mut record = UserRecord::new(&alice());
        assert!(!record.set_referrer(UserId(1)));
        assert!(record.set_referrer(UserId(2)));
        assert!(!record.set_referrer(UserId(3)));
        assert_eq!(record.referred_by, Some(UserId(2)));
    }

    #[test]
    fn debit_rejects_overdraft_without_change() {
        let mut users = UserLedger::new();
        users.get_or_create(&alice());
        users.credit(UserId(1), 2).unwrap();
        assert_eq!(
            users.debit(UserId(1), 5),
            Err(GiveawayError::InsufficientPoints { needed: 5, available: 2 })
        );
        assert_eq!(users.points(UserId(1)), 2);
    }

    #[test]
    fn credit_unknown_user_fails() {
        let mut users = UserLedger::new();
        assert_eq!(users.credit(UserId(42), 1), Err(GiveawayError::UnknownUser(42)));
    }

    #[test]
    fn list_all_keeps_first_seen_order() {
        let mut users = UserLedger::new();
        for id in [5, 3, 8] {
            users.get_or_create(&Profile::new(UserId(id), format!("u{id}"), None));
        }
        users.get_or_create(&Profile::new(UserId(3), "renamed", None));
        let ids: Vec<u64> = users.list_all().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![5, 3, 8]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut users = UserLedger::new();
        users.get_or_create(&alice());
        users.get_or_create(&Profile::new(UserId(2), "Bob", None));

        let mut record = users.get(UserId(1)).unwrap().clone();
        record.points = 12;
        users.upsert(record);
        users.upsert(UserRecord::new(&Profile::new(UserId(3), "Carol", None)));

        assert_eq!(users.points(UserId(1)), 12);
        let ids: Vec<u64> = users.ids().into_iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(users.total_points(), 12);
    }

    #[test]
    fn handle_falls_back_to_placeholder() {
        let record = UserRecord::new(&Profile::new(UserId(4), "Bob", None));
        assert_eq!(record.handle(), "@N/A");
        assert_eq!(UserRecord::new(&alice()).handle(), "@alice");
    }
}
