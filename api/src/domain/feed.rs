//! Feed composition
//!
//! Merges per-user activity into a single feed for a viewer, dropping
//! activity from users whose profiles are private. Callers fetch the records
//! and the current visibility settings; nothing here touches storage.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::domain::entities::{Activity, User, UserId};

/// Which users have opted into showing their activity to others
///
/// Built fresh for every feed request so visibility changes apply on the
/// next read.
#[derive(Debug, Clone, Default)]
pub struct VisibilityPolicy {
    public: HashMap<UserId, bool>,
}

impl VisibilityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, user: UserId, is_public: bool) {
        self.public.insert(user, is_public);
    }

    /// Users not in the policy are treated as private
    pub fn is_public(&self, user: &UserId) -> bool {
        self.public.get(user).copied().unwrap_or(false)
    }

    /// Whether `viewer` may see activity authored by `author`
    pub fn allows(&self, viewer: &UserId, author: &UserId) -> bool {
        author == viewer || self.is_public(author)
    }
}

impl<'a> FromIterator<&'a User> for VisibilityPolicy {
    fn from_iter<T: IntoIterator<Item = &'a User>>(users: T) -> Self {
        Self {
            public: users.into_iter().map(|u| (u.id, u.is_public)).collect(),
        }
    }
}

impl FromIterator<(UserId, bool)> for VisibilityPolicy {
    fn from_iter<T: IntoIterator<Item = (UserId, bool)>>(entries: T) -> Self {
        Self {
            public: entries.into_iter().collect(),
        }
    }
}

/// Merge the activity visible to `viewer`, newest first
///
/// Records are keyed by the user whose activity list they came from. Ties on
/// timestamp fall back to the higher (later inserted) id first.
pub fn compose_feed(
    viewer: &UserId,
    records: &HashMap<UserId, Vec<Activity>>,
    policy: &VisibilityPolicy,
) -> Vec<Activity> {
    let mut feed: Vec<Activity> = records
        .iter()
        .filter(|(author, _)| policy.allows(viewer, author))
        .flat_map(|(_, activity)| activity.iter().cloned())
        .collect();

    feed.sort_by_key(|a| Reverse((a.occurred_at, a.id)));
    feed
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::domain::entities::{ActivityId, ActivityKind};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, hour, 0, 0).unwrap()
    }

    fn activity(id: i64, actor: UserId, when: DateTime<Utc>) -> Activity {
        Activity {
            id: ActivityId(id),
            actor_id: actor,
            kind: ActivityKind::Session,
            message: format!("session {}", id),
            occurred_at: when,
            target_id: None,
            related_id: None,
        }
    }

    fn two_users() -> (UserId, UserId, HashMap<UserId, Vec<Activity>>) {
        let alice = UserId::new();
        let bob = UserId::new();
        let mut records = HashMap::new();
        records.insert(alice, vec![activity(1, alice, at(6))]);
        records.insert(bob, vec![activity(2, bob, at(7))]);
        (alice, bob, records)
    }

    #[test]
    fn includes_public_users() {
        let (alice, bob, records) = two_users();
        let policy: VisibilityPolicy = [(alice, false), (bob, true)].into_iter().collect();

        let feed = compose_feed(&alice, &records, &policy);

        assert!(feed.iter().any(|a| a.actor_id == bob));
    }

    #[test]
    fn excludes_private_users() {
        let (alice, bob, records) = two_users();
        let policy: VisibilityPolicy = [(alice, false), (bob, false)].into_iter().collect();

        let feed = compose_feed(&alice, &records, &policy);

        assert!(feed.iter().all(|a| a.actor_id == alice));
    }

    #[test]
    fn viewer_always_sees_own_records() {
        let (alice, _bob, records) = two_users();
        let feed = compose_feed(&alice, &records, &VisibilityPolicy::new());

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].actor_id, alice);
    }

    #[test]
    fn missing_policy_entry_means_private() {
        let (alice, bob, records) = two_users();
        let policy: VisibilityPolicy = [(alice, true)].into_iter().collect();

        let feed = compose_feed(&alice, &records, &policy);

        assert!(!feed.iter().any(|a| a.actor_id == bob));
    }

    #[test]
    fn sorted_newest_first_with_id_tiebreak() {
        let alice = UserId::new();
        let bob = UserId::new();
        let mut records = HashMap::new();
        records.insert(
            alice,
            vec![activity(1, alice, at(6)), activity(3, alice, at(8))],
        );
        records.insert(bob, vec![activity(2, bob, at(8)), activity(4, bob, at(5))]);
        let policy: VisibilityPolicy = [(bob, true)].into_iter().collect();

        let feed = compose_feed(&alice, &records, &policy);
        let ids: Vec<i64> = feed.iter().map(|a| a.id.0).collect();

        assert_eq!(ids, vec![3, 2, 1, 4]);
        assert!(feed
            .windows(2)
            .all(|pair| pair[0].occurred_at >= pair[1].occurred_at));
    }

    #[test]
    fn empty_input_gives_empty_feed() {
        let feed = compose_feed(&UserId::new(), &HashMap::new(), &VisibilityPolicy::new());
        assert!(feed.is_empty());
    }

    #[test]
    fn policy_from_users() {
        let public = crate::test_utils::test_user_named("public");
        let mut private = crate::test_utils::test_user_named("private");
        private.is_public = false;

        let policy: VisibilityPolicy = [&public, &private].into_iter().collect();

        assert!(policy.is_public(&public.id));
        assert!(!policy.is_public(&private.id));
        assert!(policy.allows(&private.id, &private.id));
    }
}
