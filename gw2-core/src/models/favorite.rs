use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-scoped bookmark on an item.
///
/// At most one favorite exists per (user, item) pair; the timestamp
/// records insertion order for listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub user_id: String,
    pub item_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(user_id: impl Into<String>, item_id: i32) -> Self {
        Self {
            user_id: user_id.into(),
            item_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_owner_and_item() {
        let fav = Favorite::new("user-1", 42);
        assert_eq!(fav.user_id, "user-1");
        assert_eq!(fav.item_id, 42);
    }
}
