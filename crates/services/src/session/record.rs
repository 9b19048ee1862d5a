//! The persisted session record: one serialized `User` under a well-known key.

use edutrack_core::model::User;
use storage::SessionStore;

/// Storage key of the persisted session.
pub const SESSION_KEY: &str = "et_user";

/// Load and decode the persisted user.
///
/// A record that does not decode is deleted and reported as absent; storage
/// failures are logged and likewise treated as "no session".
pub(crate) async fn restore(store: &dyn SessionStore) -> Option<User> {
    let raw = match store.load(SESSION_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("could not read persisted session: {err}");
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::debug!("discarding unreadable session record: {err}");
            if let Err(err) = store.remove(SESSION_KEY).await {
                log::warn!("could not remove unreadable session record: {err}");
            }
            None
        }
    }
}

pub(crate) async fn persist(store: &dyn SessionStore, user: &User) {
    let encoded = match serde_json::to_string(user) {
        Ok(encoded) => encoded,
        Err(err) => {
            log::warn!("could not encode session record: {err}");
            return;
        }
    };
    if let Err(err) = store.save(SESSION_KEY, &encoded).await {
        log::warn!("could not persist session: {err}");
    }
}

pub(crate) async fn clear(store: &dyn SessionStore) {
    if let Err(err) = store.remove(SESSION_KEY).await {
        log::warn!("could not clear persisted session: {err}");
    }
}
