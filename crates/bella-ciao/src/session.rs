// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The current session's identity.
//!
//! [`Session`] is handed to whatever needs to know who is logged in. It has a
//! single write operation, [`Session::set_current_user`], and readers either
//! take a snapshot or [`subscribe`](Session::subscribe) to be told about every
//! change. Clones share the same underlying state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::User;

/// Shared holder of the authenticated user.
#[derive(Debug, Clone)]
pub struct Session {
    tx: Arc<watch::Sender<Option<User>>>,
}

/// Receives every identity change made through a [`Session`].
pub type SessionSubscriber = watch::Receiver<Option<User>>;

impl Session {
    /// Creates a session with nobody logged in.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the current user. The last completed write wins.
    pub fn set_current_user(&self, user: Option<User>) {
        tracing::debug!(user = ?user.as_ref().map(|u| u.id), "session user changed");
        self.tx.send_replace(user);
    }

    /// Returns a snapshot of the current user.
    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    /// Returns true if someone is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Subscribes to identity changes.
    ///
    /// The receiver sees the current value immediately and is notified
    /// through `changed()` on every later write.
    pub fn subscribe(&self) -> SessionSubscriber {
        self.tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(id: i64) -> User {
        User {
            id,
            name: format!("user {}", id),
            unique_id: format!("{:08}Z", id),
            role: Role::None,
            files: Vec::new(),
            messages: Vec::new(),
        }
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let reader = session.clone();
        session.set_current_user(Some(user(1)));
        assert_eq!(reader.current_user().map(|u| u.id), Some(1));

        session.set_current_user(Some(user(2)));
        assert_eq!(reader.current_user().map(|u| u.id), Some(2));
    }

    #[tokio::test]
    async fn test_subscriber_is_notified() {
        let session = Session::new();
        let mut rx = session.subscribe();
        assert!(rx.borrow_and_update().is_none());

        session.set_current_user(Some(user(7)));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.id), Some(7));

        session.set_current_user(None);
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}
