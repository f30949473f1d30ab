// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_test_user;
use crate::{Persistence, PersistenceError, SessionData};

#[test]
fn test_session_round_trip_and_delete() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = create_test_user(&mut persistence, 1);

    let session_id: i64 = persistence
        .create_session("session_1_1", user_id, "traveler", "2026-06-01T00:00:00.000000000Z")
        .unwrap();

    let session: SessionData = persistence
        .get_session_by_token("session_1_1")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.role, "traveler");

    persistence.update_session_activity(session_id).unwrap();
    persistence.delete_session("session_1_1").unwrap();

    assert!(
        persistence
            .get_session_by_token("session_1_1")
            .unwrap()
            .is_none()
    );
    assert_eq!(
        persistence.delete_session("session_1_1"),
        Err(PersistenceError::SessionNotFound)
    );
}

#[test]
fn test_delete_expired_sessions_keeps_live_ones() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = create_test_user(&mut persistence, 1);

    persistence
        .create_session("old", user_id, "traveler", "2026-01-01T00:00:00.000000000Z")
        .unwrap();
    persistence
        .create_session("live", user_id, "admin", "2026-12-01T00:00:00.000000000Z")
        .unwrap();

    let deleted: usize = persistence
        .delete_expired_sessions("2026-06-01T00:00:00.000000000Z")
        .unwrap();

    assert_eq!(deleted, 1);
    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("live").unwrap().is_some());
}

#[test]
fn test_unknown_role_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = create_test_user(&mut persistence, 1);

    let result = persistence.create_session("tok", user_id, "pilot", "2026-12-01T00:00:00Z");
    assert!(result.is_err());
}
