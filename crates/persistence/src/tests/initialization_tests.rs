// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_test_user;
use crate::{NewPassenger, Persistence, PersistenceError};

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    create_test_user(&mut first, 1);

    assert_eq!(first.count_users().unwrap(), 1);
    assert_eq!(second.count_users().unwrap(), 0);
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();

    let user_id: i64 = create_test_user(&mut persistence, 1);
    let result = persistence.create_passenger(&NewPassenger {
        user_id,
        travel_id: 9_999,
        passengers_no: 1,
        flight_id: None,
        resort_id: None,
        vehicle_id: None,
    });
    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn test_file_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "travelease_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_user(&mut persistence, 1);
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.count_users().unwrap(), 1);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}

#[test]
fn test_missing_rows_map_to_none() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.get_user_by_id(1).unwrap().is_none());
    assert!(persistence.get_travel_by_id(1).unwrap().is_none());
    assert!(persistence.get_booking_draft(1).unwrap().is_none());
    assert!(matches!(
        persistence.delete_discount(1),
        Err(PersistenceError::NotFound(_))
    ));
}
