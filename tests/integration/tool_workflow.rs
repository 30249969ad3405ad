/// End-to-end tool workflows against a real database
use chrono::Duration;
use habit_tracker::tools::*;
use habit_tracker::*;
use tempfile::TempDir;

fn setup() -> (TempDir, SqliteStorage) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = SqliteStorage::new(dir.path().join("habits.db")).expect("Failed to create storage");
    (dir, storage)
}

fn create(storage: &SqliteStorage, name: &str, target_days: Option<u32>) -> HabitId {
    let response = create_habit(
        storage,
        CreateHabitParams {
            name: name.to_string(),
            description: None,
            target_days,
        },
    )
    .expect("create should succeed");
    response.habit.id.expect("created habit has an id")
}

#[test]
fn test_create_and_get() {
    let (_dir, storage) = setup();

    let response = create_habit(
        &storage,
        CreateHabitParams {
            name: "  Meditate ".to_string(),
            description: Some("10 minutes".to_string()),
            target_days: None,
        },
    )
    .unwrap();

    assert!(response.success);
    assert_eq!(response.habit.name, "Meditate");
    assert_eq!(response.habit.target_days, 7);
    assert_eq!(response.habit.status, "active");

    let id = response.habit.id.unwrap();
    let record = get_habit(&storage, GetHabitParams { habit_id: id }).unwrap();
    assert_eq!(record.description, "10 minutes");
    assert!(record.completions.is_empty());
}

#[test]
fn test_create_rejects_bad_input() {
    let (_dir, storage) = setup();

    let blank = create_habit(
        &storage,
        CreateHabitParams {
            name: "   ".to_string(),
            description: None,
            target_days: None,
        },
    );
    assert!(matches!(blank, Err(ToolError::Validation(_))));

    let zero = create_habit(
        &storage,
        CreateHabitParams {
            name: "Read".to_string(),
            description: None,
            target_days: Some(0),
        },
    );
    assert!(matches!(zero, Err(ToolError::Validation(_))));
    assert!(storage.load_all().unwrap().is_empty());
}

#[test]
fn test_log_twice_records_once() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", Some(7));

    let first = log_habit(&storage, LogHabitParams { habit_id: id, date: None }).unwrap();
    assert!(first.newly_recorded);
    assert_eq!(first.current_streak, 1);
    assert_eq!(first.date, format_date(today()));

    let second = log_habit(&storage, LogHabitParams { habit_id: id, date: None }).unwrap();
    assert!(!second.newly_recorded);
    assert!(second.message.contains("already logged"));

    let record = get_habit(&storage, GetHabitParams { habit_id: id }).unwrap();
    assert_eq!(record.completions.len(), 1);
}

#[test]
fn test_log_builds_streak_and_rate() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", Some(7));
    let yesterday = format_date(today() - Duration::days(1));

    log_habit(&storage, LogHabitParams { habit_id: id, date: Some(yesterday) }).unwrap();
    let response = log_habit(&storage, LogHabitParams { habit_id: id, date: None }).unwrap();

    assert_eq!(response.current_streak, 2);
    assert_eq!(response.completion_rate, 2.0 / 7.0);
}

#[test]
fn test_log_errors() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", None);

    let missing = log_habit(&storage, LogHabitParams { habit_id: HabitId(404), date: None });
    assert!(matches!(missing, Err(ToolError::HabitNotFound { habit_id }) if habit_id == HabitId(404)));

    let bad_date = log_habit(
        &storage,
        LogHabitParams {
            habit_id: id,
            date: Some("yesterday".to_string()),
        },
    );
    assert!(matches!(bad_date, Err(ToolError::Validation(DomainError::InvalidDate(_)))));
}

#[test]
fn test_logging_ahead_keeps_current_streak() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", Some(7));
    let yesterday = format_date(today() - Duration::days(1));
    let tomorrow = format_date(today() + Duration::days(1));

    log_habit(&storage, LogHabitParams { habit_id: id, date: Some(yesterday) }).unwrap();
    log_habit(&storage, LogHabitParams { habit_id: id, date: None }).unwrap();
    let response = log_habit(&storage, LogHabitParams { habit_id: id, date: Some(tomorrow) }).unwrap();

    assert!(response.newly_recorded);
    assert_eq!(response.current_streak, 2);
}

#[test]
fn test_non_canonical_dates_are_rejected() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", None);

    for date in ["2024-5-1", " 2024-05-01", "+2024-05-01"] {
        let result = log_habit(&storage, LogHabitParams { habit_id: id, date: Some(date.to_string()) });
        assert!(matches!(result, Err(ToolError::Validation(DomainError::InvalidDate(_)))), "{:?}", date);
    }
    let record = get_habit(&storage, GetHabitParams { habit_id: id }).unwrap();
    assert!(record.completions.is_empty());
}

#[test]
fn test_unlog_removes_completion() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", None);
    log_habit(&storage, LogHabitParams { habit_id: id, date: Some("2024-05-01".to_string()) }).unwrap();
    log_habit(&storage, LogHabitParams { habit_id: id, date: Some("2024-05-02".to_string()) }).unwrap();

    let response = unlog_habit(
        &storage,
        UnlogHabitParams {
            habit_id: id,
            date: "2024-05-01".to_string(),
        },
    )
    .unwrap();
    assert_eq!(response.remaining_completions, 1);

    let record = get_habit(&storage, GetHabitParams { habit_id: id }).unwrap();
    assert_eq!(record.completions, vec!["2024-05-02".to_string()]);

    let again = unlog_habit(
        &storage,
        UnlogHabitParams {
            habit_id: id,
            date: "2024-05-01".to_string(),
        },
    );
    assert!(matches!(again, Err(ToolError::CompletionNotFound { .. })));
}

#[test]
fn test_update_and_list_filters() {
    let (_dir, storage) = setup();
    let read = create(&storage, "Read", None);
    let run = create(&storage, "Run", None);

    let response = update_habit(
        &storage,
        UpdateHabitParams {
            habit_id: run,
            name: Some("Run 5k".to_string()),
            description: None,
            target_days: Some(20),
            status: Some("archived".to_string()),
        },
    )
    .unwrap();
    assert_eq!(response.habit.name, "Run 5k");
    assert_eq!(response.habit.target_days, 20);
    assert_eq!(response.habit.status, "archived");

    let all = list_habits(&storage, ListHabitsParams::default()).unwrap();
    assert_eq!(all.habits.len(), 2);
    assert_eq!(all.summary.total_habits, 2);
    assert_eq!(all.summary.active_habits, 1);

    let active = list_habits(
        &storage,
        ListHabitsParams {
            active_only: Some(true),
            status: None,
        },
    )
    .unwrap();
    assert_eq!(active.habits.len(), 1);
    assert_eq!(active.habits[0].id, Some(read));

    let archived = list_habits(
        &storage,
        ListHabitsParams {
            active_only: None,
            status: Some("Archived".to_string()),
        },
    )
    .unwrap();
    assert_eq!(archived.habits.len(), 1);
    assert_eq!(archived.habits[0].id, Some(run));

    let bogus = list_habits(
        &storage,
        ListHabitsParams {
            active_only: None,
            status: Some("paused".to_string()),
        },
    );
    assert!(matches!(bogus, Err(ToolError::Validation(DomainError::InvalidStatus(_)))));
}

#[test]
fn test_failed_update_leaves_habit_untouched() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", Some(5));

    let result = update_habit(
        &storage,
        UpdateHabitParams {
            habit_id: id,
            name: Some("Renamed".to_string()),
            description: None,
            target_days: Some(0),
            status: None,
        },
    );
    assert!(matches!(result, Err(ToolError::Validation(_))));

    let record = get_habit(&storage, GetHabitParams { habit_id: id }).unwrap();
    assert_eq!(record.name, "Read");
    assert_eq!(record.target_days, 5);
}

#[test]
fn test_delete_is_idempotent() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", None);
    log_habit(&storage, LogHabitParams { habit_id: id, date: None }).unwrap();

    let first = delete_habit(&storage, DeleteHabitParams { habit_id: id }).unwrap();
    assert!(first.deleted);

    let second = delete_habit(&storage, DeleteHabitParams { habit_id: id }).unwrap();
    assert!(second.success);
    assert!(!second.deleted);

    let missing = get_habit(&storage, GetHabitParams { habit_id: id });
    assert!(matches!(missing, Err(ToolError::HabitNotFound { .. })));
}

#[test]
fn test_delete_removes_unreadable_habit() {
    let (dir, storage) = setup();
    let id = create(&storage, "Read", None);

    let conn = rusqlite::Connection::open(dir.path().join("habits.db")).unwrap();
    conn.execute(
        "UPDATE habits SET status = 'paused' WHERE id = ?1",
        rusqlite::params![id.value()],
    )
    .unwrap();
    drop(conn);
    assert!(matches!(
        get_habit(&storage, GetHabitParams { habit_id: id }),
        Err(ToolError::Storage(StorageError::InvalidData(_)))
    ));

    let response = delete_habit(&storage, DeleteHabitParams { habit_id: id }).unwrap();
    assert!(response.deleted);
    assert!(storage.load_all().unwrap().is_empty());
}

#[test]
fn test_status_for_one_habit_and_overall() {
    let (_dir, storage) = setup();
    let id = create(&storage, "Read", Some(2));
    create(&storage, "Run", None);
    for date in ["2024-06-01", "2024-06-02", "2024-06-03"] {
        log_habit(&storage, LogHabitParams { habit_id: id, date: Some(date.to_string()) }).unwrap();
    }

    match get_habit_status(&storage, StatusParams { habit_id: Some(id) }).unwrap() {
        StatusResponse::Habit { stats, message } => {
            assert_eq!(stats.completions_count, 3);
            assert_eq!(stats.completion_rate, 1.0);
            assert!(stats.target_reached());
            assert!(message.contains("target reached"));
        }
        other => panic!("expected per-habit status, got {:?}", other),
    }

    match get_habit_status(&storage, StatusParams::default()).unwrap() {
        StatusResponse::Overall { summary, .. } => {
            assert_eq!(summary.total_habits, 2);
            assert_eq!(summary.total_completions, 3);
            assert_eq!(summary.most_completed_habit.as_deref(), Some("Read"));
        }
        other => panic!("expected overall status, got {:?}", other),
    }

    let missing = get_habit_status(&storage, StatusParams { habit_id: Some(HabitId(77)) });
    assert!(matches!(missing, Err(ToolError::HabitNotFound { .. })));
}

#[test]
fn test_completions_by_habit_and_by_date() {
    let (_dir, storage) = setup();
    let read = create(&storage, "Read", None);
    let run = create(&storage, "Run", None);
    log_habit(&storage, LogHabitParams { habit_id: read, date: Some("2024-08-02".to_string()) }).unwrap();
    log_habit(&storage, LogHabitParams { habit_id: read, date: Some("2024-08-01".to_string()) }).unwrap();
    log_habit(&storage, LogHabitParams { habit_id: run, date: Some("2024-08-02".to_string()) }).unwrap();

    let by_habit = get_completions(
        &storage,
        CompletionsParams {
            habit_id: Some(read),
            date: None,
        },
    )
    .unwrap();
    match by_habit {
        CompletionsResponse::Habit { completions, total, .. } => {
            assert_eq!(total, 2);
            assert_eq!(completions, vec!["2024-08-01".to_string(), "2024-08-02".to_string()]);
        }
        other => panic!("expected habit history, got {:?}", other),
    }

    let by_date = get_completions(
        &storage,
        CompletionsParams {
            habit_id: None,
            date: Some("2024-08-02".to_string()),
        },
    )
    .unwrap();
    assert_eq!(by_date.message(), "Completed on 2024-08-02: Read, Run");

    let neither = get_completions(&storage, CompletionsParams::default());
    assert!(matches!(neither, Err(ToolError::Validation(_))));
}
