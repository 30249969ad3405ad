/// Save/load contract of the SQLite store
use chrono::{Duration, NaiveDate};
use habit_tracker::*;
use tempfile::TempDir;

fn open() -> (TempDir, SqliteStorage) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = SqliteStorage::new(dir.path().join("habits.db")).expect("Failed to create storage");
    (dir, storage)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_round_trip_preserves_fields_and_completions() {
    let (_dir, storage) = open();
    let mut habit = Habit::new("Read")
        .unwrap()
        .with_description("before bed")
        .unwrap()
        .with_target_days(14);
    habit.status = HabitStatus::Completed;
    habit.mark_completed(day(2024, 3, 2));
    habit.mark_completed(day(2024, 3, 1));
    habit.mark_completed(day(2024, 2, 28));

    storage.save(&mut habit).unwrap();

    let habits = storage.load_all().unwrap();
    assert_eq!(habits.len(), 1);
    let loaded = &habits[0];
    assert_eq!(loaded.id, habit.id);
    assert_eq!(loaded.name, "Read");
    assert_eq!(loaded.description, "before bed");
    assert_eq!(loaded.target_days, 14);
    assert_eq!(loaded.status, HabitStatus::Completed);
    assert_eq!(loaded.creation_date(), habit.creation_date());
    assert_eq!(
        loaded.completions().collect::<Vec<_>>(),
        vec![day(2024, 2, 28), day(2024, 3, 1), day(2024, 3, 2)]
    );
}

#[test]
fn test_first_save_returns_positive_id_and_second_save_updates() {
    let (_dir, storage) = open();
    let mut habit = Habit::new("Run").unwrap();

    let id = storage.save(&mut habit).unwrap();
    assert!(id.value() > 0);
    assert_eq!(habit.id, Some(id));

    habit.name = "Run 5k".to_string();
    let second = storage.save(&mut habit).unwrap();
    assert_eq!(second, id);

    let habits = storage.load_all().unwrap();
    let matching: Vec<_> = habits.iter().filter(|h| h.id == Some(id)).collect();
    assert_eq!(habits.len(), 1);
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "Run 5k");
}

#[test]
fn test_delete_unknown_id_is_harmless() {
    let (_dir, storage) = open();
    let mut habit = Habit::new("Stretch").unwrap();
    storage.save(&mut habit).unwrap();

    assert!(!storage.delete(HabitId(9_999)).unwrap());

    let habits = storage.load_all().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "Stretch");
}

#[test]
fn test_completions_are_replaced_not_accumulated() {
    let (_dir, storage) = open();
    let mut habit = Habit::new("Journal").unwrap();
    let first = today() - Duration::days(5);
    let second = today() - Duration::days(2);

    habit.mark_completed(first);
    habit.mark_completed(second);
    storage.save(&mut habit).unwrap();

    habit.remove_completion(first);
    storage.save(&mut habit).unwrap();

    let habits = storage.load_all().unwrap();
    assert_eq!(habits[0].completions().collect::<Vec<_>>(), vec![second]);
}

#[test]
fn test_load_all_orders_by_id() {
    let (_dir, storage) = open();
    let mut ids = Vec::new();
    for name in ["Zebra", "Apple", "Mango"] {
        let mut habit = Habit::new(name).unwrap();
        ids.push(storage.save(&mut habit).unwrap());
    }

    let loaded: Vec<_> = storage.load_all().unwrap().into_iter().map(|h| h.id.unwrap()).collect();
    assert_eq!(loaded, ids);
    assert!(loaded.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_delete_removes_habit_and_history() {
    let (_dir, storage) = open();
    let mut keep = Habit::new("Keep").unwrap();
    keep.mark_completed(day(2024, 1, 1));
    let mut drop = Habit::new("Drop").unwrap();
    drop.mark_completed(day(2024, 1, 1));
    storage.save(&mut keep).unwrap();
    let drop_id = storage.save(&mut drop).unwrap();

    assert!(storage.delete(drop_id).unwrap());

    let habits = storage.load_all().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].name, "Keep");
    assert!(storage.stats(drop_id).unwrap().is_none());
    assert!(storage.get_habit(drop_id).unwrap().is_none());
}

#[test]
fn test_stats_matches_entity_rate() {
    let (_dir, storage) = open();
    let mut habit = Habit::new("Water").unwrap().with_target_days(3);
    for d in 1..=5 {
        habit.mark_completed(day(2024, 4, d));
    }
    let id = storage.save(&mut habit).unwrap();

    let stats = storage.stats(id).unwrap().expect("stats for saved habit");
    assert_eq!(stats.completions_count, 5);
    assert_eq!(stats.completion_rate, habit.completion_rate());
    assert_eq!(stats.completion_rate, 1.0);
}

#[test]
fn test_stats_unknown_id_is_none() {
    let (_dir, storage) = open();
    assert!(storage.stats(HabitId(1)).unwrap().is_none());
}

#[test]
fn test_get_habit_by_id() {
    let (_dir, storage) = open();
    let mut a = Habit::new("A").unwrap();
    let mut b = Habit::new("B").unwrap();
    b.mark_completed(day(2024, 7, 4));
    storage.save(&mut a).unwrap();
    let b_id = storage.save(&mut b).unwrap();

    let loaded = storage.get_habit(b_id).unwrap().unwrap();
    assert_eq!(loaded, b);
}
