use floorplan::assignment::{AssignOutcome, AssignmentEngine, SharedEngine};
use floorplan::core::model::{Restaurant, Table, Waiter};
use floorplan::core::store::Store;
use floorplan::repository::{FloorRepository, SeedPlan, SqliteRepository};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

fn open_repo(dir: &std::path::Path) -> SqliteRepository {
    SqliteRepository::open(&Store::for_project(dir), "test").expect("open repo")
}

fn seeded(dir: &std::path::Path, tables: &[(&str, &str)], waiters: &[&str]) -> SqliteRepository {
    let repo = open_repo(dir);
    for (restaurant, number) in tables {
        let r = Restaurant::new(restaurant).unwrap();
        repo.create_table(&Table::new(number, r).unwrap()).unwrap();
    }
    for w in waiters {
        repo.create_waiter(&Waiter::new(w).unwrap()).unwrap();
    }
    repo
}

fn names(outcome: AssignOutcome) -> Vec<String> {
    match outcome {
        AssignOutcome::Rejected { suggestions } => {
            let mut out: Vec<String> = suggestions.iter().map(|w| w.name().to_string()).collect();
            out.sort();
            out
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn two_tables_one_waiter_scenario() {
    let tmp = tempdir().unwrap();
    let repo = seeded(tmp.path(), &[("R1", "1"), ("R1", "2")], &["A", "B"]);
    let mut engine = AssignmentEngine::new(repo);

    assert_eq!(engine.assign_by_name("A", "R1", "1").unwrap(), AssignOutcome::Assigned);
    assert_eq!(engine.assign_by_name("A", "R1", "2").unwrap(), AssignOutcome::Assigned);

    let view = engine.assignments_for_name("R1").unwrap();
    assert_eq!(view.len(), 2);
    for waiter in view.values() {
        assert_eq!(waiter.as_ref().map(Waiter::name), Some("A"));
    }
    assert!(engine.tables_for_name("B").unwrap().is_empty());
}

#[test]
fn capacity_scenario_suggests_free_waiters() {
    let tmp = tempdir().unwrap();
    let tables: Vec<(&str, &str)> = ["1", "2", "3", "4", "5"].iter().map(|n| ("R1", *n)).collect();
    let repo = seeded(tmp.path(), &tables, &["A", "B", "C"]);
    let mut engine = AssignmentEngine::new(repo);

    for n in ["1", "2", "3", "4"] {
        assert!(engine.assign_by_name("A", "R1", n).unwrap().is_assigned());
    }
    for n in ["1", "2", "3", "4"] {
        // C takes over A's tables one by one, then gives them back
        assert!(engine.assign_by_name("C", "R1", n).unwrap().is_assigned());
    }
    for n in ["1", "2", "3", "4"] {
        assert!(engine.assign_by_name("A", "R1", n).unwrap().is_assigned());
    }

    let outcome = engine.assign_by_name("A", "R1", "5").unwrap();
    assert_eq!(names(outcome), vec!["B".to_string(), "C".to_string()]);

    let r1 = Restaurant::new("R1").unwrap();
    let fifth = Table::new("5", r1).unwrap();
    assert_eq!(engine.assignments_for_name("R1").unwrap()[&fifth], None);
}

#[test]
fn full_restaurant_does_not_block_another() {
    let tmp = tempdir().unwrap();
    let repo = seeded(
        tmp.path(),
        &[("R1", "1"), ("R1", "2"), ("R1", "3"), ("R1", "4"), ("R2", "1")],
        &["A"],
    );
    let mut engine = AssignmentEngine::new(repo);

    for n in ["1", "2", "3", "4"] {
        assert!(engine.assign_by_name("A", "R1", n).unwrap().is_assigned());
    }
    assert!(engine.assign_by_name("A", "R2", "1").unwrap().is_assigned());

    let grouped = engine.tables_for_name("A").unwrap();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[&Restaurant::new("R2").unwrap()].len(), 1);
}

#[test]
fn reassignment_updates_both_waiters_and_survives_reload() {
    let tmp = tempdir().unwrap();
    let repo = seeded(tmp.path(), &[("R1", "1"), ("R1", "2")], &["A", "B"]);
    let mut engine = AssignmentEngine::new(repo);

    engine.assign_by_name("A", "R1", "1").unwrap();
    engine.assign_by_name("A", "R1", "2").unwrap();
    engine.assign_by_name("B", "R1", "1").unwrap();

    let r1 = Restaurant::new("R1").unwrap();
    let a = engine.tables_for_name("A").unwrap();
    assert_eq!(a[&r1].len(), 1);
    assert!(a[&r1].contains(&Table::new("2", r1.clone()).unwrap()));

    // A fresh engine over the same database sees the same floor.
    let mut reloaded = AssignmentEngine::new(open_repo(tmp.path()));
    let all = reloaded.all_tables().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[&Waiter::new("B").unwrap()][&r1].contains(&Table::new("1", r1.clone()).unwrap()));
    assert!(all[&Waiter::new("A").unwrap()][&r1].contains(&Table::new("2", r1).unwrap()));
}

#[test]
fn assignments_list_every_table_of_the_restaurant() {
    let tmp = tempdir().unwrap();
    let repo = open_repo(tmp.path());
    repo.seed(&SeedPlan {
        restaurants: 2,
        tables_per_restaurant: 5,
        waiters: 2,
    })
    .unwrap();
    let mut engine = AssignmentEngine::new(repo);
    engine.assign_by_name("Waiter1", "Restaurant1", "Table3").unwrap();

    let view = engine.assignments_for_name("Restaurant1").unwrap();
    assert_eq!(view.len(), 5);
    assert_eq!(view.values().filter(|w| w.is_some()).count(), 1);
    assert!(engine.assignments_for_name("Restaurant9").unwrap().is_empty());
}

#[test]
fn object_keyed_assign_upserts_unknown_records() {
    let tmp = tempdir().unwrap();
    let mut engine = AssignmentEngine::new(open_repo(tmp.path()));

    let waiter = Waiter::new("Walk-in").unwrap();
    let table = Table::new("1A", Restaurant::new("Patio").unwrap()).unwrap();
    assert!(engine.assign(&waiter, &table).unwrap().is_assigned());

    let repo = open_repo(tmp.path());
    assert!(repo.load_tables().unwrap().contains(&table));
    assert!(repo.load_waiters().unwrap().contains(&waiter));
    assert!(repo.load_assignments().unwrap()[&waiter].contains(&table));
}

#[test]
fn object_keyed_assign_matches_a_fresh_load() {
    let tmp = tempdir().unwrap();
    let mut engine = AssignmentEngine::new(seeded(tmp.path(), &[("Patio", "1")], &["A"]));

    let waiter = Waiter::new("Walk-in").unwrap();
    let table = Table::new("1A", Restaurant::new("Patio").unwrap()).unwrap();
    assert!(engine.assign(&waiter, &table).unwrap().is_assigned());

    let live = engine.assignments_for_name("Patio").unwrap();
    assert_eq!(live.get(&table), Some(&Some(waiter.clone())));
    assert!(engine.tables_for_name("Walk-in").unwrap().contains_key(table.restaurant()));

    let mut reloaded = AssignmentEngine::new(open_repo(tmp.path()));
    assert_eq!(reloaded.assignments_for_name("Patio").unwrap(), live);
    assert_eq!(
        engine.assign_by_name("Walk-in", "Patio", "1A").unwrap(),
        AssignOutcome::Assigned
    );
}

#[test]
fn shared_engine_serializes_concurrent_assignments() {
    let tmp = tempdir().unwrap();
    let repo = open_repo(tmp.path());
    repo.seed(&SeedPlan {
        restaurants: 1,
        tables_per_restaurant: 10,
        waiters: 1,
    })
    .unwrap();
    let shared = Arc::new(SharedEngine::new(AssignmentEngine::new(repo)));

    let handles: Vec<_> = (1..=10)
        .map(|n| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                shared
                    .assign_by_name("Waiter1", "Restaurant1", &format!("Table{}", n))
                    .unwrap()
            })
        })
        .collect();
    let assigned = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(AssignOutcome::is_assigned)
        .count();

    assert_eq!(assigned, 4);
    let persisted = open_repo(tmp.path()).load_assignments().unwrap();
    assert_eq!(persisted[&Waiter::new("Waiter1").unwrap()].len(), 4);
}
