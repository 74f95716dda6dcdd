//! End-to-end scenarios for both registries

use crate::{BroadcastConfig, BroadcastRegistry, Callback, EventRegistry, OnceRemoval};
use std::sync::{Arc, Mutex};

type Results = Arc<Mutex<Vec<i64>>>;

/// Listener that records `op(n)` for every emitted `n`
fn calc(results: &Results, name: &str, op: fn(i64) -> i64) -> Callback<i64> {
    let results = results.clone();
    Callback::named(name, move |n: &i64| {
        results.lock().unwrap().push(op(*n));
        Ok(())
    })
}

fn take(results: &Results) -> Vec<i64> {
    std::mem::take(&mut *results.lock().unwrap())
}

struct Fixture {
    results: Results,
    multiply_two: Callback<i64>,
    multiply_three: Callback<i64>,
    divide_two: Callback<i64>,
    divide_three: Callback<i64>,
}

impl Fixture {
    fn new() -> Self {
        let results = Results::default();
        Self {
            multiply_two: calc(&results, "multiply_two", |n| n * 2),
            multiply_three: calc(&results, "multiply_three", |n| n * 3),
            divide_two: calc(&results, "divide_two", |n| n / 2),
            divide_three: calc(&results, "divide_three", |n| n / 3),
            results,
        }
    }
}

#[test_log::test]
fn test_multiplication_scenario() {
    let f = Fixture::new();
    let emitter = EventRegistry::new();

    emitter.subscribe("multiplication", f.multiply_two.clone());
    emitter.subscribe("multiplication", f.multiply_three.clone());

    emitter.emit("multiplication", &2).unwrap();
    assert_eq!(take(&f.results), vec![4, 6]);

    emitter.unsubscribe("multiplication", &f.multiply_three);
    emitter.emit("multiplication", &2).unwrap();
    assert_eq!(take(&f.results), vec![4]);
}

#[test_log::test]
fn test_division_scenario() {
    let f = Fixture::new();
    let emitter = EventRegistry::new();

    emitter.subscribe("division", f.divide_two.clone());
    emitter.subscribe_once("division", f.divide_three.clone());

    emitter.emit("division", &6).unwrap();
    assert_eq!(take(&f.results), vec![3, 2]);

    emitter.emit("division", &6).unwrap();
    assert_eq!(take(&f.results), vec![3]);

    emitter.emit("division", &6).unwrap();
    assert_eq!(take(&f.results), vec![3]);
}

#[test_log::test]
fn test_broadcast_scenario() {
    let f = Fixture::new();
    let emitter = BroadcastRegistry::new();

    emitter.subscribe("multiplication", f.multiply_two.clone());
    emitter.subscribe("multiplication", f.multiply_three.clone());
    emitter.subscribe("division", f.divide_two.clone());
    emitter.subscribe("division", f.divide_three.clone());

    emitter.emit("*", &6).unwrap();
    assert_eq!(take(&f.results), vec![12, 18, 3, 2]);

    let stats = emitter.stats();
    assert_eq!(stats.events_emitted, 1);
    assert_eq!(stats.listeners_invoked, 4);
    assert_eq!(stats.total_listeners, 4);
}

#[test_log::test]
fn test_broadcast_once_listener_under_both_policies() {
    for (policy, second_round) in [
        (OnceRemoval::PerEvent, vec![3]),
        (OnceRemoval::WildcardName, vec![3, 2]),
    ] {
        let f = Fixture::new();
        let emitter = BroadcastRegistry::with_broadcast_config(BroadcastConfig {
            once_removal: policy,
            ..Default::default()
        });
        emitter.subscribe("division", f.divide_two.clone());
        emitter.subscribe_once("division", f.divide_three.clone());

        emitter.emit("*", &6).unwrap();
        assert_eq!(take(&f.results), vec![3, 2], "{policy:?}");

        emitter.emit("*", &6).unwrap();
        assert_eq!(take(&f.results), second_round, "{policy:?}");
    }
}

#[test_log::test]
fn test_name_changed_payload() {
    #[derive(Debug, Clone)]
    struct NameChanged {
        name: String,
    }

    let headline = Arc::new(Mutex::new(String::new()));
    let emitter = EventRegistry::<NameChanged>::new();

    let target = headline.clone();
    emitter.subscribe(
        "event:name-changed",
        Callback::named("update_headline", move |data: &NameChanged| {
            *target.lock().unwrap() = format!("New value is: {}", data.name);
            Ok(())
        }),
    );

    emitter
        .emit(
            "event:name-changed",
            &NameChanged {
                name: "Ada".to_string(),
            },
        )
        .unwrap();

    assert_eq!(*headline.lock().unwrap(), "New value is: Ada");
}

#[test_log::test]
fn test_tuple_payload_carries_several_arguments() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let emitter = EventRegistry::<(String, u32)>::new();

    let sink = seen.clone();
    emitter.subscribe(
        "login",
        Callback::new(move |(user, attempt): &(String, u32)| {
            sink.lock().unwrap().push(format!("{user}#{attempt}"));
            Ok(())
        }),
    );

    emitter.emit("login", &("ada".to_string(), 2)).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["ada#2".to_string()]);
}

#[test_log::test]
fn test_unit_payload_for_argumentless_events() {
    let count = Arc::new(Mutex::new(0));
    let emitter = EventRegistry::<()>::new();

    let counter = count.clone();
    emitter.subscribe(
        "tick",
        Callback::new(move |_: &()| {
            *counter.lock().unwrap() += 1;
            Ok(())
        }),
    );

    emitter.emit("tick", &()).unwrap();
    emitter.emit("tick", &()).unwrap();
    assert_eq!(*count.lock().unwrap(), 2);
}

#[test_log::test]
fn test_stats_serialize_to_json() {
    let f = Fixture::new();
    let emitter = EventRegistry::new();
    emitter.subscribe("multiplication", f.multiply_two.clone());
    emitter.emit("multiplication", &1).unwrap();

    let json = serde_json::to_value(emitter.stats()).unwrap();
    assert_eq!(json["events_emitted"], 1);
    assert_eq!(json["listeners_invoked"], 1);
    assert_eq!(json["listener_failures"], 0);
}

#[test_log::test]
fn test_panicking_listener_leaves_registry_usable() {
    let f = Fixture::new();
    let emitter = BroadcastRegistry::new();
    emitter.subscribe(
        "boom",
        Callback::named("explode", |_: &i64| panic!("listener exploded")),
    );

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| emitter.emit("*", &1)));
    assert!(outcome.is_err());

    emitter.clear("boom");
    emitter.subscribe("multiplication", f.multiply_two.clone());
    emitter.subscribe_once("multiplication", f.multiply_three.clone());

    emitter.emit("multiplication", &2).unwrap();
    emitter.emit("multiplication", &2).unwrap();
    assert_eq!(take(&f.results), vec![4, 6, 4]);
    assert_eq!(emitter.listener_count("multiplication"), 1);
}
