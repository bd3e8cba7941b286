//! Property tests for ordering and range membership.

use proptest::prelude::*;
use tailstore::{Event, EventStore};

const TYPES: [&str; 3] = ["cpu", "mem", "disk"];

fn arb_events() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0..TYPES.len(), 1i64..200), 0..200)
}

fn load(events: &[(usize, i64)]) -> EventStore {
    let store = EventStore::new();
    for &(kind, timestamp) in events {
        store.insert(Event::new(TYPES[kind], timestamp)).unwrap();
    }
    store
}

proptest! {
    #[test]
    fn query_returns_exactly_the_window(
        events in arb_events(),
        start in 0i64..220,
        len in 1i64..220,
    ) {
        let store = load(&events);
        let end = start + len;

        for (kind, name) in TYPES.iter().enumerate() {
            let got: Vec<i64> = store
                .query(name, start, end)
                .unwrap()
                .map(|e| {
                    assert_eq!(e.event_type(), *name);
                    e.timestamp()
                })
                .collect();

            let mut expected: Vec<i64> = events
                .iter()
                .filter(|(k, t)| *k == kind && *t >= start && *t < end)
                .map(|(_, t)| *t)
                .collect();
            expected.sort();

            prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn buffer_stays_sorted_under_removals(
        events in arb_events(),
        removal_windows in prop::collection::vec((0i64..200, 1i64..50), 0..5),
    ) {
        let store = load(&events);

        for (start, len) in removal_windows {
            let mut it = store.query("cpu", start, start + len).unwrap();
            let mut flip = false;
            while it.move_next() {
                flip = !flip;
                if flip {
                    it.remove().unwrap();
                }
            }
            it.close();
        }

        let all: Vec<i64> = store
            .query("cpu", 0, i64::MAX)
            .unwrap()
            .map(|e| e.timestamp())
            .collect();
        prop_assert!(all.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(all.len(), store.len("cpu"));
    }

    #[test]
    fn full_drain_visits_each_event_once(events in arb_events()) {
        let store = load(&events);
        let expected = events.iter().filter(|(k, _)| *k == 0).count();

        let mut it = store.query("cpu", 0, i64::MAX).unwrap();
        let mut removed = 0;
        while it.move_next() {
            it.remove().unwrap();
            removed += 1;
        }
        it.close();

        prop_assert_eq!(removed, expected);
        prop_assert_eq!(store.len("cpu"), 0);
    }
}
