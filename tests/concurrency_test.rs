//! Concurrent access to one ledger from many threads.

use harvest_ledger::{Identity, Ledger, LedgerError, TransitionKind};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

fn race<T, F>(ledger: &Arc<Ledger>, work: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(&Ledger, usize) -> T + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(THREADS));
    let work = Arc::new(work);
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let ledger = Arc::clone(ledger);
            let barrier = Arc::clone(&barrier);
            let work = Arc::clone(&work);
            thread::spawn(move || {
                barrier.wait();
                work(&ledger, i)
            })
        })
        .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
}

#[test]
fn concurrent_creates_get_unique_dense_ids() {
    let ledger = Arc::new(Ledger::new());

    let ids = race(&ledger, |ledger, i| {
        let farmer = Identity::new(format!("0xfarmer{i}"));
        (0..10)
            .map(|n| ledger.create_batch(&farmer, &format!("crop-{n}"), 1).unwrap())
            .collect::<Vec<_>>()
    });

    let all: HashSet<u64> = ids.into_iter().flatten().collect();
    let expected: HashSet<u64> = (1..=(THREADS as u64 * 10)).collect();
    assert_eq!(all, expected);
    assert_eq!(ledger.batch_count(), THREADS as u64 * 10);

    for batch in ledger.list_batches() {
        assert_eq!(ledger.get_batch(batch.id).unwrap(), batch);
    }
}

#[test]
fn mixed_create_paths_share_one_id_sequence() {
    let ledger = Arc::new(Ledger::new());

    let created = race(&ledger, |ledger, i| {
        let farmer = Identity::new(format!("0xfarmer{i}"));
        (0..10)
            .map(|n| {
                let id = if (i + n) % 2 == 0 {
                    ledger
                        .create_batch_with_temperature(&farmer, "Milk", 1, n as i64)
                        .unwrap()
                } else {
                    ledger.create_batch(&farmer, "Rye", 1).unwrap()
                };
                (id, (i + n) % 2 == 0)
            })
            .collect::<Vec<_>>()
    });

    let created: Vec<(u64, bool)> = created.into_iter().flatten().collect();
    let ids: HashSet<u64> = created.iter().map(|(id, _)| *id).collect();
    let expected: HashSet<u64> = (1..=(THREADS as u64 * 10)).collect();
    assert_eq!(ids, expected);
    assert_eq!(ledger.batch_count(), THREADS as u64 * 10);

    for (id, with_temperature) in created {
        let batch = ledger.get_batch(id).unwrap();
        assert_eq!(batch.id, id);
        assert_eq!(batch.temperature.is_some(), with_temperature);
        assert_eq!(ledger.history(id).unwrap().len(), usize::from(with_temperature));
    }
}

#[test]
fn only_one_concurrent_approve_succeeds() {
    let ledger = Arc::new(Ledger::new());
    let id = ledger
        .create_batch(&Identity::new("0xfarmer"), "Wheat", 100)
        .unwrap();

    let results = race(&ledger, move |ledger, i| {
        ledger.approve_batch(&Identity::new(format!("0xmanager{i}")), id)
    });

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(LedgerError::is_invalid_transition));
    assert_eq!(ledger.history(id).unwrap().len(), 1);
}

#[test]
fn pick_races_temperature_update() {
    let ledger = Arc::new(Ledger::new());
    let anyone = Identity::new("0xanyone");
    let id = ledger.create_batch(&anyone, "Fish", 30).unwrap();
    ledger.approve_batch(&anyone, id).unwrap();

    let results = race(&ledger, move |ledger, i| {
        let caller = Identity::new(format!("0x{i}"));
        if i == 0 {
            ledger.pick_batch(&caller, id).map(|_| None)
        } else {
            ledger
                .update_temperature(&caller, id, i as i64)
                .map(|_| Some(i as i64))
        }
    });

    let batch = ledger.get_batch(id).unwrap();
    assert!(batch.picked_by_transporter);

    let history = ledger.history(id).unwrap();
    let pick_at = history
        .records()
        .iter()
        .position(|r| r.kind == TransitionKind::Pick)
        .unwrap();
    assert!(history.records()[pick_at + 1..].is_empty());
    let accepted = results.iter().filter(|r| matches!(r, Ok(Some(_)))).count();
    assert_eq!(accepted, pick_at - 1);
    if accepted == 0 {
        assert_eq!(batch.temperature, None);
    } else {
        assert!(batch.temperature.is_some());
    }
}

#[test]
fn different_batches_progress_independently() {
    let ledger = Arc::new(Ledger::new());
    let farmer = Identity::new("0xfarmer");
    for i in 0..THREADS {
        ledger.create_batch(&farmer, &format!("crop-{i}"), 5).unwrap();
    }

    let results = race(&ledger, |ledger, i| -> harvest_ledger::Result<()> {
        let id = i as u64 + 1;
        let caller = Identity::new(format!("0xactor{i}"));
        ledger.approve_batch(&caller, id)?;
        ledger.pick_batch(&caller, id)?;
        ledger.receive_batch(&caller, id)?;
        ledger.confirm_delivery(&caller, id)
    });

    assert!(results.iter().all(Result::is_ok));
    assert!(ledger
        .list_batches()
        .iter()
        .all(|b| b.delivered_to_consumer));
}
