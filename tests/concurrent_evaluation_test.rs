//! A single trainer shared across threads evaluates independent subjects.

use std::sync::Arc;
use std::thread;

use behavior_curriculum::template;
use behavior_curriculum::{Metrics, Trainer};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn trainer_is_send_and_sync() {
    assert_send_sync::<Trainer>();
}

#[test]
fn concurrent_evaluations_match_sequential_ones() {
    let trainer = Arc::new(template::build_trainer().unwrap());
    let state = template::demo_trainer_state(&trainer).unwrap();
    let inputs: Vec<f64> = (0..32).map(|i| f64::from(i) * 0.25 - 2.0).collect();

    let sequential: Vec<_> = inputs
        .iter()
        .map(|&m| trainer.evaluate(&state, &Metrics::new(m, vec![])).unwrap())
        .collect();

    let handles: Vec<_> = inputs
        .iter()
        .map(|&m| {
            let trainer = Arc::clone(&trainer);
            let state = state.clone();
            thread::spawn(move || trainer.evaluate(&state, &Metrics::new(m, vec![])).unwrap())
        })
        .collect();
    let concurrent: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(sequential, concurrent);
}
