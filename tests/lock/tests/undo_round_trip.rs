//! Undo lock: `undo(step(S)) == S` for every reachable state, every engine,
//! across seeded mazes.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gridstep_harness::session::{SearchSession, UndoOutcome};
use gridstep_kernel::grid::{GridConfig, DEFAULT_RANDOM_OBSTACLE_COUNT};
use gridstep_search::contract::StrategyKind;
use gridstep_search::policy::{AgendaPolicyV1, SearchPolicyV1};

fn policies() -> Vec<SearchPolicyV1> {
    let mut out: Vec<SearchPolicyV1> = StrategyKind::ALL.into_iter().map(SearchPolicyV1::new).collect();
    out.push(SearchPolicyV1 {
        strategy: StrategyKind::ForwardChaining,
        agenda: AgendaPolicyV1::SingleFiring,
    });
    out
}

#[test]
fn step_then_undo_restores_every_reachable_state() {
    let mut rng = StdRng::seed_from_u64(42);
    for policy in policies() {
        for _ in 0..5 {
            let mut session = SearchSession::with_defaults(policy).unwrap();
            session
                .randomize(DEFAULT_RANDOM_OBSTACLE_COUNT, &mut rng)
                .unwrap();
            while !session.status().is_terminal() {
                let before = session.state().clone();
                let before_digest = session.state_digest().unwrap();
                session.step();
                assert!(matches!(session.undo(), UndoOutcome::Restored { .. }));
                assert_eq!(session.state(), &before);
                assert_eq!(session.state_digest().unwrap(), before_digest);
                session.step();
            }
        }
    }
}

#[test]
fn random_interleaving_matches_replayed_prefix() {
    // Any mix of steps and undos lands on the same state as replaying only
    // the surviving steps from reset.
    let mut rng = StdRng::seed_from_u64(7);
    for policy in policies() {
        let mut session = SearchSession::with_defaults(policy).unwrap();
        let mut net_steps = 0usize;
        for _ in 0..60 {
            if rng.gen_bool(0.35) {
                if session.undo() != UndoOutcome::AtRoot {
                    net_steps -= 1;
                }
            } else if !session.status().is_terminal() {
                session.step();
                net_steps += 1;
            }
        }
        let mut replay = SearchSession::with_defaults(policy).unwrap();
        for _ in 0..net_steps {
            replay.step();
        }
        assert_eq!(session.state(), replay.state(), "{}", policy.strategy);
        assert_eq!(session.history_depth(), net_steps + 1);
    }
}

#[test]
fn reset_then_undo_is_a_no_op() {
    for policy in policies() {
        let mut session = SearchSession::with_defaults(policy).unwrap();
        session.run(5);
        session.reset(BTreeSet::new()).unwrap();
        let root = session.state_digest().unwrap();
        assert_eq!(session.undo(), UndoOutcome::AtRoot);
        assert_eq!(session.state_digest().unwrap(), root);
        assert_eq!(session.history_depth(), 1);
    }
}

#[test]
fn snapshots_share_nothing_with_live_state() {
    let mut session =
        SearchSession::new(GridConfig::default(), SearchPolicyV1::default(), BTreeSet::new())
            .unwrap();
    session.step();
    let held = session.state().clone();
    let frozen = held.clone();
    session.run(10);
    assert_eq!(held, frozen);
}
