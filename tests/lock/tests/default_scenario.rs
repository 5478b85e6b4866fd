//! Default-scenario lock: 5x6 grid, start (0,0), goal (4,5), six fixed
//! obstacles. Every engine must reach the goal at cost 9.

use std::collections::BTreeSet;

use gridstep_harness::session::SearchSession;
use gridstep_kernel::grid::{GridConfig, Position};
use gridstep_kernel::maze::bfs_distance;
use gridstep_search::contract::{StepStrategy, StrategyKind};
use gridstep_search::path::path_cost;
use gridstep_search::policy::{AgendaPolicyV1, SearchPolicyV1};

fn solve(policy: SearchPolicyV1) -> SearchSession {
    let mut session = SearchSession::with_defaults(policy).unwrap();
    session.run(1_000);
    assert!(session.status().is_terminal(), "{} did not terminate", policy.strategy);
    session
}

fn assert_route(session: &SearchSession) {
    let config = GridConfig::default();
    let path = session.final_path();
    assert_eq!(path.first(), Some(&config.start));
    assert_eq!(path.last(), Some(&config.goal));
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan(pair[1]), 1, "route must move one cell at a time");
        assert!(session.grid().is_valid(pair[1]), "route crosses {}", pair[1]);
    }
}

#[test]
fn default_bfs_distance_is_nine() {
    let config = GridConfig::default();
    let grid = config.grid(GridConfig::default_obstacles()).unwrap();
    assert_eq!(bfs_distance(&grid, config.start, config.goal), Some(9));
}

#[test]
fn astar_finds_ten_node_route() {
    let session = solve(SearchPolicyV1::new(StrategyKind::AStar));
    assert!(session.found());
    assert_eq!(session.final_path().len(), 10);
    assert_route(&session);
}

#[test]
fn bidirectional_matches_optimal_cost() {
    let session = solve(SearchPolicyV1::new(StrategyKind::Bidirectional));
    assert!(session.found());
    assert_eq!(path_cost(session.final_path()), 9);
    let bidi = session.state().as_bidirectional().unwrap();
    assert_eq!(bidi.meeting_cost(), Some(9));
    assert_eq!(session.state().meeting_or_goal(), bidi.meeting());
    assert_route(&session);
}

#[test]
fn forward_chaining_route_matches_bfs_distance() {
    let session = solve(SearchPolicyV1::new(StrategyKind::ForwardChaining));
    assert!(session.found());
    assert_eq!(path_cost(session.final_path()), 9);
    assert_route(&session);

    let fc = session.state().as_forward_chaining().unwrap();
    let last = fc.inference_chain().last().unwrap();
    assert_eq!(last.consequent, Position::new(4, 5));
    assert!(fc.facts().contains(&Position::new(4, 5)));
}

#[test]
fn single_firing_forward_chaining_walks_the_long_way() {
    let session = solve(SearchPolicyV1 {
        strategy: StrategyKind::ForwardChaining,
        agenda: AgendaPolicyV1::SingleFiring,
    });
    assert!(session.found());
    assert_eq!(path_cost(session.final_path()), 19);
    assert_route(&session);
}

#[test]
fn walled_goal_exhausts_every_engine() {
    let config = GridConfig::default();
    let walled: BTreeSet<Position> = [Position::new(3, 5), Position::new(4, 4)].into_iter().collect();
    for kind in StrategyKind::ALL {
        let mut session =
            SearchSession::new(config, SearchPolicyV1::new(kind), walled.clone()).unwrap();
        session.run(1_000);
        assert!(session.status().is_terminal(), "{kind}");
        assert!(!session.found(), "{kind}");
        assert!(session.final_path().is_empty(), "{kind}");
    }
}
