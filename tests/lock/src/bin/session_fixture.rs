//! Binary that drives a search session through a fixed command script and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `session_fixture <strategy> [agenda_policy] [maze_seed]`
//!
//! Output: key=value lines on stdout. Logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`).

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use gridstep_harness::session::SearchSession;
use gridstep_harness::transcript::{SessionCommand, SessionTranscriptV1};
use gridstep_kernel::grid::DEFAULT_RANDOM_OBSTACLE_COUNT;
use gridstep_search::contract::StrategyKind;
use gridstep_search::path::{path_cost, render_path};
use gridstep_search::policy::{AgendaPolicyV1, SearchPolicyV1};

const MAX_COMMANDS: usize = 1_000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let strategy: StrategyKind = args
        .first()
        .map_or("astar", String::as_str)
        .parse()
        .expect("unknown strategy");
    let agenda: AgendaPolicyV1 = args
        .get(1)
        .map_or("saturating", String::as_str)
        .parse()
        .expect("unknown agenda policy");
    let seed: Option<u64> = args.get(2).map(|s| s.parse().expect("seed must be a u64"));

    let policy = SearchPolicyV1 { strategy, agenda };
    let mut session = SearchSession::with_defaults(policy).expect("default session");
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        session
            .randomize(DEFAULT_RANDOM_OBSTACLE_COUNT, &mut rng)
            .expect("randomize");
    }

    let mut transcript = SessionTranscriptV1::begin(&session).expect("begin transcript");
    let initial_digest = session.state_digest().expect("initial digest");

    // Every fourth step is undone and retaken.
    let mut commands = 0;
    while !session.status().is_terminal() && commands < MAX_COMMANDS {
        transcript
            .apply(&mut session, &SessionCommand::Step)
            .expect("step");
        commands += 1;
        if session.steps_taken() % 4 == 0 && !session.status().is_terminal() {
            transcript
                .apply(&mut session, &SessionCommand::Undo)
                .expect("undo");
            transcript
                .apply(&mut session, &SessionCommand::Step)
                .expect("step");
            commands += 2;
        }
    }

    println!("strategy={}", policy.strategy);
    println!("agenda={}", policy.agenda.as_str());
    println!("obstacles={}", session.grid().obstacles().len());
    println!(
        "grid_digest={}",
        session.grid().layout_digest().expect("grid digest").as_str()
    );
    println!("initial_digest={}", initial_digest.as_str());
    println!("status={}", session.status().as_str());
    println!("steps_taken={}", session.steps_taken());
    println!("path_cost={}", path_cost(session.final_path()));
    println!("path={}", render_path(session.final_path()));
    println!(
        "final_digest={}",
        session.state_digest().expect("final digest").as_str()
    );
    println!("transcript_entries={}", transcript.entry_count());
    println!(
        "transcript_digest={}",
        transcript.digest().expect("transcript digest").as_str()
    );
}
