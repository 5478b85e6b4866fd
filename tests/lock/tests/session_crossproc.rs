//! Cross-process determinism: spawns `session_fixture` under several
//! environment variants and asserts identical stdout. Session results must
//! not depend on cwd, locale, or unrelated env vars.

use std::path::Path;
use std::process::Command;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

/// Run the fixture with `args` from `work_dir`. Returns stdout.
fn run_variant(args: &[&str], work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_session_fixture");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (args={args:?}, work_dir={work_dir}): {e}")
    });
    assert!(
        output.status.success(),
        "session_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn field<'a>(output: &'a str, key: &str) -> &'a str {
    output
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
        .unwrap_or_else(|| panic!("missing {key} in output:\n{output}"))
}

fn assert_stable(args: &[&str]) -> String {
    let root = workspace_root();
    let baseline = run_variant(args, &root, &[]);

    let alt_cwd = if cfg!(target_os = "windows") { "C:\\" } else { "/tmp" };
    assert_eq!(baseline, run_variant(args, alt_cwd, &[]), "cwd changed output");
    assert_eq!(
        baseline,
        run_variant(args, &root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "locale changed output"
    );
    assert_eq!(
        baseline,
        run_variant(
            args,
            &root,
            &[
                ("GRIDSTEP_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("RUST_LOG", "trace"),
            ],
        ),
        "spurious env vars changed output"
    );
    baseline
}

#[test]
fn every_strategy_is_stable_across_processes() {
    for strategy in ["astar", "bidirectional", "forward_chaining"] {
        let output = assert_stable(&[strategy]);
        assert_eq!(field(&output, "strategy"), strategy);
        assert_eq!(field(&output, "status"), "found");
        assert_eq!(field(&output, "path_cost"), "9");
        assert!(field(&output, "final_digest").starts_with("sha256:"));
        assert!(field(&output, "transcript_digest").starts_with("sha256:"));
    }
}

#[test]
fn seeded_maze_is_stable_across_processes() {
    let output = assert_stable(&["astar", "saturating", "17"]);
    assert_eq!(field(&output, "obstacles"), "8");
    assert_eq!(field(&output, "status"), "found");
}

#[test]
fn single_firing_is_stable_across_processes() {
    let output = assert_stable(&["forward_chaining", "single_firing"]);
    assert_eq!(field(&output, "agenda"), "single_firing");
    assert_eq!(field(&output, "path_cost"), "19");
}

#[test]
fn strategies_share_the_same_initial_grid() {
    let astar = run_variant(&["astar"], &workspace_root(), &[]);
    let fc = run_variant(&["forward_chaining"], &workspace_root(), &[]);
    assert_eq!(field(&astar, "grid_digest"), field(&fc, "grid_digest"));
    assert_ne!(field(&astar, "initial_digest"), field(&fc, "initial_digest"));
}
