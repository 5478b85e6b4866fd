//! Transcript lock: the canonical transcript bytes parse back as JSON, carry
//! the state digest of every recorded command, and re-canonicalize to the
//! same bytes.

use gridstep_harness::session::SearchSession;
use gridstep_harness::transcript::{SessionCommand, SessionTranscriptV1, SCHEMA_VERSION};
use gridstep_kernel::proof::canon::canonical_json_bytes;
use gridstep_search::contract::StrategyKind;
use gridstep_search::policy::SearchPolicyV1;

fn scripted(kind: StrategyKind) -> (SearchSession, SessionTranscriptV1, Vec<String>) {
    let mut session = SearchSession::with_defaults(SearchPolicyV1::new(kind)).unwrap();
    let mut transcript = SessionTranscriptV1::begin(&session).unwrap();
    let mut digests = Vec::new();
    let mut step = 0usize;
    while !session.status().is_terminal() && step < 1_000 {
        step += 1;
        let command = if step % 5 == 0 {
            SessionCommand::Undo
        } else {
            SessionCommand::Step
        };
        transcript.apply(&mut session, &command).unwrap();
        digests.push(session.state_digest().unwrap().as_str().to_string());
    }
    (session, transcript, digests)
}

#[test]
fn canonical_transcript_parses_and_matches_session() {
    for kind in StrategyKind::ALL {
        let (session, transcript, digests) = scripted(kind);
        let bytes = transcript.to_canonical_bytes().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(parsed["schema_version"], SCHEMA_VERSION, "{kind}");
        assert_eq!(parsed["entry_count"], transcript.entry_count(), "{kind}");
        assert_eq!(
            parsed["final_digest"],
            transcript.final_digest().as_str(),
            "{kind}"
        );

        let entries = parsed["entries"].as_array().unwrap();
        assert_eq!(entries.len(), digests.len(), "{kind}");
        for (index, (entry, digest)) in entries.iter().zip(&digests).enumerate() {
            assert_eq!(entry["index"], index, "{kind}");
            assert_eq!(entry["state_digest"], digest.as_str(), "{kind}");
        }

        let final_path: Vec<serde_json::Value> =
            session.final_path().iter().map(|p| p.to_json_value()).collect();
        assert_eq!(parsed["final"]["found"], true, "{kind}");
        assert_eq!(parsed["final"]["final_path"], serde_json::Value::Array(final_path), "{kind}");
        assert_eq!(parsed["final"]["status"], session.status().as_str(), "{kind}");
    }
}

#[test]
fn parsed_transcript_recanonicalizes_to_same_bytes() {
    for kind in StrategyKind::ALL {
        let (_, transcript, _) = scripted(kind);
        let bytes = transcript.to_canonical_bytes().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(canonical_json_bytes(&parsed).unwrap(), bytes, "{kind}");
    }
}

#[test]
fn undo_entries_repeat_an_earlier_digest() {
    let (_, transcript, _) = scripted(StrategyKind::AStar);
    let parsed: serde_json::Value =
        serde_json::from_slice(&transcript.to_canonical_bytes().unwrap()).unwrap();
    let entries = parsed["entries"].as_array().unwrap();
    // Entry 4 undoes the step recorded at entry 3, landing on entry 2's state.
    assert_eq!(entries[4]["command"], "undo");
    assert_eq!(entries[4]["state_digest"], entries[2]["state_digest"]);
}
