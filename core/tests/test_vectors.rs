//! Verify progress arithmetic and outcome classification against the JSON
//! test vectors stored in `test-vectors/`.
//!
//! Each vector file lists named cases with inputs and the expected result,
//! so other front ends of the same page can be checked against one source.

use httpdrop_core::{percent, FormSubmitter, HttpResponse, ProgressTracker, SubmissionOutcome};

fn submitter() -> FormSubmitter {
    FormSubmitter::new("http://localhost:3000").unwrap()
}

fn load(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[test]
fn progress_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/progress.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let loaded = case["loaded"].as_u64().unwrap();
        let total = case["total"].as_u64().unwrap();
        let expected = case["expected"].as_u64().map(|v| v as u8);
        assert_eq!(percent(loaded, total), expected, "{name}");
    }
}

#[test]
fn progress_sequence_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/progress.json"));

    for seq in vectors["sequences"].as_array().unwrap() {
        let name = seq["name"].as_str().unwrap();
        let mut tracker = ProgressTracker::new();
        let emitted: Vec<u8> = seq["events"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|ev| {
                let loaded = ev[0].as_u64().unwrap();
                let total = ev[1].as_u64().unwrap();
                tracker.observe(loaded, total)
            })
            .collect();
        let expected: Vec<u8> = seq["expected"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_u64().unwrap() as u8)
            .collect();
        assert_eq!(emitted, expected, "{name}");
        assert!(emitted.windows(2).all(|w| w[0] < w[1]), "{name}: not increasing");
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[test]
fn outcome_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/outcome.json"));

    let s = submitter();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let expected = &case["expected"];
        let want = if let Some(body) = expected.get("success") {
            SubmissionOutcome::Success(body.as_str().unwrap().to_string())
        } else {
            SubmissionOutcome::HttpFailure(expected["http_failure"].as_u64().unwrap() as u16)
        };
        assert_eq!(
            s.parse_response("http://localhost:3000/upload", response),
            want,
            "{name}"
        );
    }
}
