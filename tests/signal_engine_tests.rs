//! Behavior checks for the churn-signal engine through the public API.

use chrono::{TimeZone, Utc};
use churnscope::{
    aggregate, classify, compute_ratio, similarity, Finding, RecommendationTable,
    RefactoringRatio, Revision, SignalBand,
};

fn rev_at(position: usize, hour: i64, content: Option<&str>) -> Revision {
    Revision::new(
        position,
        format!("c{position}"),
        Utc.timestamp_opt(hour * 3600, 0).unwrap(),
        content.map(String::from),
    )
}

fn finding(path: &str, line: Option<u32>, code: &str, message: &str) -> Finding {
    Finding {
        path: path.to_string(),
        line,
        code: code.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn similarity_is_one_for_identical_input() {
    let samples = [
        "x",
        "def main():\n    pass\n",
        "many words spread over one line",
    ];
    for sample in samples {
        assert_eq!(similarity(sample, sample), 1.0, "input: {sample:?}");
    }
}

#[test]
fn similarity_is_symmetric() {
    let pairs = [
        ("a b c", "a c"),
        ("import os\nimport sys", "import sys"),
        ("", "nonempty"),
    ];
    for (a, b) in pairs {
        assert_eq!(similarity(a, b), similarity(b, a), "pair: {a:?} / {b:?}");
    }
}

#[test]
fn similarity_handles_empty_inputs_without_division_errors() {
    assert_eq!(similarity("", ""), 1.0);
    assert_eq!(similarity("", "nonempty"), 0.0);
}

#[test]
fn zero_samples_always_classify_unknown() {
    for stray in [None, Some(0.0), Some(0.3), Some(42.0)] {
        let ratio = RefactoringRatio {
            samples: 0,
            value: stray,
        };
        assert_eq!(classify(&ratio), SignalBand::Unknown, "stray: {stray:?}");
    }
}

#[test]
fn unchanged_content_over_an_hour_is_band_none() {
    let revisions = vec![rev_at(0, 1, Some("A A A")), rev_at(1, 0, Some("A A A"))];

    let ratio = compute_ratio(&revisions);
    assert_eq!(ratio.value, Some(0.0));
    assert_eq!(classify(&ratio), SignalBand::None);
}

#[test]
fn full_rewrite_over_ten_hours_is_band_high() {
    let revisions = vec![
        rev_at(0, 10, Some("A B C D")),
        rev_at(1, 0, Some("W X Y Z")),
    ];

    let ratio = compute_ratio(&revisions);
    assert_eq!(ratio.value, Some(10.0));
    assert_eq!(classify(&ratio), SignalBand::High);
}

#[test]
fn band_boundaries_are_inclusive_to_moderate() {
    assert_eq!(
        classify(&RefactoringRatio::measured(1, 0.1)),
        SignalBand::Moderate
    );
    assert_eq!(
        classify(&RefactoringRatio::measured(1, 0.5)),
        SignalBand::Moderate
    );
    assert_eq!(
        classify(&RefactoringRatio::measured(1, 0.09)),
        SignalBand::Low
    );
    assert_eq!(
        classify(&RefactoringRatio::measured(1, 0.51)),
        SignalBand::High
    );
}

#[test]
fn aggregation_groups_and_deduplicates_by_code() {
    let findings = vec![
        finding("f.py", Some(3), "C0103", "bad name"),
        finding("f.py", Some(3), "C0103", "bad name"),
        finding("f.py", Some(9), "W0611", "unused import"),
    ];

    let groups = aggregate(&findings, &RecommendationTable::default());

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].code, "C0103");
    assert_eq!(groups[0].locations.len(), 2);
    assert_eq!(groups[1].code, "W0611");
    assert_eq!(groups[1].locations.len(), 1);
    assert_ne!(groups[0].recommendation, groups[1].recommendation);
}

#[test]
fn malformed_lines_never_reach_aggregation() {
    let output = churnscope::parse_lint_output("this line has no separators at all\n");
    assert!(output.findings.is_empty());
    assert_eq!(output.dropped, 1);

    let groups = aggregate(&output.findings, &RecommendationTable::default());
    assert!(groups.is_empty());
}

#[test]
fn reordered_findings_keep_membership_and_counts() {
    let forward = vec![
        finding("f.py", Some(3), "C0103", "bad name"),
        finding("g.py", Some(1), "W0611", "unused import"),
        finding("f.py", Some(8), "C0103", "bad name"),
        finding("g.py", Some(2), "W0611", "unused import"),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    let table = RecommendationTable::default();
    let count_by_code = |findings: &[Finding]| {
        let mut pairs: Vec<(String, usize)> = aggregate(findings, &table)
            .into_iter()
            .map(|g| (g.code, g.locations.len()))
            .collect();
        pairs.sort();
        pairs
    };

    assert_eq!(count_by_code(&forward), count_by_code(&reversed));
}

#[test]
fn unavailable_content_in_every_transition_is_insufficient() {
    let revisions = vec![
        rev_at(0, 2, Some("A")),
        rev_at(1, 1, None),
        rev_at(2, 0, Some("B")),
    ];

    let ratio = compute_ratio(&revisions);
    assert_eq!(ratio, RefactoringRatio::insufficient());
    assert_eq!(classify(&ratio), SignalBand::Unknown);
}
