//! Integration tests for the match scorer.
//!
//! These tests use sample data fixtures to verify scoring end-to-end, from
//! untyped JSON or validated records through to the scored table.

use matcher::{compute_base_match, MatchScorer, ScoreSummary, Table, BASE_SCORE};
use profile_types::{fixtures, AttributeMap, AttributeSource, Content, Cultural};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::fs;

/// Load a JSON fixture file.
fn load_fixture(name: &str) -> Value {
    let content = fs::read_to_string(format!("tests/fixtures/{}", name))
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e));
    serde_json::from_str(&content).expect("Failed to parse fixture")
}

fn scores(table: &Table, column: &str) -> Vec<f64> {
    table
        .scores(column)
        .unwrap_or_else(|| panic!("missing score column {}", column))
        .to_vec()
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

/// Test the full pipeline over the mixed-quality fixture table.
#[test]
fn test_fixture_table_full_content() {
    let out = MatchScorer::new()
        .score_json(&load_fixture("agents_table.json"), &load_fixture("content_full.json"))
        .unwrap();

    assert_eq!(out.num_rows(), 5);
    let base = scores(&out, BASE_SCORE);

    assert!(approx(base[0], 1.0 - 11.2 / 6.0), "agent_01: {}", base[0]);
    assert!(approx(base[1], 1.0 - 17.3 / 6.0), "agent_02: {}", base[1]);
    assert_eq!(base[2], -4.75, "agent_03 uses four available diffs");
    assert!(approx(base[3], -5.2), "agent_04: {}", base[3]);
    assert!(base[4].is_nan(), "agent_05 has nothing to compare");

    let cultural = scores(&out, "diff_cultural");
    assert_eq!(cultural[0], 0.0);
    assert_eq!(cultural[1], 1.0);
    assert_eq!(cultural[2], 0.0, "labels compare case- and space-insensitively");
    assert!(cultural[3].is_nan());

    let tier = scores(&out, "diff_tiered_income");
    assert_eq!(tier[1], 2.0, "numeric strings are coerced");
    assert!(tier[2].is_nan());
}

/// Passthrough columns survive, row order is preserved.
#[test]
fn test_fixture_table_passthrough_and_order() {
    let agents = load_fixture("agents_table.json");
    let out = MatchScorer::new()
        .score_json(&agents, &load_fixture("content_full.json"))
        .unwrap();

    let ids: Vec<Value> = out.values("agent_id").unwrap().to_vec();
    assert_eq!(
        ids,
        vec![
            json!("agent_01"),
            json!("agent_02"),
            json!("agent_03"),
            json!("agent_04"),
            json!("agent_05")
        ]
    );
    assert_eq!(out.values("segment").unwrap()[2], json!("rural"));
    assert_eq!(out.values("segment").unwrap()[3], Value::Null);

    let records = out.to_records();
    assert_eq!(records[4]["base_score"], Value::Null);
    assert_eq!(records[0]["diff_age"], json!(10.0));
}

/// Missing content attribute shrinks the mean instead of zero-filling.
#[test]
fn test_partial_content_uses_remaining_diffs() {
    let out = MatchScorer::new()
        .score_json(
            &load_fixture("agents_table.json"),
            &load_fixture("content_no_politics.json"),
        )
        .unwrap();

    assert!(scores(&out, "diff_politics").iter().all(|d| d.is_nan()));
    let base = scores(&out, BASE_SCORE);
    assert!(approx(base[0], 1.0 - 11.2 / 5.0), "agent_01: {}", base[0]);
}

/// Empty content leaves every computed column undefined.
#[test]
fn test_empty_content_everything_undefined() {
    let out = MatchScorer::new()
        .score_json(&load_fixture("agents_table.json"), &json!({}))
        .unwrap();

    for name in matcher::output_column_names() {
        assert!(
            scores(&out, &name).iter().all(|d| d.is_nan()),
            "{} should be undefined",
            name
        );
    }
    let summary = ScoreSummary::from_table(&out);
    assert_eq!(summary.scored_rows, 0);
}

/// Validated records score directly, with an externally supplied tier.
#[test]
fn test_score_validated_records() {
    let agents = fixtures::sample_agents();
    let records: Vec<AttributeMap> = agents
        .iter()
        .map(|agent| {
            let tier = (agent.economic_status() / 100_000.0).floor() + 1.0;
            agent.to_attributes().with("tiered_income", tier)
        })
        .collect();
    let table = Table::from_records(&records);
    let content = fixtures::sample_content();

    let out = compute_base_match(&table, &content);
    assert_eq!(out.num_rows(), agents.len());

    // sample content has no tiered_income
    assert!(scores(&out, "diff_tiered_income").iter().all(|d| d.is_nan()));

    let cultural = scores(&out, "diff_cultural");
    for (agent, diff) in agents.iter().zip(&cultural) {
        let expected = if agent.cultural() == Cultural::Western { 0.0 } else { 1.0 };
        assert_eq!(*diff, expected, "{}", agent);
    }

    let mira = fixtures::get_agent("agent_01").unwrap();
    let age = scores(&out, "diff_age")[0];
    assert_eq!(age, (f64::from(mira.age()) - 40.0).abs());
}

/// Agent-only tables have no tier column, so that diff is undefined.
#[test]
fn test_from_agents_without_tier() {
    let table = Table::from_agents(&fixtures::sample_agents());
    let content = Content::builder()
        .with_cultural(Cultural::Eastern)
        .build()
        .unwrap();

    let out = compute_base_match(&table, &content);
    assert!(scores(&out, "diff_tiered_income").iter().all(|d| d.is_nan()));
    // only cultural is available, so base_score is 1 - diff_cultural
    for (c, b) in scores(&out, "diff_cultural").iter().zip(scores(&out, BASE_SCORE)) {
        assert_eq!(b, 1.0 - c);
    }
}

fn random_table(rng: &mut SmallRng, rows: usize) -> Table {
    let labels = ["western", "Eastern", " african", "INDIGENOUS", "multicultural"];
    let records: Vec<Value> = (0..rows)
        .map(|i| {
            let mut record = json!({
                "row": i,
                "tiered_income": rng.gen_range(1..=5),
                "ethics": rng.gen_range(0.0..=1.0),
                "politics": rng.gen_range(-2..=2),
                "cultural": labels[rng.gen_range(0..labels.len())],
                "age": rng.gen_range(5..=90),
                "sex": rng.gen_range(0..=2),
            });
            // knock out a random attribute now and then
            if rng.gen_bool(0.3) {
                let key = ["ethics", "politics", "cultural", "age", "sex"][rng.gen_range(0..5)];
                record[key] = Value::Null;
            }
            record
        })
        .collect();
    Table::from_json(&Value::Array(records)).unwrap()
}

/// Scoring twice gives identical tables; row i stays row i.
#[test]
fn test_idempotent_and_order_preserving() {
    let mut rng = SmallRng::seed_from_u64(42);
    let content = AttributeMap::new()
        .with("tiered_income", 3)
        .with("ethics", 0.5)
        .with("politics", 0)
        .with("cultural", "western")
        .with("age", 35)
        .with("sex", 1);

    for _ in 0..20 {
        let rows = rng.gen_range(0..50);
        let table = random_table(&mut rng, rows);

        let first = compute_base_match(&table, &content);
        let second = compute_base_match(&table, &content);
        assert_eq!(first, second);

        let row_ids: Vec<Value> = first.values("row").unwrap_or(&[]).to_vec();
        let expected: Vec<Value> = (0..rows).map(|i| json!(i)).collect();
        assert_eq!(row_ids, expected);
    }
}

/// Scoring a single-row slice gives the same answer as the row in the full
/// table.
#[test]
fn test_rows_scored_independently() {
    let mut rng = SmallRng::seed_from_u64(7);
    let table = random_table(&mut rng, 25);
    let content = AttributeMap::new()
        .with("tiered_income", 2)
        .with("ethics", 0.25)
        .with("cultural", "eastern")
        .with("age", 60);

    let full = compute_base_match(&table, &content);
    let full_scores = scores(&full, BASE_SCORE);

    for (i, record) in table.to_records().into_iter().enumerate() {
        let single = Table::from_json(&json!([record])).unwrap();
        let score = scores(&compute_base_match(&single, &content), BASE_SCORE)[0];
        assert!(
            score == full_scores[i] || (score.is_nan() && full_scores[i].is_nan()),
            "row {}",
            i
        );
    }
}
