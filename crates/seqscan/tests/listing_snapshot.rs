mod common;

use insta::assert_snapshot;
use seqscan::group;

#[test]
fn default_renders() {
    let sequences = group(common::fixture_names()).expect("fixture groups");
    let rendered = sequences
        .iter()
        .map(|sequence| sequence.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!("default_renders", rendered);
}
