use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use post_score::{
    analyze_flow, score_post, score_thread, Grade, MediaType, PostInput, Priority,
    ThreadScoreBreakdown, ThreadScoreResult, EMPTY_THREAD_WARNING,
};

fn tuesday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 4)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

fn post(text: &str) -> PostInput {
    PostInput::new(text).at(tuesday_morning())
}

// Individual totals at Tuesday 09:30: 80, 65 and 15.
fn strong() -> PostInput {
    post("Stop scrolling. This will save you $10,000.")
}

fn plain() -> PostInput {
    post("Hi")
}

fn weak() -> PostInput {
    post("Hi").with_link(true)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn fixture_totals() {
    assert_eq!(score_post(&strong()).total, 80);
    assert_eq!(score_post(&plain()).total, 65);
    assert_eq!(score_post(&weak()).total, 15);
}

#[test]
fn empty_thread_is_terminal_state() {
    let expected = ThreadScoreResult::empty();
    assert_eq!(score_thread(&[]), expected);
    assert_eq!(score_thread(&[post("   "), post("")]), expected);

    assert_eq!(expected.total, 0.0);
    assert_eq!(expected.grade, Grade::Critical);
    assert_eq!(expected.warnings, vec![EMPTY_THREAD_WARNING.to_string()]);
    assert!(expected.individual_scores.is_empty());
    assert!(expected.suggestions.is_empty());
}

#[test]
fn two_post_thread() {
    let result = score_thread(&[strong(), plain()]);

    assert_eq!(
        result.breakdown,
        ThreadScoreBreakdown {
            average_individual: 72.5,
            flow_coherence: 15.0,
            pacing: 0.0,
            consistency: 10.0,
        }
    );
    assert!(close(result.total, 97.5));
    assert_eq!(result.grade, Grade::Excellent);
    assert_eq!(result.individual_scores.len(), 2);
    assert!(result.warnings.is_empty());

    let messages: Vec<&str> = result.suggestions.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Add a call-to-action in your final tweet (question, invite, etc.)"]
    );
}

#[test]
fn single_post_thread_warns_and_skips_advice() {
    let result = score_thread(&[strong()]);

    assert_eq!(result.individual_scores.len(), 1);
    assert!(close(result.breakdown.average_individual, 80.0));
    assert!(close(result.breakdown.flow_coherence, 15.0));
    assert!(close(result.breakdown.pacing, 0.0));
    assert!(close(result.breakdown.consistency, 10.0));
    assert!(close(result.total, 100.0));
    assert!(result.suggestions.is_empty());
    assert_eq!(result.warnings, vec!["Threads need at least 2 tweets".to_string()]);
}

#[test]
fn blank_posts_are_skipped_but_reported() {
    let with_blank = score_thread(&[strong(), post("  \n "), plain()]);
    let without = score_thread(&[strong(), plain()]);

    assert_eq!(with_blank.breakdown, without.breakdown);
    assert_eq!(with_blank.individual_scores, without.individual_scores);
    assert_eq!(
        with_blank.warnings,
        vec!["1 empty tweet(s) will be skipped".to_string()]
    );
}

#[test]
fn order_changes_positional_advice() {
    let forward = score_thread(&[strong(), plain()]);
    let reversed = score_thread(&[plain(), strong()]);

    assert!(close(forward.total, reversed.total));
    assert_eq!(reversed.individual_scores[0].total, 65);

    let messages: Vec<&str> = reversed.suggestions.iter().map(|s| s.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Strengthen your opening tweet with a compelling hook",
            "Add a call-to-action in your final tweet (question, invite, etc.)",
        ]
    );
}

#[test]
fn pacing_rewards_a_strong_finish() {
    let rising = score_thread(&[plain(), plain(), strong()]);
    assert!(close(rising.breakdown.average_individual, 70.0));
    assert!(close(rising.breakdown.pacing, 10.0));
    assert!(close(rising.total, 100.0));

    let falling = score_thread(&[strong(), plain(), plain()]);
    assert!(close(falling.breakdown.pacing, 0.0));
    assert!(close(falling.total, 95.0));
}

#[test]
fn front_loaded_uneven_thread() {
    let result = score_thread(&[strong(), plain(), weak()]);

    assert!(close(result.breakdown.pacing, -5.0));
    assert!(close(result.breakdown.flow_coherence, -5.0));
    assert!(close(result.breakdown.consistency, 0.0));
    assert!(close(result.total, 160.0 / 3.0 - 10.0));
    assert_eq!(result.grade, Grade::Poor);

    let first = &result.suggestions[0];
    assert_eq!(first.priority, Priority::Critical);
    assert_eq!(
        first.message,
        "1 tweet(s) have critical scores - revise before posting"
    );

    let messages: Vec<&str> = result.suggestions.iter().map(|s| s.message.as_str()).collect();
    assert!(messages.contains(&"Improve thread flow with consistent length and style"));
    assert!(messages.contains(&"Build momentum toward the end rather than front-loading quality"));
    assert!(messages.contains(&"Strengthen your closing tweet - it drives final engagement"));
}

fn messages(result: &ThreadScoreResult) -> Vec<&str> {
    result.suggestions.iter().map(|s| s.message.as_str()).collect()
}

#[test]
fn weak_middle_and_early_peak() {
    // totals 80, 15, 15, 65, 65
    let result = score_thread(&[strong(), weak(), weak(), plain(), plain()]);

    assert!(close(result.breakdown.flow_coherence, -5.0));
    assert!(close(result.breakdown.pacing, 0.0));
    assert!(close(result.breakdown.consistency, 0.0));
    assert_eq!(
        messages(&result),
        vec![
            "2 tweet(s) have critical scores - revise before posting",
            "Add a call-to-action in your final tweet (question, invite, etc.)",
            "2 middle tweet(s) are weak - maintain momentum",
            "Build momentum in middle tweets with questions or insights",
            "Consider building to a climax in the final third of your thread",
            "Improve thread flow with consistent length and style",
        ]
    );
    let priorities: Vec<Priority> = result.suggestions.iter().map(|s| s.priority).collect();
    assert_eq!(
        priorities,
        vec![
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Medium,
            Priority::Medium,
            Priority::Medium,
        ]
    );
}

#[test]
fn weak_opening_post() {
    // totals 15, 65
    let result = score_thread(&[weak(), plain()]);

    assert_eq!(
        messages(&result),
        vec![
            "1 tweet(s) have critical scores - revise before posting",
            "Strengthen your opening tweet with a compelling hook",
            "First tweet sets the tone - aim for 60+ score to hook readers",
            "Add a call-to-action in your final tweet (question, invite, etc.)",
            "Improve thread flow with consistent length and style",
        ]
    );
}

#[test]
fn uneven_quality_gets_low_priority_advice() {
    // totals 80, 15: standard deviation 32.5
    let result = score_thread(&[strong(), weak()]);

    assert!(close(result.breakdown.consistency, -5.0));
    assert!(close(result.total, 37.5));
    assert_eq!(result.grade, Grade::Critical);

    let last = result.suggestions.last().expect("suggestions present");
    assert_eq!(last.priority, Priority::Low);
    assert_eq!(
        messages(&result),
        vec![
            "1 tweet(s) have critical scores - revise before posting",
            "Add a call-to-action in your final tweet (question, invite, etc.)",
            "Strengthen your closing tweet - it drives final engagement",
            "Improve thread flow with consistent length and style",
            "Balance tweet quality - avoid big gaps between strong and weak tweets",
        ]
    );
}

#[test]
fn trailing_blank_posts_do_not_count_toward_length() {
    let posts = vec![plain(), plain(), post("   ")];
    let result = score_thread(&posts);
    assert_eq!(result.individual_scores.len(), 2);
    assert_eq!(result.warnings, vec!["1 empty tweet(s) will be skipped".to_string()]);
}

#[test]
fn long_threads_are_flagged() {
    let posts: Vec<PostInput> = (0..26).map(|_| plain()).collect();
    let result = score_thread(&posts);
    assert_eq!(
        result.warnings,
        vec!["Threads over 25 tweets may lose reader attention".to_string()]
    );
}

#[test]
fn template_flow_is_independent_of_thread_score() {
    let texts = ["Why do builds get slow?", "Caches go stale over time.", "Seen this too?"];
    let posts: Vec<PostInput> = texts
        .iter()
        .map(|text| post(text).with_media(MediaType::Image))
        .collect();

    let before = score_thread(&posts);
    assert_eq!(analyze_flow(&texts), 7);
    assert_eq!(score_thread(&posts), before);
}

fn thread_strategy() -> impl Strategy<Value = Vec<PostInput>> {
    prop::collection::vec("[a-zA-Z0-9 ?!#.]{0,200}", 0..12)
        .prop_map(|texts| texts.iter().map(|text| post(text)).collect())
}

proptest! {
    #[test]
    fn thread_total_stays_within_bounds(posts in thread_strategy()) {
        let result = score_thread(&posts);
        prop_assert!((0.0..=100.0).contains(&result.total));
        prop_assert_eq!(result.grade, Grade::from_score(result.total));
        for score in &result.individual_scores {
            prop_assert!((0..=100).contains(&score.total));
        }
    }

    #[test]
    fn thread_scoring_is_deterministic(posts in thread_strategy()) {
        prop_assert_eq!(score_thread(&posts), score_thread(&posts));
    }

    #[test]
    fn thread_suggestions_are_sorted(posts in thread_strategy()) {
        let result = score_thread(&posts);
        let priorities: Vec<Priority> = result.suggestions.iter().map(|s| s.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        prop_assert_eq!(priorities, sorted);
    }
}
