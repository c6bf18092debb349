//! AND/OR aggregation over real path conditions

use std::fs;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wfor::conditions::{Condition, PathCondition};
use wfor::config::{Policy, RunConfig};
use wfor::{Aggregator, Verdict};

fn present_and_missing(temp: &TempDir) -> Vec<Condition> {
    vec![
        PathCondition::new(temp.path()).into(),
        PathCondition::new(temp.path().join("never-created")).into(),
    ]
}

#[test]
fn test_and_fails_within_timeout_when_one_never_holds() {
    let temp = TempDir::new().unwrap();
    let config = RunConfig::new(
        Duration::from_secs(1),
        Duration::from_secs(2),
        Policy::And,
    )
    .unwrap();

    let started = Instant::now();
    let verdict = Aggregator::run(present_and_missing(&temp), &config);
    let elapsed = started.elapsed();

    assert_eq!(verdict, Verdict::Failed);
    assert!(elapsed >= Duration::from_secs(2), "failed early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
}

#[test]
fn test_or_succeeds_as_soon_as_one_holds() {
    let temp = TempDir::new().unwrap();
    let config = RunConfig::new(
        Duration::from_secs(1),
        Duration::from_secs(10),
        Policy::Or,
    )
    .unwrap();

    let started = Instant::now();
    let verdict = Aggregator::run(present_and_missing(&temp), &config);

    assert_eq!(verdict, Verdict::Succeeded);
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[test]
fn test_and_waits_for_late_condition() {
    let temp = TempDir::new().unwrap();
    let late = temp.path().join("late");
    let conditions: Vec<Condition> = vec![
        PathCondition::new(temp.path()).into(),
        PathCondition::new(&late).into(),
    ];

    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(120));
        fs::write(late, "").unwrap();
    });

    let config = RunConfig {
        interval: Duration::from_millis(50),
        timeout: Duration::from_millis(1000),
        policy: Policy::And,
    };
    assert_eq!(Aggregator::run(conditions, &config), Verdict::Succeeded);
    writer.join().unwrap();
}

#[test]
fn test_or_fails_when_every_condition_times_out() {
    let temp = TempDir::new().unwrap();
    let conditions: Vec<Condition> = vec![
        PathCondition::new(temp.path().join("a")).into(),
        PathCondition::new(temp.path().join("b")).into(),
    ];
    let config = RunConfig {
        interval: Duration::from_millis(50),
        timeout: Duration::from_millis(150),
        policy: Policy::Or,
    };

    assert_eq!(Aggregator::run(conditions, &config), Verdict::Failed);
}
