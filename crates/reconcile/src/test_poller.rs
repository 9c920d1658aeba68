use std::time::Duration;

use dso_admin_common::prelude::*;

use crate::{test_support::ScriptedLocator, PollerConfig, StatePoller};

fn config() -> PollerConfig {
    PollerConfig::default().with_interval(Duration::ZERO)
}

fn run(locator: &ScriptedLocator, config: PollerConfig) -> (PollOutcome, PollerState) {
    let mut poller = StatePoller::new(locator, config);
    let outcome = poller.run();
    (outcome, poller.state())
}

#[test]
fn test_disconnect_after_stopping_is_success() {
    let locator = ScriptedLocator::single()
        .states(&["STARTED", "STOPPING", "STOPPING"])
        .then_err(RemoteError::connection("socket closed"));

    let (outcome, state) = run(&locator, config());
    assert_eq!(outcome, PollOutcome::Terminal("STOPPED".to_string()));
    assert_eq!(state, PollerState::Stopped);
    assert_eq!(locator.reads(), 4);
}

#[test]
fn test_disconnect_without_stopping_is_lost() {
    let locator = ScriptedLocator::single()
        .states(&["STARTED", "STARTED"])
        .then_err(RemoteError::connection("socket closed"));

    let (outcome, state) = run(&locator, config());
    assert_eq!(outcome, PollOutcome::ConnectionLost);
    assert_eq!(state, PollerState::ConnectionLost);
}

#[test]
fn test_stopped_ends_poll_immediately() {
    let locator = ScriptedLocator::single().states(&["STARTED", "STOPPED", "STARTED"]);

    let (outcome, state) = run(&locator, config());
    assert_eq!(outcome, PollOutcome::Terminal("STOPPED".to_string()));
    assert_eq!(state, PollerState::Stopped);
    assert_eq!(locator.reads(), 2);
    assert_eq!(locator.remaining(), 1);
}

#[test]
fn test_stopping_is_remembered_across_other_values() {
    let locator = ScriptedLocator::single()
        .states(&["STOPPING", "UNKNOWN"])
        .then_err(RemoteError::connection("reset"));

    let (outcome, _) = run(&locator, config());
    assert_eq!(outcome, PollOutcome::Terminal("STOPPED".to_string()));
}

#[test]
fn test_ambiguous_target_is_never_polled() {
    for instances in [&[][..], &["server1", "server2"][..]] {
        let locator = ScriptedLocator::new(instances).states(&["STOPPED"]);

        let (outcome, state) = run(&locator, config());
        let PollOutcome::Error(e) = outcome else {
            panic!("expected an error, got {outcome:?}");
        };
        assert_eq!(e.reason(), "unexpected-instance-count");
        assert_eq!(
            e,
            PollError::AmbiguousTarget {
                query: "type=Server,*".to_string(),
                count: instances.len(),
            }
        );
        assert_eq!(state, PollerState::Connecting);
        assert_eq!(locator.discoveries(), 1);
        assert_eq!(locator.reads(), 0);
    }
}

#[test]
fn test_discovery_failure() {
    let locator = ScriptedLocator::single().fail_discovery(RemoteError::connection("refused"));

    let (outcome, _) = run(&locator, config());
    assert!(matches!(
        outcome,
        PollOutcome::Error(PollError::DiscoveryError { .. })
    ));
    assert_eq!(locator.reads(), 0);
}

#[test]
fn test_non_connection_read_error() {
    let locator = ScriptedLocator::single()
        .states(&["STOPPING"])
        .then_err(RemoteError::other("attribute not found"));

    let (outcome, state) = run(&locator, config());
    assert_eq!(
        outcome,
        PollOutcome::Error(PollError::ReadError(RemoteError::other(
            "attribute not found"
        )))
    );
    assert_eq!(state, PollerState::Stopping);
}

#[test]
fn test_disconnect_retry_recovers() {
    let locator = ScriptedLocator::single()
        .states(&["STOPPING"])
        .then_err(RemoteError::connection("blip"))
        .states(&["STOPPING", "STOPPED"]);

    let mut config = config();
    config.disconnect_retries = 1;

    let (outcome, _) = run(&locator, config);
    assert_eq!(outcome, PollOutcome::Terminal("STOPPED".to_string()));
    assert_eq!(locator.reads(), 4);
}

#[test]
fn test_disconnect_retry_exhausted() {
    let locator = ScriptedLocator::single()
        .states(&["STOPPING"])
        .then_err(RemoteError::connection("gone"))
        .then_err(RemoteError::connection("gone"));

    let mut config = config();
    config.disconnect_retries = 1;

    let (outcome, _) = run(&locator, config);
    assert_eq!(outcome, PollOutcome::Terminal("STOPPED".to_string()));
    assert_eq!(locator.reads(), 3);
}

#[test]
fn test_max_wait() {
    let locator = ScriptedLocator::single().states(&["STARTED"]);

    let config = config().with_max_wait(Some(Duration::ZERO));
    let (outcome, state) = run(&locator, config);
    assert_eq!(outcome, PollOutcome::TimedOut);
    assert_eq!(state, PollerState::Connected);
    assert_eq!(locator.reads(), 1);
}

#[test]
fn test_cancelled_before_start() {
    let locator = ScriptedLocator::single().states(&["STOPPED"]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut poller = StatePoller::new(&locator, config()).with_cancel(cancel);
    assert_eq!(poller.run(), PollOutcome::Cancelled);
    assert_eq!(locator.discoveries(), 0);
    assert_eq!(locator.reads(), 0);
}

#[test]
fn test_cancel_interrupts_sleep() {
    let cancel = CancelToken::new();
    let remote = cancel.clone();

    let handle = std::thread::spawn(move || {
        let locator = ScriptedLocator::single().states(&["STARTED"]);
        let config = PollerConfig::default().with_interval(Duration::from_secs(600));
        let mut poller = StatePoller::new(&locator, config).with_cancel(remote);
        poller.run()
    });

    std::thread::sleep(Duration::from_millis(20));
    cancel.cancel();

    assert_eq!(handle.join().unwrap(), PollOutcome::Cancelled);
}

#[test]
fn test_huge_interval_still_cancels() {
    let cancel = CancelToken::new();
    let remote = cancel.clone();

    let handle = std::thread::spawn(move || {
        let locator = ScriptedLocator::single().states(&["STARTED"]);
        let config = PollerConfig::default().with_interval(Duration::from_secs(u64::MAX));
        let mut poller = StatePoller::new(&locator, config).with_cancel(remote);
        poller.run()
    });

    std::thread::sleep(Duration::from_millis(50));
    cancel.cancel();

    assert_eq!(handle.join().unwrap(), PollOutcome::Cancelled);
}

#[test]
fn test_custom_tokens() {
    let locator = ScriptedLocator::single().states(&["running", "draining", "halted"]);

    let config = PollerConfig {
        terminal: "halted".to_string(),
        intermediate: "draining".to_string(),
        ..config()
    };
    let mut poller = StatePoller::new(&locator, config);
    assert_eq!(poller.run(), PollOutcome::Terminal("halted".to_string()));
    assert_eq!(
        poller.target(),
        Some(&ObjectRef::from(
            "WebSphere:type=Server,node=node01,process=server1"
        ))
    );
}
