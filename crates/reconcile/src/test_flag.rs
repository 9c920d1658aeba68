use dso_admin_common::prelude::*;

use crate::{test_support::MockArgs, FlagReconciler};

fn tokens(tokens: &[&str]) -> RequiredTokens {
    RequiredTokens::new(tokens.iter().copied()).unwrap()
}

fn reconciler<'a>(host: &'a MockArgs, required: &[&str]) -> FlagReconciler<&'a MockArgs> {
    FlagReconciler::new(
        host,
        tokens(required),
        RemoteEndpoint::new("cell01", "node01", "server1"),
    )
}

#[test]
fn test_enable_appends_missing_tokens() {
    let host = MockArgs::new(&["-Xmx512m"]);
    let flags = reconciler(&host, &["-Xshareclasses:none"]);

    assert_eq!(flags.enable(), ReconcileResult::Enabled);
    assert_eq!(host.args(), ["-Xmx512m", "-Xshareclasses:none"]);
    assert_eq!(host.reads(), 1);
    assert_eq!(host.writes(), 1);
}

#[test]
fn test_enable_when_enabled_never_writes() {
    let host = MockArgs::new(&["-Dfoo=bar", "-Xmx512m", "-Xshareclasses:none"]);
    let flags = reconciler(&host, &["-Xshareclasses:none", "-Dfoo=bar"]);

    assert_eq!(flags.enable(), ReconcileResult::NoOpAlreadyEnabled);
    assert_eq!(host.writes(), 0);
    assert_eq!(host.reads(), 1);
}

#[test]
fn test_partial_presence_is_disabled() {
    let host = MockArgs::new(&["-Dfoo=bar"]);
    let flags = reconciler(&host, &["-Xshareclasses:none", "-Dfoo=bar"]);

    assert_eq!(flags.is_enabled(), Ok(false));
    assert_eq!(flags.disable(), ReconcileResult::NoOpAlreadyDisabled);
    assert_eq!(flags.is_enabled(), Ok(false));
    assert_eq!(host.args(), ["-Dfoo=bar"]);
    assert_eq!(host.writes(), 0);
}

#[test]
fn test_enable_completes_partial_presence() {
    let host = MockArgs::new(&["-Dfoo=bar", "-Xmx512m"]);
    let flags = reconciler(&host, &["-Xshareclasses:none", "-Dfoo=bar"]);

    assert_eq!(flags.enable(), ReconcileResult::Enabled);
    assert_eq!(host.args(), ["-Dfoo=bar", "-Xmx512m", "-Xshareclasses:none"]);
}

#[test]
fn test_disable_preserves_remaining_order() {
    let host = MockArgs::new(&["-a", "-Dtc.config=x", "-b", "-Dtc.install-root=/opt", "-c"]);
    let flags = reconciler(&host, &["-Dtc.install-root=/opt", "-Dtc.config=x"]);

    assert_eq!(flags.disable(), ReconcileResult::Disabled);
    assert_eq!(host.args(), ["-a", "-b", "-c"]);
    assert_eq!(host.reads(), 1);
    assert_eq!(host.writes(), 1);
}

#[test]
fn test_disable_when_disabled_never_writes() {
    let host = MockArgs::new(&["-Xmx512m"]);
    let flags = reconciler(&host, &["-Dfoo=bar"]);

    assert_eq!(flags.disable(), ReconcileResult::NoOpAlreadyDisabled);
    assert_eq!(host.writes(), 0);
}

#[test]
fn test_toggle_round_trip() {
    let original = ["-Xms256m", "-Xmx512m"];
    let required = ["-Dtc.config=tc:9510", "-Dtc.install-root=/opt/tc"];
    let host = MockArgs::new(&original);
    let flags = reconciler(&host, &required);

    assert_eq!(flags.enable(), ReconcileResult::Enabled);
    assert_eq!(flags.is_enabled(), Ok(true));
    assert_eq!(flags.enable(), ReconcileResult::NoOpAlreadyEnabled);

    assert_eq!(flags.disable(), ReconcileResult::Disabled);
    assert_eq!(flags.is_enabled(), Ok(false));
    assert_eq!(host.args(), original);
    assert_eq!(flags.disable(), ReconcileResult::NoOpAlreadyDisabled);

    assert_eq!(host.writes(), 2);
}

#[test]
fn test_token_matching_is_exact() {
    let host = MockArgs::new(&["-dfoo=BAR", " -Dfoo=bar"]);
    let flags = reconciler(&host, &["-Dfoo=bar"]);

    assert_eq!(flags.is_enabled(), Ok(false));
    assert_eq!(flags.enable(), ReconcileResult::Enabled);
    assert_eq!(host.args(), ["-dfoo=BAR", " -Dfoo=bar", "-Dfoo=bar"]);
}

#[test]
fn test_read_failure_never_writes() {
    let host = MockArgs::new(&[]).fail_read(RemoteError::connection("refused"));
    let flags = reconciler(&host, &["-Dfoo=bar"]);

    for result in [flags.enable(), flags.disable()] {
        let ReconcileResult::Failed(e) = result else {
            panic!("expected a failure, got {result:?}");
        };
        assert_eq!(e.reason(), "read-error");
    }
    assert!(flags.is_enabled().is_err());
    assert_eq!(host.writes(), 0);
}

#[test]
fn test_write_failure() {
    let host = MockArgs::new(&["-Xmx512m"]).fail_write(RemoteError::other("read only"));
    let flags = reconciler(&host, &["-Dfoo=bar"]);

    assert_eq!(
        flags.reconcile(ReconcileMode::Enable),
        ReconcileResult::Failed(ReconcileError::WriteError(RemoteError::other("read only")))
    );
    assert_eq!(host.reads(), 1);
    assert_eq!(host.writes(), 1);
    assert_eq!(host.args(), ["-Xmx512m"]);
}
