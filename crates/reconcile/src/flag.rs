use dso_admin_common::prelude::*;
use tracing::{debug, warn};

/// Brings a remote argument list to a state where a fixed set of tokens is
/// either fully present or fully absent.
///
/// Every call performs at most one remote read and at most one remote write,
/// and never writes when the list is already in the desired state. Failures
/// are returned as-is; retrying is left to the caller.
pub struct FlagReconciler<C> {
    client: C,
    tokens: RequiredTokens,
    endpoint: RemoteEndpoint,
}

impl<C: ArgumentStore> FlagReconciler<C> {
    pub fn new(client: C, tokens: RequiredTokens, endpoint: RemoteEndpoint) -> Self {
        Self {
            client,
            tokens,
            endpoint,
        }
    }

    pub fn tokens(&self) -> &RequiredTokens {
        &self.tokens
    }

    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    /// Returns true iff every required token is currently present.
    pub fn is_enabled(&self) -> Result<bool, ReconcileError> {
        self.snapshot()
            .map(|args| self.tokens.is_satisfied_by(&args))
    }

    pub fn enable(&self) -> ReconcileResult {
        let args = match self.snapshot() {
            Ok(args) => args,
            Err(e) => return ReconcileResult::Failed(e),
        };

        if self.tokens.is_satisfied_by(&args) {
            debug!("{}: required tokens already present", self.endpoint);
            return ReconcileResult::NoOpAlreadyEnabled;
        }

        let next = self.tokens.merged_into(&args);
        debug!(
            "{}: appending {} missing token(s)",
            self.endpoint,
            next.len() - args.len()
        );

        match self.write(&next) {
            Ok(()) => ReconcileResult::Enabled,
            Err(e) => ReconcileResult::Failed(e),
        }
    }

    pub fn disable(&self) -> ReconcileResult {
        let args = match self.snapshot() {
            Ok(args) => args,
            Err(e) => return ReconcileResult::Failed(e),
        };

        // partially present tokens still count as disabled
        if !self.tokens.is_satisfied_by(&args) {
            if self.tokens.is_touched_by(&args) {
                warn!(
                    "{}: required tokens are only partially present, leaving them untouched",
                    self.endpoint
                );
            }
            return ReconcileResult::NoOpAlreadyDisabled;
        }

        let next = self.tokens.stripped_from(&args);
        debug!(
            "{}: removing {} argument(s)",
            self.endpoint,
            args.len() - next.len()
        );

        match self.write(&next) {
            Ok(()) => ReconcileResult::Disabled,
            Err(e) => ReconcileResult::Failed(e),
        }
    }

    pub fn reconcile(&self, mode: ReconcileMode) -> ReconcileResult {
        match mode {
            ReconcileMode::Enable => self.enable(),
            ReconcileMode::Disable => self.disable(),
        }
    }

    fn snapshot(&self) -> Result<ArgumentList, ReconcileError> {
        self.client.get_arguments().map_err(|e| {
            debug!("{}: failed to read arguments: {e}", self.endpoint);
            ReconcileError::ReadError(e)
        })
    }

    fn write(&self, args: &ArgumentList) -> Result<(), ReconcileError> {
        self.client.set_arguments(args).map_err(|e| {
            debug!("{}: failed to write arguments: {e}", self.endpoint);
            ReconcileError::WriteError(e)
        })
    }
}
