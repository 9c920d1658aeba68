use std::time::{Duration, Instant};

use dso_admin_common::{
    constant::{
        DEFAULT_POLL_INTERVAL, DEFAULT_SERVER_QUERY, DEFAULT_STATE_ATTRIBUTE, STATE_STOPPED,
        STATE_STOPPING,
    },
    prelude::*,
};
use tracing::{debug, info, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Discovery pattern, must match exactly one remote object
    pub query: String,
    /// Attribute holding the state value
    pub attribute: String,
    /// State value that ends the poll
    pub terminal: String,
    /// State value after which a dropped connection counts as completion
    pub intermediate: String,
    /// Time between two reads
    pub interval: Duration,
    /// Give up after this long
    pub max_wait: Option<Duration>,
    /// Extra reads attempted after a connection error once the intermediate
    /// state was observed, before declaring completion
    pub disconnect_retries: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            query: DEFAULT_SERVER_QUERY.to_string(),
            attribute: DEFAULT_STATE_ATTRIBUTE.to_string(),
            terminal: STATE_STOPPED.to_string(),
            intermediate: STATE_STOPPING.to_string(),
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: None,
            disconnect_retries: 0,
        }
    }
}

impl PollerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }
}

/// Watches a single remote state attribute until it reaches the terminal
/// value.
///
/// `Connecting -> Connected -> [Stopping] -> Stopped` is the happy path. A
/// connection error moves to `ConnectionLost`, unless the intermediate value
/// was seen before, in which case the server is considered stopped.
pub struct StatePoller<C> {
    client: C,
    config: PollerConfig,
    cancel: CancelToken,
    state: PollerState,
    target: Option<ObjectRef>,
}

impl<C: ObjectLocator> StatePoller<C> {
    pub fn new(client: C, config: PollerConfig) -> Self {
        Self {
            client,
            config,
            cancel: CancelToken::new(),
            state: PollerState::Connecting,
            target: None,
        }
    }

    /// Use an externally owned token to abort the poll.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// The object being polled, once discovered
    pub fn target(&self) -> Option<&ObjectRef> {
        self.target.as_ref()
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Discover the target and poll it until an outcome is reached.
    pub fn run(&mut self) -> PollOutcome {
        let started = Instant::now();

        if self.cancel.is_cancelled() {
            return PollOutcome::Cancelled;
        }

        let target = match self.discover() {
            Ok(target) => target,
            Err(e) => return PollOutcome::Error(e),
        };
        info!("polling `{}` of {target}", self.config.attribute);
        self.target = Some(target.clone());
        self.state = PollerState::Connected;

        let mut retries_left = self.config.disconnect_retries;

        loop {
            if self.cancel.is_cancelled() {
                return PollOutcome::Cancelled;
            }

            match self.client.get_attribute(&target, &self.config.attribute) {
                Ok(value) if value == self.config.terminal => {
                    self.state = PollerState::Stopped;
                    return PollOutcome::Terminal(value);
                }
                Ok(value) if value == self.config.intermediate => {
                    if self.state != PollerState::Stopping {
                        info!("{target} is {value}");
                    }
                    self.state = PollerState::Stopping;
                    retries_left = self.config.disconnect_retries;
                }
                Ok(value) => trace!("{target} is {value}"),
                Err(RemoteError::Connection(e)) if self.state == PollerState::Stopping => {
                    if retries_left == 0 {
                        debug!("connection to {target} closed while stopping: {e}");
                        self.state = PollerState::Stopped;
                        return PollOutcome::Terminal(self.config.terminal.clone());
                    }
                    retries_left -= 1;
                    debug!("connection to {target} dropped while stopping, retrying: {e}");
                }
                Err(RemoteError::Connection(e)) => {
                    debug!("connection to {target} lost: {e}");
                    self.state = PollerState::ConnectionLost;
                    return PollOutcome::ConnectionLost;
                }
                Err(e) => return PollOutcome::Error(PollError::ReadError(e)),
            }

            if self.cancel.is_cancelled() {
                return PollOutcome::Cancelled;
            }

            let nap = match self.config.max_wait {
                Some(max_wait) => {
                    let elapsed = started.elapsed();
                    if elapsed >= max_wait {
                        return PollOutcome::TimedOut;
                    }
                    self.config.interval.min(max_wait - elapsed)
                }
                None => self.config.interval,
            };

            if self.cancel.sleep(nap) {
                return PollOutcome::Cancelled;
            }
        }
    }

    /// Exactly one match is required. An ambiguous target is never polled.
    fn discover(&self) -> Result<ObjectRef, PollError> {
        let query = &self.config.query;
        let mut found = self
            .client
            .find_instances(query)
            .map_err(|source| PollError::DiscoveryError {
                query: query.clone(),
                source,
            })?;

        if found.len() != 1 {
            return Err(PollError::AmbiguousTarget {
                query: query.clone(),
                count: found.len(),
            });
        }

        // length checked above
        Ok(found.remove(0))
    }
}
