use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("parley.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("parley.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("parley.client.request_duration_seconds");

pub(crate) static AUTH_PROBES: Counter = Counter::new("parley.auth.probes");
pub(crate) static AUTH_EXPIRED: Counter = Counter::new("parley.auth.expired");

pub(crate) static CHAT_SENDS: Counter = Counter::new("parley.chat.sends");
pub(crate) static CHAT_SEND_ERRORS: Counter = Counter::new("parley.chat.send_errors");
pub(crate) static CHAT_RETRIES: Counter = Counter::new("parley.chat.retries");
pub(crate) static SESSION_DELETES: Counter = Counter::new("parley.sessions.deletes");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&AUTH_PROBES);
    collector.register_counter(&AUTH_EXPIRED);

    collector.register_counter(&CHAT_SENDS);
    collector.register_counter(&CHAT_SEND_ERRORS);
    collector.register_counter(&CHAT_RETRIES);
    collector.register_counter(&SESSION_DELETES);
}
