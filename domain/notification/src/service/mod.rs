mod clock;
mod event;
mod lifecycle;
mod preference;
mod query;

#[rustfmt::skip]
pub use {
    clock::{Clock, SystemClock},
    event::DossierEventService,
    lifecycle::NotificationLifecycleService,
    preference::PreferenceResolveService,
    query::NotificationQueryService,
};
