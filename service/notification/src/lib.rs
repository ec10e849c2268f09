mod event;
mod lifecycle;
mod preference;
mod query;

#[rustfmt::skip]
pub use {
    event::DossierEventServiceImpl,
    lifecycle::NotificationLifecycleServiceImpl,
    preference::PreferenceResolveServiceImpl,
    query::{unify_dossier_depose, NotificationQueryServiceImpl},
};
