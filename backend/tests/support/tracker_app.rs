//! Shared wiring for integration suites driving the real service stack.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use exercise_tracker::Trace;
use exercise_tracker::domain::ExerciseLogService;
use exercise_tracker::domain::ports::StoreLifecycle;
use exercise_tracker::inbound::http::api_scope;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::persistence::InMemoryEntityStore;
use mockable::Clock;

/// Rendered form of [`fixed_now`].
pub(crate) const TODAY: &str = "Wed May 17 2023";

struct FixedClock {
    now: DateTime<Utc>,
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 5, 17, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Connect a volatile store.
pub(crate) async fn connected_store() -> Arc<InMemoryEntityStore> {
    let store = Arc::new(InMemoryEntityStore::new());
    store.connect().await.expect("store connects");
    store
}

/// Handler state backed by `store` and a clock frozen at [`fixed_now`].
pub(crate) fn tracker_state(store: Arc<InMemoryEntityStore>) -> web::Data<HttpState> {
    let service = Arc::new(ExerciseLogService::new(
        store,
        Arc::new(FixedClock { now: fixed_now() }),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}

/// Application serving the API routes behind the trace middleware.
pub(crate) fn tracker_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).service(api_scope())
}
