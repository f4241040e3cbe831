#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use shared::capabilities::{LocationOperation, LocationOutput, TimerOperation, TimerOutput};
use shared::{App, Effect, Event, LocationReading, Model};

pub type Tester = AppTester<App, Effect>;

pub fn reading() -> LocationReading {
    LocationReading {
        latitude: 45.5017,
        longitude: -73.5673,
        accuracy: Some(12.0),
        timestamp_ms: 1_700_000_000_000,
    }
}

pub fn location_requests(effects: Vec<Effect>) -> Vec<Request<LocationOperation>> {
    effects
        .into_iter()
        .filter_map(|e| match e {
            Effect::Location(request) => Some(request),
            _ => None,
        })
        .collect()
}

pub fn timer_requests(effects: Vec<Effect>) -> Vec<Request<TimerOperation>> {
    effects
        .into_iter()
        .filter_map(|e| match e {
            Effect::Timer(request) => Some(request),
            _ => None,
        })
        .collect()
}

/// Feeds every event produced by resolving a request back into the app and
/// returns the effects of those updates.
pub fn settle(app: &Tester, model: &mut Model, events: Vec<Event>) -> Vec<Effect> {
    let mut effects = Vec::new();
    for event in events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

pub fn resolve_location(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<LocationOperation>,
    output: LocationOutput,
) -> Vec<Effect> {
    let update = app
        .resolve(request, output)
        .expect("location request should resolve");
    settle(app, model, update.events)
}

pub fn resolve_timer(
    app: &Tester,
    model: &mut Model,
    request: &mut Request<TimerOperation>,
    output: TimerOutput,
) -> Vec<Effect> {
    let update = app
        .resolve(request, output)
        .expect("timer request should resolve");
    settle(app, model, update.events)
}

/// Mounts the screen and answers the permission prompt. When granted, the
/// position fetch is answered with [`reading`].
pub fn mount(app: &Tester, model: &mut Model, granted: bool) {
    let update = app.update(Event::Mounted, model);
    let mut permission = location_requests(update.effects);
    assert_eq!(permission.len(), 1, "mount should request permission once");
    assert_eq!(permission[0].operation, LocationOperation::RequestPermission);

    let effects = resolve_location(
        app,
        model,
        &mut permission[0],
        LocationOutput::Permission { granted },
    );
    let mut fetch = location_requests(effects);

    if granted {
        assert_eq!(fetch.len(), 1);
        assert_eq!(fetch[0].operation, LocationOperation::GetCurrentPosition);
        resolve_location(app, model, &mut fetch[0], LocationOutput::Position(reading()));
    } else {
        assert!(fetch.is_empty(), "denied permission must not fetch a position");
    }
}

/// The single Start request among `effects`, with its timer id.
pub fn started_timer(effects: Vec<Effect>) -> Request<TimerOperation> {
    let mut starts: Vec<_> = timer_requests(effects)
        .into_iter()
        .filter(|r| matches!(r.operation, TimerOperation::Start { .. }))
        .collect();
    assert_eq!(starts.len(), 1, "expected exactly one timer start");
    starts.remove(0)
}
