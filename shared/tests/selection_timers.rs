mod common;

use common::*;
use shared::capabilities::{TimerOperation, TimerOutput};
use shared::{CameraReason, Event, MapConfig, Model, PlaceCatalog};

fn press(app: &Tester, model: &mut Model, name: &str) -> Vec<shared::Effect> {
    app.update(Event::MarkerPressed { name: name.into() }, model)
        .effects
}

fn selected(app: &Tester, model: &Model) -> Option<String> {
    app.view(model).selected.map(|p| p.name)
}

#[test]
fn marker_press_selects_and_expires_after_thirty_seconds() {
    let app = Tester::default();
    let mut model = Model::default();
    mount(&app, &mut model, true);

    let mut start = started_timer(press(&app, &mut model, "CN Tower"));
    let TimerOperation::Start { id, after_ms } = start.operation else {
        panic!("expected a timer start");
    };
    assert_eq!(after_ms, 30_000);

    let view = app.view(&model);
    assert_eq!(selected(&app, &model).as_deref(), Some("CN Tower"));
    let marker = view.markers.iter().find(|m| m.is_selected).expect("selected marker");
    assert_eq!(marker.label.as_deref(), Some("CN Tower"));
    assert_eq!(
        view.pending_camera_request.map(|r| r.reason),
        Some(CameraReason::MarkerSelect)
    );

    resolve_timer(&app, &mut model, &mut start, TimerOutput::Fired { id });
    assert!(selected(&app, &model).is_none());
    assert!(app.view(&model).markers.iter().all(|m| m.label.is_none()));
}

#[test]
fn pressing_the_same_marker_twice_deselects() {
    let app = Tester::default();
    let mut model = Model::default();
    mount(&app, &mut model, true);

    let start = started_timer(press(&app, &mut model, "Orheiul Vechi"));
    let TimerOperation::Start { id, .. } = start.operation else {
        panic!("expected a timer start");
    };

    let ops: Vec<_> = timer_requests(press(&app, &mut model, "Orheiul Vechi"))
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert_eq!(ops, vec![TimerOperation::Cancel { id }]);
    assert!(selected(&app, &model).is_none());
}

#[test]
fn selecting_another_place_cancels_the_first_timer() {
    let app = Tester::default();
    let mut model = Model::default();
    mount(&app, &mut model, true);

    let mut first = started_timer(press(&app, &mut model, "Statue of Liberty"));
    let TimerOperation::Start { id: first_id, .. } = first.operation else {
        panic!("expected a timer start");
    };

    let ops: Vec<_> = timer_requests(press(&app, &mut model, "Rila Monastery"))
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0], TimerOperation::Cancel { id: first_id });
    assert!(matches!(
        ops[1],
        TimerOperation::Start { id, .. } if id != first_id
    ));

    // The shell fires the old timer anyway; the current selection survives.
    resolve_timer(&app, &mut model, &mut first, TimerOutput::Fired { id: first_id });
    assert_eq!(selected(&app, &model).as_deref(), Some("Rila Monastery"));
}

#[test]
fn user_pan_dismisses_label_but_keeps_filter() {
    let app = Tester::default();
    let mut model = Model::default();
    mount(&app, &mut model, true);

    app.update(Event::CountrySwitched { country: "bulgaria".into() }, &mut model);
    let start = started_timer(press(&app, &mut model, "Rila Monastery"));
    let TimerOperation::Start { id, .. } = start.operation else {
        panic!("expected a timer start");
    };

    let ops: Vec<_> = timer_requests(app.update(Event::RegionChangedByUser, &mut model).effects)
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert_eq!(ops, vec![TimerOperation::Cancel { id }]);

    let view = app.view(&model);
    assert!(view.selected.is_none());
    assert_eq!(view.active_country_filter, "bulgaria");
    assert_eq!(view.markers.len(), 2);

    // Panning again with nothing selected is a no-op.
    let effects = app.update(Event::RegionChangedByUser, &mut model).effects;
    assert!(timer_requests(effects).is_empty());
}

#[test]
fn cancelled_timer_answer_is_harmless() {
    let app = Tester::default();
    let mut model = Model::default();
    mount(&app, &mut model, true);

    let mut start = started_timer(press(&app, &mut model, "Stanley Park"));
    let TimerOperation::Start { id, .. } = start.operation else {
        panic!("expected a timer start");
    };
    press(&app, &mut model, "Stanley Park");

    resolve_timer(&app, &mut model, &mut start, TimerOutput::Cancelled { id });
    assert!(selected(&app, &model).is_none());
}

#[test]
fn unmount_cancels_timer_and_ignores_late_expiry() {
    let app = Tester::default();
    let mut model = Model::default();
    mount(&app, &mut model, true);

    let mut start = started_timer(press(&app, &mut model, "Cricova Winery"));
    let TimerOperation::Start { id, .. } = start.operation else {
        panic!("expected a timer start");
    };

    let ops: Vec<_> = timer_requests(app.update(Event::Unmounted, &mut model).effects)
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert_eq!(ops, vec![TimerOperation::Cancel { id }]);

    mount(&app, &mut model, true);
    press(&app, &mut model, "Cricova Winery");

    // The timer from the previous mount fires late and must not clear the
    // new screen's selection.
    resolve_timer(&app, &mut model, &mut start, TimerOutput::Fired { id });
    assert_eq!(selected(&app, &model).as_deref(), Some("Cricova Winery"));
}

#[test]
fn expiry_follows_configured_duration() {
    let app = Tester::default();
    let config = MapConfig::default().with_selection_expiry_ms(5_000);
    let catalog = PlaceCatalog::bundled().expect("bundled catalog");
    let mut model = Model::with_catalog(config, catalog);
    mount(&app, &mut model, true);

    let start = started_timer(press(&app, &mut model, "Chateau Frontenac"));
    assert!(matches!(
        start.operation,
        TimerOperation::Start { after_ms: 5_000, .. }
    ));
}

#[test]
fn shell_config_applies_from_next_mount() {
    let app = Tester::default();
    let mut model = Model::default();

    let update = app.update(
        Event::ConfigProvided {
            json: r#"{ "selection_expiry_ms": 8000 }"#.into(),
        },
        &mut model,
    );
    assert!(update.effects.is_empty());
    assert_eq!(model.config.selection_expiry_ms, 8_000);
    mount(&app, &mut model, true);

    // Rejected config leaves the running and the stored config alone.
    app.update(
        Event::ConfigProvided {
            json: "{ not json".into(),
        },
        &mut model,
    );
    assert_eq!(model.config.selection_expiry_ms, 8_000);
    assert!(app.view(&model).error.is_none());

    let start = started_timer(press(&app, &mut model, "Stanley Park"));
    assert!(matches!(
        start.operation,
        TimerOperation::Start { after_ms: 8_000, .. }
    ));
}
