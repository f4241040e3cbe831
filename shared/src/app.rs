use tracing::{debug, error, info, warn};

use crate::capabilities::{Capabilities, LocationOutput, TimerOutput};
use crate::catalog::PlaceCatalog;
use crate::config::MapConfig;
use crate::controller::{MapInteractionController, ShellCommand};
use crate::error::MapError;
use crate::event::Event;
use crate::location::DenialReason;
use crate::model::Model;
use crate::view::ViewModel;

#[derive(Default)]
pub struct App;

impl App {
    fn location_event(output: LocationOutput) -> Event {
        match output {
            LocationOutput::Permission { granted } => Event::LocationPermissionResolved { granted },
            LocationOutput::Position(reading) => Event::LocationResolved(reading),
            LocationOutput::Unavailable { reason } => {
                Event::LocationDenied(DenialReason::Unavailable { reason })
            }
        }
    }

    fn timer_event(output: TimerOutput) -> Event {
        match output {
            TimerOutput::Fired { id } => Event::SelectionTimerElapsed { timer_id: id },
            TimerOutput::Cancelled { .. } => Event::Noop,
        }
    }

    fn dispatch(commands: Vec<ShellCommand>, caps: &Capabilities) {
        for command in commands {
            match command {
                ShellCommand::RequestLocationPermission => {
                    caps.location.request_permission(Self::location_event);
                }
                ShellCommand::FetchLocation => {
                    caps.location.get_current_position(Self::location_event);
                }
                ShellCommand::StartTimer { id, after_ms } => {
                    caps.timer.start(id, after_ms, Self::timer_event);
                }
                ShellCommand::CancelTimer { id } => caps.timer.cancel(id),
            }
        }
    }

    fn configure(model: &mut Model, json: &str) {
        match MapConfig::from_json(json) {
            Ok(config) => {
                info!(mounted = model.is_mounted(), "map config replaced");
                model.config = config;
            }
            Err(e) => {
                let err = MapError::InvalidConfig {
                    reason: e.to_string(),
                };
                warn!(code = err.code(), "{err}");
            }
        }
    }

    fn mount(model: &mut Model, caps: &Capabilities) {
        if model.is_mounted() {
            debug!("already mounted");
            return;
        }

        if model.catalog.is_none() {
            match PlaceCatalog::bundled() {
                Ok(catalog) => model.catalog = Some(catalog),
                Err(e) => {
                    let err = MapError::from(e);
                    error!(code = err.code(), "{err}");
                    model.set_error(err);
                    return;
                }
            }
        }
        let Some(catalog) = model.catalog.clone() else {
            return;
        };

        model.mount_generation += 1;
        let mut screen =
            MapInteractionController::new(catalog, model.config.clone(), model.mount_generation);
        let commands = screen.on_mount();
        model.screen = Some(screen);

        info!(generation = model.mount_generation, "map screen mounted");
        Self::dispatch(commands, caps);
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(event = event.name(), user = event.is_user_initiated(), "update");

        if event.needs_screen() && !model.is_mounted() {
            if matches!(event, Event::DismissError) {
                model.clear_error();
                caps.render.render();
            } else {
                debug!(event = event.name(), "ignored while unmounted");
            }
            return;
        }

        match event {
            Event::Noop => return,

            Event::Mounted => Self::mount(model, caps),

            Event::ConfigProvided { json } => {
                Self::configure(model, &json);
                return;
            }

            Event::Unmounted => {
                if let Some(mut screen) = model.screen.take() {
                    Self::dispatch(screen.teardown(), caps);
                    info!(generation = model.mount_generation, "map screen unmounted");
                }
            }

            event => {
                let Some(screen) = model.screen.as_mut() else {
                    return;
                };
                let commands = match event {
                    Event::LocationPermissionResolved { granted } => {
                        screen.on_permission_resolved(granted)
                    }
                    Event::LocationResolved(reading) => {
                        screen.on_location_resolved(reading);
                        Vec::new()
                    }
                    Event::LocationDenied(reason) => {
                        screen.on_location_denied(reason);
                        Vec::new()
                    }
                    Event::MarkerPressed { name } => screen.on_marker_press(&name),
                    Event::CountrySwitched { country } => screen.on_country_switch(&country),
                    Event::RegionChangedByUser => screen.on_region_changed_by_user(),
                    Event::SearchTextChanged { text } => {
                        screen.on_search_text_change(&text);
                        Vec::new()
                    }
                    Event::SelectionTimerElapsed { timer_id } => {
                        screen.on_selection_timer(timer_id);
                        Vec::new()
                    }
                    Event::CameraRequestApplied { seq } => {
                        screen.on_camera_applied(seq);
                        Vec::new()
                    }
                    Event::DismissError => {
                        screen.dismiss_error();
                        model.active_error = None;
                        Vec::new()
                    }
                    Event::Noop
                    | Event::Mounted
                    | Event::Unmounted
                    | Event::ConfigProvided { .. } => Vec::new(),
                };
                Self::dispatch(commands, caps);
            }
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_model(model)
    }
}
