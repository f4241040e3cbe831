mod location;
mod timer;

pub use self::location::{Location, LocationOperation, LocationOutput};
pub use self::timer::{Timer, TimerOperation, TimerOutput};

// Crux's built-in Render capability covers view updates, so it is used as is.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

// The Effect derive needs the generic capability types, not aliases.
#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub location: Location<Event>,
    pub timer: Timer<Event>,
    pub render: Render<Event>,
}
