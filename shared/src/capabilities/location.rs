use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::location::LocationReading;

/// Device location, resolved by the shell's platform location service.
pub struct Location<E> {
    context: CapabilityContext<LocationOperation, E>,
}

impl<E> Clone for Location<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Location<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = Location<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Location::new(self.context.map_event(f))
    }
}

impl<E> Location<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<LocationOperation, E>) -> Self {
        Self { context }
    }

    pub fn request_permission<F>(&self, callback: F)
    where
        F: FnOnce(LocationOutput) -> E + Send + 'static,
    {
        self.request(LocationOperation::RequestPermission, callback);
    }

    pub fn get_current_position<F>(&self, callback: F)
    where
        F: FnOnce(LocationOutput) -> E + Send + 'static,
    {
        self.request(LocationOperation::GetCurrentPosition, callback);
    }

    fn request<F>(&self, operation: LocationOperation, callback: F)
    where
        F: FnOnce(LocationOutput) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let output = ctx.request_from_shell(operation).await;
            ctx.update_app(callback(output));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationOperation {
    RequestPermission,
    GetCurrentPosition,
}

impl Operation for LocationOperation {
    type Output = LocationOutput;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LocationOutput {
    Permission { granted: bool },
    Position(LocationReading),
    Unavailable { reason: String },
}
