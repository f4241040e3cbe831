use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::selection::TimerId;

/// One-shot, cancellable timers run on the shell's event loop.
pub struct Timer<E> {
    context: CapabilityContext<TimerOperation, E>,
}

impl<E> Clone for Timer<E> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Timer<Ev> {
    type Operation = TimerOperation;
    type MappedSelf<MappedEv> = Timer<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Timer::new(self.context.map_event(f))
    }
}

impl<E> Timer<E>
where
    E: 'static,
{
    pub fn new(context: CapabilityContext<TimerOperation, E>) -> Self {
        Self { context }
    }

    /// The shell answers once: `Fired` after `after_ms`, or `Cancelled` if
    /// [`Timer::cancel`] got there first.
    pub fn start<F>(&self, id: TimerId, after_ms: u64, callback: F)
    where
        F: FnOnce(TimerOutput) -> E + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let output = ctx
                .request_from_shell(TimerOperation::Start { id, after_ms })
                .await;
            ctx.update_app(callback(output));
        });
    }

    pub fn cancel(&self, id: TimerId) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(TimerOperation::Cancel { id }).await;
        });
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    Start { id: TimerId, after_ms: u64 },
    Cancel { id: TimerId },
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOutput {
    Fired { id: TimerId },
    Cancelled { id: TimerId },
}
