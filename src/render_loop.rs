use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, trace, warn};

use crate::state::Shared;

/// Handle to the background thread repainting the status line.
///
/// The thread runs until [`RenderLoop::stop`] is called or the handle is dropped.
pub(crate) struct RenderLoop {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl RenderLoop {
    pub fn spawn(shared: Arc<Shared>) -> RenderLoop {
        let (stop, stopped) = mpsc::channel::<()>();
        let period = shared.settings.refresh_period;
        let thread = thread::spawn(move || {
            let mut ticks: u64 = 0;
            loop {
                match stopped.try_recv() {
                    Err(mpsc::TryRecvError::Empty) => {}
                    _ => break,
                }
                shared.tick();
                ticks += 1;
                trace!("tick {}", ticks);
                // Sleeping on the channel lets a stop request cut the wait short.
                match stopped.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {}
                    _ => break,
                }
            }
            debug!("render loop exiting after {} ticks", ticks);
        });
        RenderLoop { stop, thread }
    }

    /// Signals the thread and blocks until it has exited.
    /// No write to the output stream happens after this returns.
    pub fn stop(self) {
        let _ = self.stop.send(());
        if self.thread.join().is_err() {
            warn!("render thread panicked");
        }
    }
}
