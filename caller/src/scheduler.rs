use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use bingo::GameEngine;
use tracing::{debug, warn};

/// The periodic number-caller: a background thread that fires
/// [`GameEngine::call_next()`] once immediately and then once per interval.
///
/// Each firing takes the engine mutex, so calls serialize against marks and
/// resets made from other threads. The thread winds down on its own once the
/// board is won or the draw pool is exhausted; [`CallTimer::stop()`] cancels
/// it early and joins it.
pub struct CallTimer {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl CallTimer {
    pub fn start(engine: Arc<Mutex<GameEngine>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let thread = std::thread::spawn(move || loop {
            if stop_flag.load(Ordering::Relaxed) {
                break;
            }
            {
                let mut engine = engine.lock().expect("engine mutex poisoned");
                if engine.board_won() {
                    debug!("board won, caller going quiet");
                    break;
                }
                match engine.call_next() {
                    Ok(number) => debug!(number, "called"),
                    Err(err) => {
                        warn!(%err, "caller stopping");
                        break;
                    }
                }
            }
            std::thread::sleep(interval);
        });
        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// Cancels the timer and waits for the thread to finish. A sleeping
    /// timer notices the cancellation at its next firing, so this can block
    /// for up to one interval.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
