//! Timer-driven auto-advance for carousels.
//!
//! Two pieces cooperate here:
//!
//! - [`Ticker`] is a scoped repeating timer. It runs on its own thread and
//!   only ever *posts* [`SlideshowEvent::Tick`] into a channel. Dropping the
//!   ticker stops and joins the thread, so no tick is posted once the drop
//!   has returned.
//! - [`Slideshow`] owns a [`Carousel`] plus the receiving end of that channel.
//!   Timer ticks and user input (next/previous/go-to) travel through the same
//!   queue and are applied one at a time by whoever drives the slideshow, so
//!   the index is never mutated from two places at once.
//!
//! ```text
//! Ticker thread ──Tick──┐
//!                       ├──▶ mpsc queue ──▶ Slideshow::pump / wait ──▶ Carousel
//! SlideshowHandle ──Next/Previous/GoTo──┘
//! ```
//!
//! Manual navigation does not reset the timer: a click right before a tick
//! is followed by that tick as scheduled.

use crate::carousel::Carousel;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shortest period a [`Ticker`] will run at. Faster requests are raised to it.
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// An input to a mounted slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowEvent {
    /// Posted by the auto-advance timer.
    Tick,
    Next,
    Previous,
    GoTo(usize),
}

/// Repeating timer owned by a single slideshow.
#[derive(Debug)]
pub struct Ticker {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    posted: Arc<AtomicU64>,
}

impl Ticker {
    /// Post a [`SlideshowEvent::Tick`] to `events` every `interval` until
    /// dropped. The thread also exits on its own if the receiver goes away.
    /// `interval` is raised to [`MIN_TICK`].
    pub fn start(interval: Duration, events: Sender<SlideshowEvent>) -> Self {
        let interval = interval.max(MIN_TICK);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let posted = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&posted);

        let thread = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if events.send(SlideshowEvent::Tick).is_err() {
                            break;
                        }
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                    // Explicit stop or the owning ticker was dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            stop: Some(stop_tx),
            thread: Some(thread),
            posted,
        }
    }

    /// Number of ticks successfully posted so far.
    pub fn ticks_posted(&self) -> u64 {
        self.posted.load(Ordering::SeqCst)
    }

    /// Stop the timer thread and wait for it to exit. Returns the final tick
    /// count. Idempotent.
    pub fn cancel(&mut self) -> u64 {
        // Closing the stop channel wakes the thread immediately
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.ticks_posted()
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Cloneable sender for UI input into a mounted slideshow.
#[derive(Debug, Clone)]
pub struct SlideshowHandle {
    events: Sender<SlideshowEvent>,
}

impl SlideshowHandle {
    /// Queue an event. Returns `false` if the slideshow has been unmounted.
    pub fn send(&self, event: SlideshowEvent) -> bool {
        self.events.send(event).is_ok()
    }
}

/// A carousel mounted together with its event queue and optional timer.
#[derive(Debug)]
pub struct Slideshow<T> {
    carousel: Carousel<T>,
    inbox: Receiver<SlideshowEvent>,
    outbox: Sender<SlideshowEvent>,
    ticker: Option<Ticker>,
    ticks_applied: u64,
}

impl<T> Slideshow<T> {
    /// Mount `carousel`. With `Some(interval)` the auto-advance timer starts
    /// immediately.
    pub fn mount(carousel: Carousel<T>, autoplay: Option<Duration>) -> Self {
        let (outbox, inbox) = mpsc::channel();
        let ticker = autoplay.map(|interval| Ticker::start(interval, outbox.clone()));
        Self {
            carousel,
            inbox,
            outbox,
            ticker,
            ticks_applied: 0,
        }
    }

    pub fn handle(&self) -> SlideshowHandle {
        SlideshowHandle {
            events: self.outbox.clone(),
        }
    }

    /// Apply one event to the carousel and return the resulting index.
    pub fn dispatch(&mut self, event: SlideshowEvent) -> usize {
        match event {
            SlideshowEvent::Tick => {
                self.ticks_applied += 1;
                self.carousel.next()
            }
            SlideshowEvent::Next => self.carousel.next(),
            SlideshowEvent::Previous => self.carousel.previous(),
            SlideshowEvent::GoTo(index) => self.carousel.go_to(index),
        }
    }

    /// Apply every queued event in arrival order. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.inbox.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Block until one event arrives (or `timeout` elapses), apply it and
    /// return it.
    pub fn wait(&mut self, timeout: Duration) -> Option<SlideshowEvent> {
        let event = self.inbox.recv_timeout(timeout).ok()?;
        self.dispatch(event);
        Some(event)
    }

    /// Cancel the auto-advance timer, keeping the slideshow mounted. Ticks
    /// already queued are still applied by the next `pump`. Returns the total
    /// number of ticks the timer posted.
    pub fn stop_autoplay(&mut self) -> u64 {
        self.ticker.take().map(|mut t| t.cancel()).unwrap_or(0)
    }

    pub fn is_autoplaying(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    /// Timer ticks that have actually advanced the carousel.
    pub fn ticks_applied(&self) -> u64 {
        self.ticks_applied
    }

    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    pub fn current_index(&self) -> usize {
        self.carousel.current_index()
    }

    /// Tear down: cancel the timer, discard pending events and hand back the
    /// carousel.
    pub fn unmount(self) -> Carousel<T> {
        let Slideshow {
            carousel, ticker, ..
        } = self;
        drop(ticker);
        carousel
    }
}
