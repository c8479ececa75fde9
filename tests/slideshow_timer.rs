//! Slideshow lifecycle through the public API: mount, tick, navigate from
//! another thread, unmount.

use diecast_site::autoplay::{Slideshow, SlideshowEvent, Ticker};
use diecast_site::carousel::Carousel;
use diecast_site::cursor::Boundary;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const PATIENCE: Duration = Duration::from_secs(5);

fn slides() -> Carousel<&'static str> {
    Carousel::new(vec!["Since 1968", "Our Foundry", "Quality First"])
}

#[test]
fn ticks_cycle_through_every_slide_and_back() {
    let mut show = Slideshow::mount(slides(), Some(Duration::from_millis(5)));
    let mut seen = vec![show.current_index()];
    while show.ticks_applied() < 3 {
        let event = show.wait(PATIENCE).expect("tick within patience");
        assert_eq!(event, SlideshowEvent::Tick);
        seen.push(show.current_index());
    }
    assert_eq!(seen, vec![0, 1, 2, 0]);
    let carousel = show.unmount();
    assert_eq!(carousel.current(), Some(&"Since 1968"));
}

#[test]
fn ui_thread_and_timer_share_one_queue() {
    let mut show = Slideshow::mount(slides(), Some(Duration::from_millis(5)));
    let ui = show.handle();
    let clicker = thread::spawn(move || {
        for _ in 0..4 {
            ui.send(SlideshowEvent::Previous);
        }
    });
    clicker.join().unwrap();

    let mut previous = 0;
    while previous < 4 {
        if show.wait(PATIENCE).expect("event within patience") == SlideshowEvent::Previous {
            previous += 1;
        }
    }
    let ticks = show.stop_autoplay();
    show.pump();

    assert!(!show.is_autoplaying());
    assert_eq!(show.ticks_applied(), ticks);
    // Each tick is +1 and each click -1, modulo the slide count
    let expected = (ticks as i64 - 4).rem_euclid(3) as usize;
    assert_eq!(show.current_index(), expected);
}

#[test]
fn clamped_slideshow_stops_at_last_slide() {
    let carousel = Carousel::with_boundary(vec![1, 2, 3], Boundary::Clamp);
    let mut show = Slideshow::mount(carousel, Some(Duration::from_millis(2)));
    while show.ticks_applied() < 5 {
        show.wait(PATIENCE).expect("tick within patience");
    }
    assert_eq!(show.current_index(), 2);
    assert_eq!(show.carousel().current(), Some(&3));
}

#[test]
fn dropping_the_ticker_ends_the_stream() {
    let (tx, rx) = mpsc::channel();
    let ticker = Ticker::start(Duration::from_millis(2), tx);
    rx.recv_timeout(PATIENCE).expect("first tick");
    drop(ticker);

    // Whatever was posted before the drop is still queued, then the channel closes
    let remaining: Vec<_> = rx.try_iter().collect();
    assert!(remaining.iter().all(|e| *e == SlideshowEvent::Tick));
    assert_eq!(
        rx.recv_timeout(Duration::from_millis(50)),
        Err(mpsc::RecvTimeoutError::Disconnected)
    );
}

#[test]
fn empty_slideshow_ignores_everything() {
    let mut show = Slideshow::mount(Carousel::<u8>::new(vec![]), Some(Duration::from_millis(2)));
    show.wait(PATIENCE);
    assert_eq!(show.dispatch(SlideshowEvent::Next), 0);
    assert_eq!(show.dispatch(SlideshowEvent::GoTo(7)), 0);
    assert!(show.carousel().current().is_none());
}

#[test]
fn unmount_drops_queued_ticks_and_applied_count_matches_slide() {
    let mut show = Slideshow::mount(slides(), Some(Duration::from_millis(1)));
    show.wait(PATIENCE).expect("first tick");
    thread::sleep(Duration::from_millis(20));
    let posted = show.stop_autoplay();
    let applied = show.ticks_applied();
    assert!(applied <= posted);

    let carousel = show.unmount();
    // Only applied ticks moved the carousel; queued ones went with the queue
    assert_eq!(carousel.current_index(), (applied % 3) as usize);
}

#[test]
fn zero_interval_does_not_flood_the_queue() {
    let (tx, rx) = mpsc::channel();
    let mut ticker = Ticker::start(Duration::ZERO, tx);
    thread::sleep(Duration::from_millis(20));
    let posted = ticker.cancel();
    assert_eq!(rx.try_iter().count() as u64, posted);
    assert!(posted < 200, "{posted} ticks in 20ms");
}
