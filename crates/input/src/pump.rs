//! Input thread: polls the terminal and feeds the simulation queue.
//!
//! The simulation thread is the only writer of world state. This thread only
//! translates terminal events and pushes them into a bounded channel; when the
//! queue is full, movement intents are dropped rather than blocking the reader.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, trace, warn};

use crate::map::{handle_key_event, should_quit};
use crate::types::{Intent, INTENT_QUEUE_CAPACITY};

/// How long one `poll` waits before re-checking the stop flag.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// What the input thread hands to the simulation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Intent(Intent),
    /// Terminal size changed; the next frame must be a full redraw.
    Resize,
    Quit,
}

/// Translate one terminal event. Key releases and repeats of unmapped keys
/// produce nothing.
pub fn translate(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Release => None,
        Event::Key(key) if should_quit(key) => Some(InputEvent::Quit),
        Event::Key(key) => handle_key_event(key).map(InputEvent::Intent),
        Event::Resize(_, _) => Some(InputEvent::Resize),
        _ => None,
    }
}

/// Bounded queue between the input thread and the tick loop.
#[derive(Debug, Clone)]
pub struct IntentQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new(INTENT_QUEUE_CAPACITY)
    }
}

impl IntentQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    pub fn receiver(&self) -> Receiver<InputEvent> {
        self.receiver.clone()
    }
}

/// Outcome of pushing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    Dropped,
    Disconnected,
}

/// Push `ev` without blocking on intents.
///
/// Quit and resize are control events and wait for room instead of being
/// dropped.
pub fn dispatch(tx: &Sender<InputEvent>, ev: InputEvent) -> Dispatch {
    match ev {
        InputEvent::Intent(_) => match tx.try_send(ev) {
            Ok(()) => Dispatch::Sent,
            Err(TrySendError::Full(_)) => Dispatch::Dropped,
            Err(TrySendError::Disconnected(_)) => Dispatch::Disconnected,
        },
        InputEvent::Resize | InputEvent::Quit => match tx.send(ev) {
            Ok(()) => Dispatch::Sent,
            Err(_) => Dispatch::Disconnected,
        },
    }
}

/// What the tick loop pulled from the queue this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drained {
    pub intent: Option<Intent>,
    pub resized: bool,
    pub quit: bool,
}

/// Take at most one intent for this tick.
///
/// Control events queued ahead of that intent are consumed too, so a quit
/// never waits behind a backlog of moves. A disconnected queue counts as quit.
pub fn drain_tick(rx: &Receiver<InputEvent>) -> Drained {
    let mut out = Drained::default();
    loop {
        match rx.try_recv() {
            Ok(InputEvent::Intent(intent)) => {
                out.intent = Some(intent);
                return out;
            }
            Ok(InputEvent::Resize) => out.resized = true,
            Ok(InputEvent::Quit) => {
                out.quit = true;
                return out;
            }
            Err(TryRecvError::Empty) => return out,
            Err(TryRecvError::Disconnected) => {
                out.quit = true;
                return out;
            }
        }
    }
}

/// Spawn the terminal reader.
///
/// The thread exits when `stop` is set, when the receiving side is gone, or
/// after it forwards a quit.
pub fn spawn_input_thread(
    tx: Sender<InputEvent>,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".into())
        .spawn(move || run_input_loop(&tx, &stop))
}

fn run_input_loop(tx: &Sender<InputEvent>, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                warn!(%err, "terminal poll failed");
                let _ = tx.send(InputEvent::Quit);
                return;
            }
        }

        let ev = match event::read() {
            Ok(ev) => ev,
            Err(err) => {
                warn!(%err, "terminal read failed");
                let _ = tx.send(InputEvent::Quit);
                return;
            }
        };

        let Some(input) = translate(ev) else {
            continue;
        };
        match dispatch(tx, input) {
            Dispatch::Sent => trace!(?input, "queued"),
            Dispatch::Dropped => debug!(?input, "queue full, dropped"),
            Dispatch::Disconnected => return,
        }
        if input == InputEvent::Quit {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn translate_keys_and_resize() {
        assert_eq!(
            translate(press(KeyCode::Left)),
            Some(InputEvent::Intent(Intent::Left))
        );
        assert_eq!(translate(press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(translate(press(KeyCode::Tab)), None);
        assert_eq!(translate(Event::Resize(80, 24)), Some(InputEvent::Resize));
        assert_eq!(translate(Event::FocusGained), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(release), None);
    }

    #[test]
    fn full_queue_drops_intents_but_not_quit() {
        let queue = IntentQueue::new(1);
        let tx = queue.sender();
        let rx = queue.receiver();

        assert_eq!(dispatch(&tx, InputEvent::Intent(Intent::Up)), Dispatch::Sent);
        assert_eq!(dispatch(&tx, InputEvent::Intent(Intent::Down)), Dispatch::Dropped);
        assert_eq!(rx.len(), 1);

        let drained = drain_tick(&rx);
        assert_eq!(drained.intent, Some(Intent::Up));
        assert_eq!(dispatch(&tx, InputEvent::Quit), Dispatch::Sent);
        assert!(drain_tick(&rx).quit);
    }

    #[test]
    fn drain_takes_one_intent_per_tick() {
        let queue = IntentQueue::default();
        let tx = queue.sender();
        for ev in [
            InputEvent::Resize,
            InputEvent::Intent(Intent::Left),
            InputEvent::Intent(Intent::Mine),
        ] {
            dispatch(&tx, ev);
        }

        let rx = queue.receiver();
        let first = drain_tick(&rx);
        assert_eq!(first.intent, Some(Intent::Left));
        assert!(first.resized);
        assert!(!first.quit);

        assert_eq!(drain_tick(&rx).intent, Some(Intent::Mine));
        assert_eq!(drain_tick(&rx), Drained::default());
    }

    #[test]
    fn blocked_control_send_is_released_when_receiver_drops() {
        let (tx, rx) = bounded::<InputEvent>(1);
        assert_eq!(dispatch(&tx, InputEvent::Intent(Intent::Up)), Dispatch::Sent);

        let pending = thread::spawn(move || dispatch(&tx, InputEvent::Resize));
        thread::sleep(Duration::from_millis(20));
        drop(rx);

        assert_eq!(pending.join().unwrap(), Dispatch::Disconnected);
    }

    #[test]
    fn disconnected_sender_reads_as_quit() {
        let (tx, rx) = bounded::<InputEvent>(4);
        drop(tx);
        assert!(drain_tick(&rx).quit);
        let (tx, rx) = bounded::<InputEvent>(4);
        drop(rx);
        assert_eq!(
            dispatch(&tx, InputEvent::Intent(Intent::Up)),
            Dispatch::Disconnected
        );
    }
}
