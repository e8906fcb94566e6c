use std::cell::Cell;
use std::io;
use std::sync::mpsc;
use std::thread;

use termion::event::Key;
use termion::input::TermRead;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Input(Key),
    Update,
    /// Stdin reached its end, no more keys will arrive
    InputClosed,
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    input_closed: Cell<bool>,
    _input_handle: Option<thread::JoinHandle<()>>,
    _update_handle: Option<thread::JoinHandle<()>>,
}

impl Default for Dispatcher {
    fn default() -> Dispatcher {
        Dispatcher::from_config(&Config::default())
    }
}

impl Dispatcher {
    /// A dispatcher without producers. Events only arrive through
    /// [`Dispatcher::event_sink`].
    pub fn new() -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        Dispatcher {
            rx,
            tx,
            input_closed: Cell::new(false),
            _input_handle: None,
            _update_handle: None,
        }
    }

    pub fn from_config(config: &Config) -> Dispatcher {
        let mut dispatcher = Dispatcher::new();
        let tick_rate = config.tick_rate;

        let input_handle = {
            let tx = dispatcher.tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                for key in stdin.lock().keys() {
                    match key {
                        Ok(key) => {
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                        }
                        Err(err) => log::warn!("Error while reading input: {}", err),
                    }
                }
                log::info!("Input closed");
                let _ = tx.send(Event::InputClosed);
            })
        };

        let update_handle = {
            let tx = dispatcher.tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };

        dispatcher._input_handle = Some(input_handle);
        dispatcher._update_handle = Some(update_handle);
        dispatcher
    }

    /// Once the input is closed every further call returns
    /// `Event::InputClosed` without blocking.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        if self.input_closed.get() {
            return Ok(Event::InputClosed);
        }

        let event = self.rx.recv()?;
        if event == Event::InputClosed {
            self.input_closed.set(true);
        }
        Ok(event)
    }

    /// Next key press, skipping frame updates. `None` once the input is gone.
    pub fn next_key(&self) -> Option<Key> {
        loop {
            match self.next() {
                Ok(Event::Input(key)) => return Some(key),
                Ok(Event::Update) => {}
                Ok(Event::InputClosed) | Err(_) => return None,
            }
        }
    }

    pub fn event_sink(&self) -> &mpsc::Sender<Event> {
        &self.tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_key_skips_updates() {
        let dispatcher = Dispatcher::new();
        let sink = dispatcher.event_sink().clone();

        sink.send(Event::Update).unwrap();
        sink.send(Event::Update).unwrap();
        sink.send(Event::Input(Key::Char('7'))).unwrap();
        sink.send(Event::Update).unwrap();

        assert_eq!(dispatcher.next_key(), Some(Key::Char('7')));
        assert_eq!(dispatcher.next(), Ok(Event::Update));
    }

    #[test]
    fn closed_input_stops_waiting_for_keys() {
        let dispatcher = Dispatcher::new();
        let sink = dispatcher.event_sink().clone();

        sink.send(Event::Update).unwrap();
        sink.send(Event::InputClosed).unwrap();

        assert_eq!(dispatcher.next_key(), None);
        // Nothing is left in the channel, later calls must not block
        assert_eq!(dispatcher.next_key(), None);
        assert_eq!(dispatcher.next(), Ok(Event::InputClosed));
    }
}
