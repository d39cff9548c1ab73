use crossterm::event::{self, Event};
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug)]
pub enum InputMessage {
    Event(Event),
    ReadError(String),
}

pub type InputReceiver = Receiver<InputMessage>;

fn forward_events(tx: Sender<InputMessage>) {
    loop {
        let msg = match event::read() {
            Ok(ev) => InputMessage::Event(ev),
            Err(err) => {
                let _ = tx.send(InputMessage::ReadError(err.to_string()));
                return;
            }
        };
        if tx.send(msg).is_err() {
            return;
        }
    }
}

/// Blocking reader on its own thread; the frame loop drains the channel
/// between frames without ever blocking on the terminal.
pub fn spawn_input_thread() -> InputReceiver {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || forward_events(tx));
    rx
}
