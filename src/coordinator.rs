//! The alarm's main loop.
//!
//! The [`Coordinator`] is the only owner of whether an alarm is ringing.
//! Sessions report back with a [`Message`] when they end instead of touching
//! that state themselves.

use std::{sync::Arc, time::Instant};

use crossbeam_channel::{bounded, never, select, unbounded, Receiver, Sender, TryRecvError};

use crate::{
    audio::Player,
    communication::{Message, MessageType},
    config::Interval,
    error::Error,
    input, playback,
    shutdown::Cancellation,
    tasks::TaskGroup,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    Playing {
        session_id: u64,
    },
}

/// ticks every `interval`, the first one a full interval from now
#[must_use]
pub fn ticker(interval: Interval) -> Receiver<Instant> {
    crossbeam_channel::tick(interval.as_duration())
}

pub struct Coordinator {
    player: Arc<dyn Player>,
    lines: Receiver<String>,
    cancel: Cancellation,
    state: State,
    sessions_started: u64,
    tasks: TaskGroup,
    events_tx: Sender<Message>,
    events: Receiver<Message>,
}

impl Coordinator {
    /// `lines` is where answers from the console arrive
    #[must_use]
    pub fn new(player: Arc<dyn Player>, lines: Receiver<String>) -> Self {
        let (events_tx, events) = unbounded();
        Self {
            player,
            lines,
            cancel: Cancellation::new(),
            state: State::Idle,
            sessions_started: 0,
            tasks: TaskGroup::new(),
            events_tx,
            events,
        }
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub const fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Rings on every tick until `quit` fires or the sound can't be played.
    ///
    /// Whatever the outcome, every session is cancelled and its threads are
    /// joined before this returns.
    ///
    /// # Errors
    /// if the sound fails to play, a thread can't be started or one panicked
    pub fn run(&mut self, ticks: &Receiver<Instant>, quit: &Receiver<()>) -> Result<(), Error> {
        let result = self.event_loop(ticks.clone(), quit);
        if self.cancel.cancel() {
            log::info!("cancelling {} task(s)", self.tasks.len());
        }
        let joined = self.tasks.join_all();
        self.state = State::Idle;
        log::info!("alarm stopped after {} session(s)", self.sessions_started);
        result.and(joined)
    }

    fn event_loop(
        &mut self,
        mut ticks: Receiver<Instant>,
        quit: &Receiver<()>,
    ) -> Result<(), Error> {
        let events = self.events.clone();
        loop {
            let mut timer_closed = false;
            select! {
                recv(ticks) -> tick => {
                    if tick.is_err() {
                        timer_closed = true;
                    } else if quit_requested(quit) {
                        // a pending shutdown beats a tick that raced it
                        log::info!("shutting down");
                        return Ok(());
                    } else {
                        self.on_tick()?;
                    }
                }
                recv(quit) -> _ => {
                    log::info!("shutting down");
                    return Ok(());
                }
                recv(events) -> message => {
                    // we hold a sender, so this can't disconnect
                    if let Ok(message) = message {
                        self.on_message(message)?;
                    }
                }
            }
            if timer_closed {
                log::debug!("timer closed, waiting for shutdown");
                ticks = never();
            }
        }
    }

    fn on_tick(&mut self) -> Result<(), Error> {
        match self.state {
            State::Playing { session_id } => {
                log::debug!("tick skipped, session {session_id} is still ringing");
                Ok(())
            }
            State::Idle => self.start_session(),
        }
    }

    /// Starts a playback and a watcher thread for a new session.
    ///
    /// The wake up banner is printed once here rather than on every loop of
    /// the sound.
    fn start_session(&mut self) -> Result<(), Error> {
        self.sessions_started += 1;
        let session_id = self.sessions_started;
        let stale = input::discard_pending(&self.lines);
        if stale > 0 {
            log::debug!("ignoring {stale} line(s) typed before session {session_id}");
        }

        let (stop_tx, stop_rx) = bounded(1);
        {
            let player = Arc::clone(&self.player);
            let cancel = self.cancel.clone();
            let events = self.events_tx.clone();
            self.tasks.spawn("playback", move || {
                playback::play_until_stopped(session_id, &*player, &stop_rx, &cancel, &events);
            })?;
        }
        {
            let lines = self.lines.clone();
            let cancel = self.cancel.clone();
            self.tasks.spawn("watcher", move || {
                input::watch_for_answer(session_id, &lines, &stop_tx, &cancel);
            })?;
        }

        self.state = State::Playing { session_id };
        println!(
            "WAKE UP!! ({}) press enter to stop the alarm",
            chrono::Local::now().format("%l:%M %p").to_string().trim()
        );
        log::info!("session {session_id} started");
        Ok(())
    }

    fn on_message(&mut self, message: Message) -> Result<(), Error> {
        let Message { kind, session_id } = message;
        match kind {
            MessageType::Failed(e) => Err(e.into()),
            MessageType::Panicked => Err(Error::Panicked("playback".to_string())),
            MessageType::Stopped | MessageType::Cancelled => {
                if self.state == (State::Playing { session_id }) {
                    self.state = State::Idle;
                } else {
                    log::debug!("ignoring end of stale session {session_id}");
                }
                Ok(())
            }
        }
    }
}

fn quit_requested(quit: &Receiver<()>) -> bool {
    !matches!(quit.try_recv(), Err(TryRecvError::Empty))
}
