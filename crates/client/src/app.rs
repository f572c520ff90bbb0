//! Terminal front end: reads commands from stdin and prints what the runtime
//! publishes.
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use game_core::{BattleEvent, IntentOutcome, Screen};
use runtime::{Event, PlayerIntent, RuntimeHandle, Topic};

use crate::command::{HELP, Input};
use crate::navigation::{Choice, follows_automatically, next_screen};
use crate::render;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    handle: RuntimeHandle,
    screen: Screen,
    battle_rx: broadcast::Receiver<Event>,
    narration_rx: broadcast::Receiver<Event>,
}

impl App {
    pub fn new(handle: RuntimeHandle) -> Self {
        let battle_rx = handle.subscribe(Topic::Battle);
        let narration_rx = handle.subscribe(Topic::Narration);
        Self {
            handle,
            screen: Screen::Index,
            battle_rx,
            narration_rx,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.enter(Screen::Index).await?;

        loop {
            let flow = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => self.on_input(&line).await?,
                    None => Flow::Quit,
                },
                event = self.battle_rx.recv() => match received(event) {
                    Received::Event(event) => self.on_battle_event(event).await?,
                    Received::Lagged => Flow::Continue,
                    Received::Closed => Flow::Quit,
                },
                event = self.narration_rx.recv() => match received(event) {
                    Received::Event(Event::Narration(entry)) => {
                        println!("{}", render::narration_line(&entry));
                        Flow::Continue
                    }
                    Received::Closed => Flow::Quit,
                    _ => Flow::Continue,
                },
            };
            if flow == Flow::Quit {
                break;
            }
        }

        info!(target: "client::app", screen = %self.screen, "leaving");
        self.handle.teardown().await?;
        Ok(())
    }

    /// Moves to `screen`, following screens that advance on their own.
    async fn enter(&mut self, screen: Screen) -> Result<()> {
        let mut next = Some(screen);
        while let Some(screen) = next.take() {
            info!(target: "client::app", %screen, "entering screen");
            if screen == Screen::Index {
                self.handle.clear_handoff().await?;
            }
            self.screen = screen;

            let handoff = self.handle.handoff().await?;
            let banner = render::screen_banner(screen, &handoff);
            if !banner.is_empty() {
                println!("\n{banner}");
            }

            if let Some(encounter) = screen.encounter() {
                let snapshot = self.handle.start(encounter).await?;
                println!("{}", render::status_line(&snapshot));
            }
            next = follows_automatically(screen);
        }
        Ok(())
    }

    async fn on_input(&mut self, line: &str) -> Result<Flow> {
        let Some(input) = Input::parse(line) else {
            return Ok(Flow::Continue);
        };
        debug!(target: "client::app", ?input, screen = %self.screen, "input");

        let intent = match input {
            Input::Quit => return Ok(Flow::Quit),
            Input::Help => {
                println!("{HELP}");
                return Ok(Flow::Continue);
            }
            Input::Status => {
                self.print_status().await?;
                return Ok(Flow::Continue);
            }
            Input::Continue => return self.choose(Choice::Continue).await,
            Input::Retry => return self.choose(Choice::Retry).await,
            Input::Title => return self.choose(Choice::Title).await,
            Input::Unknown(text) => {
                println!("unknown command `{text}` (try `help`)");
                return Ok(Flow::Continue);
            }
            Input::Attack => PlayerIntent::Attack,
            Input::Special => PlayerIntent::Special,
            Input::Flee => PlayerIntent::Flee,
            Input::Drink => PlayerIntent::UseItem,
            Input::Say(text) => PlayerIntent::Comment(text),
            Input::Skip => PlayerIntent::Skip,
        };

        if self.screen.encounter().is_none() {
            println!("there is no battle on this screen");
            return Ok(Flow::Continue);
        }
        if self.handle.submit(intent).await? == IntentOutcome::Applied {
            let snapshot = self.handle.snapshot().await?;
            println!("{}", render::status_line(&snapshot));
        }
        Ok(Flow::Continue)
    }

    async fn choose(&mut self, choice: Choice) -> Result<Flow> {
        let handoff = self.handle.handoff().await?;
        match next_screen(self.screen, choice, &handoff) {
            Some(next) => {
                if choice == Choice::Retry {
                    self.handle.clear_handoff().await?;
                }
                self.enter(next).await?;
            }
            None => println!("that is not available here"),
        }
        Ok(Flow::Continue)
    }

    async fn print_status(&self) -> Result<()> {
        if self.screen.encounter().is_none() {
            let handoff = self.handle.handoff().await?;
            println!("{}", serde_json::to_string_pretty(&handoff)?);
            return Ok(());
        }
        let snapshot = self.handle.snapshot().await?;
        println!("{}", render::status_line(&snapshot));
        let mut summary = snapshot;
        summary.narration.clear();
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    async fn on_battle_event(&mut self, event: Event) -> Result<Flow> {
        match event {
            Event::Battle(BattleEvent::TransitionRequested { screen }) => {
                if self.screen.encounter().is_some() {
                    self.enter(screen).await?;
                }
            }
            Event::Battle(event) => {
                if let Some(line) = render::cue_line(&event) {
                    println!("{line}");
                }
            }
            Event::IntentIgnored { intent, reason } => {
                println!("{}", render::ignored_line(&intent, reason));
            }
            Event::Narration(_) => {}
        }
        Ok(Flow::Continue)
    }
}

enum Received {
    Event(Event),
    Lagged,
    Closed,
}

fn received(result: std::result::Result<Event, RecvError>) -> Received {
    match result {
        Ok(event) => Received::Event(event),
        Err(RecvError::Lagged(skipped)) => {
            warn!(target: "client::app", skipped, "event receiver lagged");
            Received::Lagged
        }
        Err(RecvError::Closed) => Received::Closed,
    }
}
