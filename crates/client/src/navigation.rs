//! Screen graph walked by the terminal front end.

use game_core::{Screen, SessionHandoff};

/// A choice offered on a non-battle screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Continue,
    Retry,
    Title,
}

/// Where `choice` leads from `screen`, or `None` if the screen does not offer it.
pub fn next_screen(screen: Screen, choice: Choice, handoff: &SessionHandoff) -> Option<Screen> {
    use Screen::*;

    let next = match (screen, choice) {
        (Index, Choice::Continue) => Start,
        (Start, Choice::Continue) => Battle1,
        (Victory1, Choice::Continue) => Select,
        (Select, Choice::Continue) => Battle2,
        (Result1, Choice::Continue) => EndingB,
        (Victory2, Choice::Continue) if handoff.from_defeat() => EndingC,
        (Victory2, Choice::Continue) => EndingA,
        (Result2, Choice::Continue) => EndingC,

        (Victory1 | Result1 | EndingB, Choice::Retry) => Battle1,
        (Victory2 | Result2 | EndingA | EndingC, Choice::Retry) => Battle2,

        (Battle1 | Battle2 | Index, Choice::Title) => return None,
        (_, Choice::Title) => Index,
        _ => return None,
    };
    Some(next)
}

/// Screens that announce themselves and move on without input.
pub fn follows_automatically(screen: Screen) -> Option<Screen> {
    match screen {
        Screen::Start => Some(Screen::Battle1),
        _ => None,
    }
}
