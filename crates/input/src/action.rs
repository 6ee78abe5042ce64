use std::str::FromStr;

/// Logical keys the battle responds to.
///
/// Front ends translate their own key codes into these; everything else is
/// ignored before it reaches the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    E,
    F,
    L,
    P,
    O,
    H,
    Space,
    Escape,
}

/// A discrete command fired once on key press.
///
/// Movement is not an action: W/A/S/D are held intents tracked by
/// [`InputState`](crate::InputState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Active unit attacks along its facing.
    Attack,
    /// End the active unit's turn now.
    PassTurn,
    /// Swap first-person and third-person.
    TogglePerson,
    /// Detach into the free-fly camera.
    FreeFly,
    Perspective,
    Orthographic,
    ToggleHud,
    Quit,
}

impl Key {
    /// The action a press of this key fires, if it is not a held intent.
    pub fn action(self) -> Option<Action> {
        match self {
            Key::E => Some(Action::Attack),
            Key::Space => Some(Action::PassTurn),
            Key::F => Some(Action::TogglePerson),
            Key::L => Some(Action::FreeFly),
            Key::P => Some(Action::Perspective),
            Key::O => Some(Action::Orthographic),
            Key::H => Some(Action::ToggleHud),
            Key::Escape => Some(Action::Quit),
            Key::W | Key::A | Key::S | Key::D => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown key: {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    /// Parses single letters (either case), `space` and `esc`/`escape`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "w" => Key::W,
            "a" => Key::A,
            "s" => Key::S,
            "d" => Key::D,
            "e" => Key::E,
            "f" => Key::F,
            "l" => Key::L,
            "p" => Key::P,
            "o" => Key::O,
            "h" => Key::H,
            "space" | " " => Key::Space,
            "esc" | "escape" => Key::Escape,
            _ => return Err(UnknownKey(s.to_string())),
        };
        Ok(key)
    }
}
