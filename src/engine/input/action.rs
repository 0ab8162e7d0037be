// Game action definitions and symbol mappings

use serde::{Deserialize, Serialize};

/// Horizontal facing of a fighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// The opposite facing
    pub fn flip(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Signed unit along the x axis (+1 right, -1 left)
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Represents all possible in-game actions a fighter can receive
///
/// Directions are absolute (screen-space); they are translated into
/// facing-relative symbols before entering the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Punch,
    Kick,
    /// Released back to neutral
    Stop,
}

impl Action {
    /// Check if this action points downward (crouching family)
    pub fn is_downward(self) -> bool {
        matches!(self, Action::Down | Action::DownLeft | Action::DownRight)
    }

    /// Check if this action points upward (jumping family)
    pub fn is_upward(self) -> bool {
        matches!(self, Action::Up | Action::UpLeft | Action::UpRight)
    }

    /// Translate this action into the buffered symbol for the given facing.
    ///
    /// Symbols follow numpad notation where `6` is toward the fighter's
    /// facing, so a left-facing fighter has its horizontals and diagonals
    /// swapped.
    pub fn symbol(self, facing: Facing) -> Symbol {
        let mirrored = facing == Facing::Left;
        match self {
            Action::Up => Symbol::Up,
            Action::Down => Symbol::Down,
            Action::Stop => Symbol::Neutral,
            Action::Punch => Symbol::Punch,
            Action::Kick => Symbol::Kick,
            Action::Left => {
                if mirrored {
                    Symbol::Right
                } else {
                    Symbol::Left
                }
            }
            Action::Right => {
                if mirrored {
                    Symbol::Left
                } else {
                    Symbol::Right
                }
            }
            Action::UpLeft => {
                if mirrored {
                    Symbol::UpRight
                } else {
                    Symbol::UpLeft
                }
            }
            Action::UpRight => {
                if mirrored {
                    Symbol::UpLeft
                } else {
                    Symbol::UpRight
                }
            }
            Action::DownLeft => {
                if mirrored {
                    Symbol::DownRight
                } else {
                    Symbol::DownLeft
                }
            }
            Action::DownRight => {
                if mirrored {
                    Symbol::DownLeft
                } else {
                    Symbol::DownRight
                }
            }
        }
    }
}

/// A single buffered input symbol in numpad notation
///
/// Digits `1`-`9` are stick positions (5 = neutral), `P` punch, `K` kick.
/// This is the alphabet move signatures are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    DownLeft,
    Down,
    DownRight,
    Left,
    Neutral,
    Right,
    UpLeft,
    Up,
    UpRight,
    Punch,
    Kick,
}

impl Symbol {
    /// Parse a symbol from its signature character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Symbol::DownLeft),
            '2' => Some(Symbol::Down),
            '3' => Some(Symbol::DownRight),
            '4' => Some(Symbol::Left),
            '5' => Some(Symbol::Neutral),
            '6' => Some(Symbol::Right),
            '7' => Some(Symbol::UpLeft),
            '8' => Some(Symbol::Up),
            '9' => Some(Symbol::UpRight),
            'P' => Some(Symbol::Punch),
            'K' => Some(Symbol::Kick),
            _ => None,
        }
    }

    /// The signature character for this symbol
    pub fn as_char(self) -> char {
        match self {
            Symbol::DownLeft => '1',
            Symbol::Down => '2',
            Symbol::DownRight => '3',
            Symbol::Left => '4',
            Symbol::Neutral => '5',
            Symbol::Right => '6',
            Symbol::UpLeft => '7',
            Symbol::Up => '8',
            Symbol::UpRight => '9',
            Symbol::Punch => 'P',
            Symbol::Kick => 'K',
        }
    }
}
