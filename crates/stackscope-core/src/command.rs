//! Command vocabulary.
//!
//! A sort trace is a whitespace-separated stream of the eleven mnemonics
//! below. Matching is byte-exact and case-sensitive.

use std::fmt;

/// One stack-manipulation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Swap the two topmost values of A.
    Sa,
    /// Swap the two topmost values of B.
    Sb,
    /// `sa` and `sb` together.
    Ss,
    /// Move the top of B onto A.
    Pa,
    /// Move the top of A onto B.
    Pb,
    /// Rotate A (top goes to the bottom).
    Ra,
    /// Rotate B.
    Rb,
    /// `ra` and `rb` together.
    Rr,
    /// Reverse-rotate A (bottom comes to the top).
    Rra,
    /// Reverse-rotate B.
    Rrb,
    /// `rra` and `rrb` together.
    Rrr,
}

impl Command {
    /// Every command, in table order.
    pub const ALL: [Command; 11] = [
        Command::Sa,
        Command::Sb,
        Command::Ss,
        Command::Pa,
        Command::Pb,
        Command::Ra,
        Command::Rb,
        Command::Rr,
        Command::Rra,
        Command::Rrb,
        Command::Rrr,
    ];

    /// Parse a token. `None` if it is not in the vocabulary.
    pub fn parse(token: &[u8]) -> Option<Self> {
        let command = match token {
            b"sa" => Command::Sa,
            b"sb" => Command::Sb,
            b"ss" => Command::Ss,
            b"pa" => Command::Pa,
            b"pb" => Command::Pb,
            b"ra" => Command::Ra,
            b"rb" => Command::Rb,
            b"rr" => Command::Rr,
            b"rra" => Command::Rra,
            b"rrb" => Command::Rrb,
            b"rrr" => Command::Rrr,
            _ => return None,
        };
        Some(command)
    }

    /// Wire mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Command::Sa => "sa",
            Command::Sb => "sb",
            Command::Ss => "ss",
            Command::Pa => "pa",
            Command::Pb => "pb",
            Command::Ra => "ra",
            Command::Rb => "rb",
            Command::Rr => "rr",
            Command::Rra => "rra",
            Command::Rrb => "rrb",
            Command::Rrr => "rrr",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
