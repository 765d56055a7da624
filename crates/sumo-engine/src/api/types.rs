use serde::{Deserialize, Serialize};

/// Which side of the shared torso a character stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSide {
    Left,
    Right,
}

impl PlayerSide {
    pub const BOTH: [PlayerSide; 2] = [PlayerSide::Left, PlayerSide::Right];

    /// Mirror sign applied to geometry and muscle targets: -1 on the left, +1 on the right.
    pub fn direction(self) -> f32 {
        match self {
            PlayerSide::Left => -1.0,
            PlayerSide::Right => 1.0,
        }
    }

    pub fn opponent(self) -> PlayerSide {
        match self {
            PlayerSide::Left => PlayerSide::Right,
            PlayerSide::Right => PlayerSide::Left,
        }
    }

    /// Index into two-element per-player arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerSide::Left => 0,
            PlayerSide::Right => 1,
        }
    }
}

/// Static scenery parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaPart {
    /// The long floor segment. Touching it with a head or foot loses the round.
    Ground,
    /// The safe strip in the middle. Feet may stand here, heads may not.
    Mat,
}

/// What a character-owned shape is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeRole {
    Head,
    Foot,
    Limb,
}

/// Identity tag attached to every collision shape, resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    /// Untagged shape: collides normally, never scores.
    None,
    Arena(ArenaPart),
    /// The plank both characters hang from.
    Torso,
    Character { side: PlayerSide, role: ShapeRole },
}

impl ShapeTag {
    pub fn character(side: PlayerSide, role: ShapeRole) -> Self {
        ShapeTag::Character { side, role }
    }

    /// Pack into the solver's per-collider user data word.
    pub(crate) fn to_bits(self) -> u128 {
        match self {
            ShapeTag::None => 0,
            ShapeTag::Arena(ArenaPart::Ground) => 1,
            ShapeTag::Arena(ArenaPart::Mat) => 2,
            ShapeTag::Torso => 3,
            ShapeTag::Character { side, role } => {
                let role_bits = match role {
                    ShapeRole::Head => 0,
                    ShapeRole::Foot => 1,
                    ShapeRole::Limb => 2,
                };
                0x10 | ((side.index() as u128) << 2) | role_bits
            }
        }
    }

    pub(crate) fn from_bits(bits: u128) -> Self {
        match bits {
            1 => ShapeTag::Arena(ArenaPart::Ground),
            2 => ShapeTag::Arena(ArenaPart::Mat),
            3 => ShapeTag::Torso,
            b if b & 0x10 != 0 => {
                let side = if (b >> 2) & 1 == 0 { PlayerSide::Left } else { PlayerSide::Right };
                let role = match b & 0b11 {
                    0 => ShapeRole::Head,
                    1 => ShapeRole::Foot,
                    _ => ShapeRole::Limb,
                };
                ShapeTag::Character { side, role }
            }
            _ => ShapeTag::None,
        }
    }
}

/// Gameplay event produced by the match and forwarded to the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A character touched the ground with its head or foot and went limp.
    Killed { side: PlayerSide },
    /// `side` scored; totals after the increment.
    Scored { side: PlayerSide, left: u32, right: u32 },
    /// A round reset will run after `delay` seconds.
    ResetScheduled { delay: f32 },
    /// Torso and both characters were teleported back to the spawn pose.
    MatchReset,
}
