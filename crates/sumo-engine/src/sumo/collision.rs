//! Contact classification: which touches lose the round.

use crate::api::types::{ArenaPart, PlayerSide, ShapeRole, ShapeTag};

/// Gameplay meaning of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Ordinary contact, no gameplay effect.
    Ignore,
    /// Two parts of the same articulated rig. The solver must treat the pair as non-colliding.
    SelfContact,
    /// `loser` touched the ground with its head or foot, or the mat with its head.
    Score { loser: PlayerSide },
}

impl Verdict {
    pub fn is_self_contact(self) -> bool {
        self == Verdict::SelfContact
    }
}

/// Classify a contact between two tagged shapes. Symmetric in its arguments.
pub fn classify(a: ShapeTag, b: ShapeTag) -> Verdict {
    if is_self_pair(a, b) {
        return Verdict::SelfContact;
    }
    match (scoring_side(a, b), scoring_side(b, a)) {
        (Some(loser), _) | (None, Some(loser)) => Verdict::Score { loser },
        (None, None) => Verdict::Ignore,
    }
}

/// Contact filter for the physics world: everything collides except self-contacts.
pub fn is_solid(a: ShapeTag, b: ShapeTag) -> bool {
    !classify(a, b).is_self_contact()
}

// The torso belongs to both rigs: both hips and necks are pinned into it.
fn is_self_pair(a: ShapeTag, b: ShapeTag) -> bool {
    match (a, b) {
        (ShapeTag::Character { side: sa, .. }, ShapeTag::Character { side: sb, .. }) => sa == sb,
        (ShapeTag::Torso, ShapeTag::Character { .. })
        | (ShapeTag::Character { .. }, ShapeTag::Torso) => true,
        _ => false,
    }
}

// `body` loses if it is a head touching any arena part, or a foot touching the ground.
fn scoring_side(body: ShapeTag, other: ShapeTag) -> Option<PlayerSide> {
    match (body, other) {
        (ShapeTag::Character { side, role: ShapeRole::Head }, ShapeTag::Arena(_)) => Some(side),
        (
            ShapeTag::Character { side, role: ShapeRole::Foot },
            ShapeTag::Arena(ArenaPart::Ground),
        ) => Some(side),
        _ => None,
    }
}
