use crate::api::types::PlayerSide;
use crate::input::queue::Key;

/// What a bound key does to one character's control targets.
/// `stretch` and `angle` are signs (-1, 0, +1), scaled by the configured ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub side: PlayerSide,
    pub stretch: f32,
    pub angle: f32,
}

const fn bind(side: PlayerSide, stretch: f32, angle: f32) -> Binding {
    Binding { side, stretch, angle }
}

/// The static key table: flex/extend and lean for each character.
pub const BINDINGS: [(Key, Binding); 8] = [
    (Key::W, bind(PlayerSide::Left, 1.0, 0.0)),
    (Key::S, bind(PlayerSide::Left, -1.0, 0.0)),
    (Key::D, bind(PlayerSide::Left, 0.0, 1.0)),
    (Key::A, bind(PlayerSide::Left, 0.0, -1.0)),
    (Key::Up, bind(PlayerSide::Right, 1.0, 0.0)),
    (Key::Down, bind(PlayerSide::Right, -1.0, 0.0)),
    (Key::Left, bind(PlayerSide::Right, 0.0, 1.0)),
    (Key::Right, bind(PlayerSide::Right, 0.0, -1.0)),
];

/// Look up the binding for a key. Unbound keys (escape) return `None`.
pub fn binding_for(key: Key) -> Option<Binding> {
    BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, binding)| *binding)
}
