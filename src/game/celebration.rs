//! Celebration effects shown when the class asks for one.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Celebration {
    Balloons,
    Success,
    Snow,
}

impl Celebration {
    pub const ALL: [Celebration; 3] = [Celebration::Balloons, Celebration::Success, Celebration::Snow];

    /// Pick one uniformly.
    pub fn pick(rng: &mut GameRng) -> Self {
        rng.choose(&Self::ALL).copied().unwrap_or(Celebration::Success)
    }

    /// Banner text for effects that show a message.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Celebration::Success => Some("¡Felicidades, gran trabajo! 🎉"),
            Celebration::Balloons | Celebration::Snow => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_is_seeded() {
        let a: Vec<_> = {
            let mut rng = GameRng::new(4);
            (0..8).map(|_| Celebration::pick(&mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = GameRng::new(4);
            (0..8).map(|_| Celebration::pick(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_message() {
        assert!(Celebration::Success.message().is_some());
        assert!(Celebration::Snow.message().is_none());
    }
}
