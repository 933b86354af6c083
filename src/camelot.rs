//! Camelot wheel model for harmonic mixing.
//!
//! The wheel has 12 positions on two rings: `A` (minor) and `B` (major).
//! Neighbouring positions on the same ring, and the same position across
//! rings, mix cleanly. [`compatibility`] turns that into a small integer
//! score the sequencer weighs against tempo.

use std::collections::HashMap;
use std::fmt;

/// Score for two identical keys.
pub const PERFECT_MATCH: u8 = 3;
/// Score for an adjacent position or the relative major/minor.
pub const GOOD_MATCH: u8 = 2;
/// Score for two steps apart on the same ring.
pub const MODERATE_MATCH: u8 = 1;
/// Score for everything else, including unparseable keys.
pub const NO_MATCH: u8 = 0;

const WHEEL_SIZE: u8 = 12;

lazy_static::lazy_static! {
    /// Canonical key name to Camelot notation, enharmonic spellings included.
    static ref CAMELOT_KEY_MAP: HashMap<&'static str, &'static str> = [
        // Major keys, outer ring
        ("C", "8B"), ("C#", "3B"), ("Db", "3B"), ("D", "10B"), ("D#", "5B"),
        ("Eb", "5B"), ("E", "12B"), ("F", "7B"), ("F#", "2B"), ("Gb", "2B"),
        ("G", "9B"), ("G#", "4B"), ("Ab", "4B"), ("A", "11B"), ("A#", "6B"),
        ("Bb", "6B"), ("B", "1B"),
        // Minor keys, inner ring
        ("Cm", "5A"), ("C#m", "12A"), ("Dbm", "12A"), ("Dm", "7A"), ("D#m", "2A"),
        ("Ebm", "2A"), ("Em", "9A"), ("Fm", "4A"), ("F#m", "11A"), ("Gbm", "11A"),
        ("Gm", "6A"), ("G#m", "1A"), ("Abm", "1A"), ("Am", "8A"), ("A#m", "3A"),
        ("Bbm", "3A"), ("Bm", "10A"),
    ]
    .into_iter()
    .collect();
}

/// Look up the Camelot notation for a canonical key name such as `"Ebm"`.
///
/// Returns `None` for empty or unrecognised names; the cleaner turns that
/// into the `"Unknown"` sentinel.
#[must_use]
pub fn camelot_for_key(key: &str) -> Option<&'static str> {
    CAMELOT_KEY_MAP.get(key).copied()
}

/// Ring of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    /// Minor keys.
    A,
    /// Major keys.
    B,
}

/// A parsed Camelot key, e.g. `8B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CamelotKey {
    position: u8,
    wheel: Wheel,
}

impl CamelotKey {
    /// Parse `<1-12><A|B>`. Anything else, the `"Unknown"` sentinel included,
    /// yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (digits, wheel) = if let Some(digits) = text.strip_suffix('A') {
            (digits, Wheel::A)
        } else {
            (text.strip_suffix('B')?, Wheel::B)
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let position: u8 = digits.parse().ok()?;
        (1..=WHEEL_SIZE)
            .contains(&position)
            .then_some(Self { position, wheel })
    }

    #[must_use]
    pub const fn position(self) -> u8 {
        self.position
    }

    #[must_use]
    pub const fn wheel(self) -> Wheel {
        self.wheel
    }

    /// Steps between two positions when walking the shorter way round.
    fn distance(self, other: Self) -> u8 {
        let diff = self.position.abs_diff(other.position);
        diff.min(WHEEL_SIZE - diff)
    }
}

impl fmt::Display for CamelotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.wheel {
            Wheel::A => 'A',
            Wheel::B => 'B',
        };
        write!(f, "{}{letter}", self.position)
    }
}

/// Score how well two Camelot keys mix, from 0 (clash) to 3 (same key).
///
/// Identical strings always score 3, even two `"Unknown"` sentinels. Any
/// other pair where one side fails to parse scores 0.
///
/// ```
/// use setflow::camelot::compatibility;
///
/// assert_eq!(compatibility("5B", "6B"), 2);
/// assert_eq!(compatibility("1B", "12B"), 2);
/// assert_eq!(compatibility("5B", "5A"), 2);
/// assert_eq!(compatibility("Unknown", "5B"), 0);
/// ```
#[must_use]
pub fn compatibility(key_a: &str, key_b: &str) -> u8 {
    if key_a == key_b {
        return PERFECT_MATCH;
    }

    let (Some(a), Some(b)) = (CamelotKey::parse(key_a), CamelotKey::parse(key_b)) else {
        return NO_MATCH;
    };

    match (a.wheel == b.wheel, a.distance(b)) {
        (true, 1) => GOOD_MATCH,
        (true, 2) => MODERATE_MATCH,
        (true, _) => NO_MATCH,
        (false, 0) => GOOD_MATCH,
        (false, _) => NO_MATCH,
    }
}
