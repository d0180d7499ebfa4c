use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Point in play-field pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Key symbol bound to an object. Always stored upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub struct KeySymbol(char);

impl KeySymbol {
    pub fn new(c: char) -> Self {
        Self(c.to_ascii_uppercase())
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl From<char> for KeySymbol {
    fn from(c: char) -> Self {
        Self::new(c)
    }
}

impl From<KeySymbol> for char {
    fn from(symbol: KeySymbol) -> Self {
        symbol.0
    }
}

impl std::fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolution state of a hit-object
///
/// ## Transition Rules
///
/// - Pending -> Active (activation time reached)
/// - Active -> Hit | Missed (judgement or expiry)
/// - Pending -> Missed (window skipped entirely by a seek)
/// - Active -> Pending (seek moved back past the activation time)
///
/// `Hit` and `Missed` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, IntoStaticStr,
)]
pub enum HitObjectState {
    #[default]
    Pending,
    Active,
    Hit,
    Missed,
}

impl HitObjectState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hit | Self::Missed)
    }

    pub fn is_valid_transition(from: HitObjectState, to: HitObjectState) -> bool {
        matches!(
            (from, to),
            (Self::Pending, Self::Active)
                | (Self::Pending, Self::Missed)
                | (Self::Active, Self::Hit)
                | (Self::Active, Self::Missed)
                | (Self::Active, Self::Pending)
        )
    }
}

impl std::fmt::Display for HitObjectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// A single interactive target tied to a point on the audio timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    /// Sequence index in the chart
    pub id: usize,
    pub position: Point,
    pub radius: f64,
    /// Seconds from chart start
    pub activation_time: f64,
    /// `activation_time + hit_window`
    pub expiry_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_binding: Option<KeySymbol>,
    #[serde(default)]
    pub state: HitObjectState,
}

impl HitObject {
    pub fn new(
        id: usize,
        position: Point,
        radius: f64,
        activation_time: f64,
        hit_window: f64,
        key_binding: Option<KeySymbol>,
    ) -> Self {
        Self {
            id,
            position,
            radius,
            activation_time,
            expiry_time: activation_time + hit_window,
            key_binding,
            state: HitObjectState::Pending,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.position.distance(point) <= self.radius
    }

    pub fn accepts_key(&self, symbol: KeySymbol) -> bool {
        self.key_binding == Some(symbol)
    }

    pub fn is_resolved(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_object() -> HitObject {
        HitObject::new(0, Point::new(100.0, 100.0), 40.0, 1.0, 1.0, Some('w'.into()))
    }

    #[test]
    fn test_expiry_derived_from_window() {
        let obj = make_object();
        assert_eq!(obj.expiry_time, 2.0);
        assert_eq!(obj.state, HitObjectState::Pending);
    }

    #[test]
    fn test_contains_boundary() {
        let obj = make_object();
        assert!(obj.contains(&Point::new(100.0, 100.0)));
        assert!(obj.contains(&Point::new(140.0, 100.0)));
        assert!(!obj.contains(&Point::new(140.1, 100.0)));
        assert!(!obj.contains(&Point::new(-5000.0, 1e9)));
    }

    #[test]
    fn test_key_symbol_normalized() {
        let obj = make_object();
        assert!(obj.accepts_key(KeySymbol::new('W')));
        assert!(obj.accepts_key(KeySymbol::new('w')));
        assert!(!obj.accepts_key(KeySymbol::new('A')));
    }

    #[test]
    fn test_pointer_only_object_rejects_keys() {
        let obj = HitObject::new(0, Point::default(), 40.0, 0.0, 1.0, None);
        assert!(!obj.accepts_key(KeySymbol::new('W')));
    }

    #[test]
    fn test_state_transitions() {
        use HitObjectState::*;
        assert!(HitObjectState::is_valid_transition(Pending, Active));
        assert!(HitObjectState::is_valid_transition(Active, Hit));
        assert!(HitObjectState::is_valid_transition(Active, Pending));
        assert!(!HitObjectState::is_valid_transition(Hit, Active));
        assert!(!HitObjectState::is_valid_transition(Missed, Pending));
        assert!(!HitObjectState::is_valid_transition(Pending, Hit));
        assert!(Hit.is_terminal() && Missed.is_terminal());
    }

    #[test]
    fn test_serde_key_symbol_lowercase_input() {
        let json = r#"{"id":0,"position":{"x":1.0,"y":2.0},"radius":40.0,
            "activation_time":1.0,"expiry_time":2.0,"key_binding":"s"}"#;
        let obj: HitObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.key_binding, Some(KeySymbol::new('S')));
        assert_eq!(obj.state, HitObjectState::Pending);
    }
}
