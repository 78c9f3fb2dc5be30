//! Easing functions

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maps linear progress (0.0 to 1.0) to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// jQuery's default curve
    #[default]
    Swing,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to 0.0..=1.0 and both ends are exact.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::Swing => 0.5 - (t * PI).cos() / 2.0,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let k = -2.0 * t + 2.0;
                    1.0 - k * k * k / 2.0
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Swing => "swing",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = String;

    /// Accepts kebab, snake and camel spellings (`ease-in`, `ease_in`, `easeIn`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "linear" => Ok(Easing::Linear),
            "swing" => Ok(Easing::Swing),
            "easein" => Ok(Easing::EaseIn),
            "easeout" => Ok(Easing::EaseOut),
            "easeinout" => Ok(Easing::EaseInOut),
            _ => Err(format!("unknown easing '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Swing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing}");
            assert_eq!(easing.apply(1.5), 1.0, "{easing}");
            assert_eq!(easing.apply(-0.5), 0.0, "{easing}");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut last = 0.0;
            for step in 1..=20 {
                let value = easing.apply(step as f32 / 20.0);
                assert!(value >= last, "{easing} not monotonic at step {step}");
                last = value;
            }
        }
    }

    #[test]
    fn test_swing_midpoint() {
        assert!((Easing::Swing.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::Swing.apply(0.25) < 0.25);
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!("ease-in-out".parse(), Ok(Easing::EaseInOut));
        assert_eq!("easeOut".parse(), Ok(Easing::EaseOut));
        assert_eq!("ease_in".parse(), Ok(Easing::EaseIn));
        assert_eq!("SWING".parse(), Ok(Easing::Swing));
        assert!("bounce".parse::<Easing>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for easing in ALL {
            assert_eq!(easing.to_string().parse(), Ok(easing));
        }
    }
}
