use serde::{Deserialize, Serialize};

/// Spring parameters in the tension/friction form used by mobile UI toolkits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub tension: f64,
    pub friction: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            tension: 30.,
            friction: 7.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EasingConfig {
    pub duration_ms: u32,
    pub curve: AnimationCurve,
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250,
            curve: AnimationCurve::EaseOutCubic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationCurve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

/// Global animation switches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animations {
    /// Jump straight to every animation target.
    pub off: bool,
    /// Slow down (> 1) or speed up (< 1) every animation.
    pub slowdown: f64,
    /// Replaces the spring with a fixed-duration curve when set.
    pub easing: Option<EasingConfig>,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            off: false,
            slowdown: 1.,
            easing: None,
        }
    }
}

/// Resolved parameters for one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub kind: AnimationKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    Spring(SpringConfig),
    Easing(EasingConfig),
}

impl Animation {
    pub fn resolve(animations: &Animations, spring: SpringConfig) -> Self {
        let kind = match animations.easing {
            Some(easing) => AnimationKind::Easing(easing),
            None => AnimationKind::Spring(spring),
        };
        Self {
            off: animations.off,
            kind,
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::resolve(&Animations::default(), SpringConfig::default())
    }
}
