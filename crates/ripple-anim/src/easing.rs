//! Easing curves
//!
//! Only the declaration text matters here; the host interpolates.

/// Named easing curve for the transition declaration
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// cubic-bezier(x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Declaration text for this curve
    pub fn css(&self) -> String {
        match self {
            Easing::Linear => "linear".to_string(),
            Easing::Ease => "ease".to_string(),
            Easing::EaseIn => "ease-in".to_string(),
            Easing::EaseOut => "ease-out".to_string(),
            Easing::EaseInOut => "ease-in-out".to_string(),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                format!("cubic-bezier({},{},{},{})", x1, y1, x2, y2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_text() {
        assert_eq!(Easing::default().css(), "ease-in-out");
        assert_eq!(Easing::Linear.css(), "linear");
        assert_eq!(
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0).css(),
            "cubic-bezier(0.25,0.1,0.25,1)"
        );
    }
}
