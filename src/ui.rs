//! Physics tuning widgets
//!
//! Plain value types. The host binds them to whatever controls it has (DOM
//! range inputs and text fields on the web) and reads physics parameters
//! and velocity overrides back out.

use glam::Vec2;

use crate::sim::PhysicsParams;

/// A bounded numeric control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    value: f32,
}

impl Slider {
    pub fn new(label: &'static str, min: f32, max: f32, value: f32) -> Self {
        let mut slider = Self {
            label,
            min,
            max,
            value: min,
        };
        slider.set(value);
        slider
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped to the slider range. NaN is ignored.
    pub fn set(&mut self, value: f32) {
        if !value.is_nan() {
            self.value = value.clamp(self.min, self.max);
        }
    }

    /// Position of the knob along the track (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    /// Set from a knob position along the track (e.g. pointer drag)
    pub fn set_fraction(&mut self, t: f32) {
        let t = t.clamp(0.0, 1.0);
        self.set(self.min + t * (self.max - self.min));
    }

    /// Display text, e.g. `Gravity: 0.50`
    pub fn display(&self) -> String {
        format!("{}: {:.2}", self.label, self.value)
    }
}

/// A text field holding a number. Bad input reverts to the last good value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    pub label: &'static str,
    pub text: String,
    value: f32,
}

impl NumberField {
    pub fn new(label: &'static str, value: f32) -> Self {
        Self {
            label,
            text: format_number(value),
            value,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Replace the text being edited (not yet committed)
    pub fn edit(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Parse the edited text. On success the value updates and is returned;
    /// otherwise the text reverts.
    pub fn commit(&mut self) -> Option<f32> {
        match parse_number(&self.text) {
            Some(v) => {
                self.value = v;
                self.text = format_number(v);
                Some(v)
            }
            None => {
                log::warn!("{}: '{}' is not a number", self.label, self.text);
                self.text = format_number(self.value);
                None
            }
        }
    }

    /// Show a value without committing it (e.g. live ball velocity)
    pub fn show(&mut self, value: f32) {
        self.value = value;
        self.text = format_number(value);
    }
}

/// Finite number from user text, surrounding whitespace allowed
pub fn parse_number(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn format_number(value: f32) -> String {
    format!("{:.2}", value)
}

/// HUD power readout, whole units only
pub fn power_readout(power: f32) -> String {
    power.floor().to_string()
}

/// HUD angle readout in whole degrees
pub fn angle_readout(angle_deg: f32) -> String {
    format!("{:.0}°", angle_deg)
}

/// Physics parameters exposed on the tuning panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningControl {
    Gravity,
    Bounciness,
    Friction,
    TimeScale,
}

impl TuningControl {
    pub const ALL: [TuningControl; 4] = [
        TuningControl::Gravity,
        TuningControl::Bounciness,
        TuningControl::Friction,
        TuningControl::TimeScale,
    ];

    /// Element id of the matching range input
    pub fn dom_id(&self) -> &'static str {
        match self {
            TuningControl::Gravity => "gravity-slider",
            TuningControl::Bounciness => "bounciness-slider",
            TuningControl::Friction => "friction-slider",
            TuningControl::TimeScale => "time-scale-slider",
        }
    }
}

/// Element ids the web host looks up in `index.html`
pub mod dom {
    pub const CANVAS: &str = "canvas";
    pub const LOADING: &str = "loading";
    pub const HUD: &str = "hud";
    pub const HUD_SCORE: &str = "#hud-score .hud-value";
    pub const HUD_ANGLE: &str = "#hud-angle .hud-value";
    pub const HUD_POWER: &str = "#hud-power .hud-value";
    pub const CELEBRATION_BANNER: &str = "celebration-banner";
    pub const TUNING_PANEL: &str = "tuning-panel";
    pub const VELOCITY_X: &str = "velocity-x";
    pub const VELOCITY_Y: &str = "velocity-y";
    pub const APPLY_VELOCITY: &str = "apply-velocity-btn";

    /// Label element shown next to a slider
    pub fn label_id(slider_id: &str) -> String {
        format!("{}-label", slider_id)
    }
}

/// Sliders for the physics parameters plus velocity fields for debugging
#[derive(Debug, Clone, PartialEq)]
pub struct TuningPanel {
    pub gravity: Slider,
    pub bounciness: Slider,
    pub friction: Slider,
    pub time_scale: Slider,
    pub velocity_x: NumberField,
    pub velocity_y: NumberField,
}

impl Default for TuningPanel {
    fn default() -> Self {
        Self::from_params(&PhysicsParams::default())
    }
}

impl TuningPanel {
    pub fn from_params(params: &PhysicsParams) -> Self {
        Self {
            gravity: Slider::new("Gravity", 0.0, 2.0, params.gravity),
            bounciness: Slider::new("Bounciness", 0.0, 1.0, params.bounciness),
            friction: Slider::new("Friction", 0.0, 1.0, params.friction),
            time_scale: Slider::new("Time Scale", 0.1, 3.0, params.time_scale),
            velocity_x: NumberField::new("Velocity X", 0.0),
            velocity_y: NumberField::new("Velocity Y", 0.0),
        }
    }

    pub fn slider(&self, control: TuningControl) -> &Slider {
        match control {
            TuningControl::Gravity => &self.gravity,
            TuningControl::Bounciness => &self.bounciness,
            TuningControl::Friction => &self.friction,
            TuningControl::TimeScale => &self.time_scale,
        }
    }

    pub fn slider_mut(&mut self, control: TuningControl) -> &mut Slider {
        match control {
            TuningControl::Gravity => &mut self.gravity,
            TuningControl::Bounciness => &mut self.bounciness,
            TuningControl::Friction => &mut self.friction,
            TuningControl::TimeScale => &mut self.time_scale,
        }
    }

    /// Current slider values as physics parameters
    pub fn params(&self) -> PhysicsParams {
        PhysicsParams {
            gravity: self.gravity.value(),
            bounciness: self.bounciness.value(),
            friction: self.friction.value(),
            time_scale: self.time_scale.value(),
        }
    }

    /// Commit both velocity fields. Only returns a velocity when both parse.
    pub fn commit_velocity(&mut self) -> Option<Vec2> {
        let x = self.velocity_x.commit();
        let y = self.velocity_y.commit();
        Some(Vec2::new(x?, y?))
    }

    /// Mirror the live ball velocity into the fields
    pub fn show_velocity(&mut self, vel: Vec2) {
        self.velocity_x.show(vel.x);
        self.velocity_y.show(vel.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_clamps() {
        let mut s = Slider::new("Bounciness", 0.0, 1.0, 3.0);
        assert_eq!(s.value(), 1.0);
        s.set(-0.5);
        assert_eq!(s.value(), 0.0);
        s.set(f32::NAN);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn test_slider_fraction() {
        let mut s = Slider::new("Time Scale", 0.1, 3.0, 0.1);
        assert_eq!(s.fraction(), 0.0);
        s.set_fraction(1.5);
        assert_eq!(s.value(), 3.0);
        s.set_fraction(0.5);
        assert!((s.value() - 1.55).abs() < 1e-5);
        assert!((s.fraction() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_slider_display() {
        let s = Slider::new("Gravity", 0.0, 2.0, 0.5);
        assert_eq!(s.display(), "Gravity: 0.50");
    }

    #[test]
    fn test_number_field_reverts_bad_input() {
        let mut f = NumberField::new("Velocity X", 3.0);
        f.edit("  7.5 ");
        assert_eq!(f.commit(), Some(7.5));
        assert_eq!(f.text, "7.50");

        f.edit("fast");
        assert_eq!(f.commit(), None);
        assert_eq!(f.value(), 7.5);
        assert_eq!(f.text, "7.50");

        f.edit("inf");
        assert_eq!(f.commit(), None);
    }

    #[test]
    fn test_panel_round_trips_params() {
        let params = PhysicsParams {
            gravity: 0.8,
            bounciness: 0.6,
            friction: 0.2,
            time_scale: 1.5,
        };
        assert_eq!(TuningPanel::from_params(&params).params(), params);
    }

    #[test]
    fn test_panel_bounds_out_of_range_params() {
        let params = PhysicsParams {
            gravity: -1.0,
            bounciness: 4.0,
            friction: 0.1,
            time_scale: 0.0,
        };
        let bounded = TuningPanel::from_params(&params).params();
        assert_eq!(bounded.gravity, 0.0);
        assert_eq!(bounded.bounciness, 1.0);
        assert_eq!(bounded.time_scale, 0.1);
    }

    #[test]
    fn test_commit_velocity_needs_both_fields() {
        let mut panel = TuningPanel::default();
        panel.velocity_x.edit("4");
        panel.velocity_y.edit("-2.5");
        assert_eq!(panel.commit_velocity(), Some(Vec2::new(4.0, -2.5)));

        panel.velocity_y.edit("oops");
        assert_eq!(panel.commit_velocity(), None);
        // x still committed, y reverted
        assert_eq!(panel.velocity_x.value(), 4.0);
        assert_eq!(panel.velocity_y.value(), -2.5);
    }

    #[test]
    fn test_hud_readouts_show_whole_units() {
        assert_eq!(power_readout(0.0), "0");
        assert_eq!(power_readout(7.5), "7");
        assert_eq!(power_readout(24.5), "24");
        assert_eq!(power_readout(25.0), "25");
        assert_eq!(angle_readout(60.0), "60°");
    }

    #[test]
    fn test_page_declares_every_host_element() {
        let page = include_str!("../index.html");
        let has_id = |id: &str| page.contains(&format!("id=\"{}\"", id));

        for id in [
            dom::CANVAS,
            dom::LOADING,
            dom::HUD,
            dom::CELEBRATION_BANNER,
            dom::TUNING_PANEL,
            dom::VELOCITY_X,
            dom::VELOCITY_Y,
            dom::APPLY_VELOCITY,
            "hud-score",
            "hud-angle",
            "hud-power",
        ] {
            assert!(has_id(id), "index.html is missing #{id}");
        }
        for control in TuningControl::ALL {
            assert!(has_id(control.dom_id()), "missing slider {}", control.dom_id());
            assert!(has_id(&dom::label_id(control.dom_id())));
        }
        assert_eq!(page.matches("class=\"hud-value\"").count(), 3);
        assert!(page.contains("data-trunk rel=\"rust\""));
    }

    #[test]
    fn test_slider_lookup_by_control() {
        let mut panel = TuningPanel::default();
        panel.slider_mut(TuningControl::Friction).set(0.4);
        assert_eq!(panel.slider(TuningControl::Friction).value(), 0.4);
        assert_eq!(panel.params().friction, 0.4);
        assert_eq!(TuningControl::TimeScale.dom_id(), "time-scale-slider");
    }
}
