//! Scene object animator
//!
//! Idle motion and hover state for a single showcase object. The animator is
//! plain data: the Bevy side feeds it frame timings and pointer transitions and
//! copies the resulting angles and scale onto a `Transform`.
//!
//! Angles and phases accumulate in `f64` so that a 60 fps increment still
//! registers after days of uptime; they are narrowed to `f32` only when
//! handed to the scene graph.

use std::f64::consts::TAU;

/// Secondary oscillating tilt about the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Angular frequency applied to elapsed seconds
    pub frequency: f32,
    /// Peak tilt in radians
    pub amplitude: f32,
}

impl Tilt {
    pub const fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }

    /// Tilt angle at `elapsed` seconds, always within `[-amplitude, amplitude]`
    pub fn angle_at(&self, elapsed: f64) -> f32 {
        ((elapsed * f64::from(self.frequency)).sin() * f64::from(self.amplitude)) as f32
    }
}

/// Per-object animation constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorSettings {
    /// Idle rotation speed about the vertical axis (rad/s)
    pub rotation_speed: f32,
    pub tilt: Option<Tilt>,
    pub base_scale: f32,
    pub hover_scale: f32,
}

impl AnimatorSettings {
    pub const fn new(rotation_speed: f32) -> Self {
        Self {
            rotation_speed,
            tilt: None,
            base_scale: 1.0,
            hover_scale: 1.0,
        }
    }

    pub const fn with_tilt(mut self, tilt: Tilt) -> Self {
        self.tilt = Some(tilt);
        self
    }

    pub const fn with_hover_scale(mut self, hover_scale: f32) -> Self {
        self.hover_scale = hover_scale;
        self
    }
}

/// Animation state of one mounted object
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedObject {
    settings: AnimatorSettings,
    orientation_angle: f64,
    tilt_phase: f64,
    is_hovered: bool,
}

impl AnimatedObject {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            orientation_angle: 0.0,
            tilt_phase: 0.0,
            is_hovered: false,
        }
    }

    /// Advance by one frame.
    ///
    /// `delta` is the time since the previous tick and `elapsed` the time since
    /// the animation started, both in seconds. Negative deltas are ignored so
    /// the orientation never runs backwards.
    pub fn tick(&mut self, delta: f64, elapsed: f64) {
        self.orientation_angle += delta.max(0.0) * f64::from(self.settings.rotation_speed);
        self.tilt_phase = elapsed;
    }

    pub fn on_pointer_enter(&mut self) {
        self.is_hovered = true;
    }

    pub fn on_pointer_exit(&mut self) {
        self.is_hovered = false;
    }

    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    /// Accumulated rotation about the vertical axis (radians, unbounded)
    pub fn orientation_angle(&self) -> f64 {
        self.orientation_angle
    }

    /// Orientation reduced to `[0, 2π)` for building a rotation
    pub fn wrapped_orientation(&self) -> f32 {
        self.orientation_angle.rem_euclid(TAU) as f32
    }

    /// Current tilt about the horizontal axis, zero when the object has no tilt
    pub fn tilt_angle(&self) -> f32 {
        self.settings
            .tilt
            .map_or(0.0, |tilt| tilt.angle_at(self.tilt_phase))
    }

    pub fn effective_scale(&self) -> f32 {
        if self.is_hovered {
            self.settings.hover_scale
        } else {
            self.settings.base_scale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spinner(speed: f32) -> AnimatedObject {
        AnimatedObject::new(AnimatorSettings::new(speed))
    }

    #[test]
    fn test_two_unit_ticks_at_half_speed() {
        let mut object = spinner(0.5);
        object.tick(1.0, 1.0);
        object.tick(1.0, 2.0);
        assert_relative_eq!(object.orientation_angle(), 1.0);
    }

    #[test]
    fn test_many_small_deltas_match_one_large_delta() {
        let mut stepped = spinner(0.3);
        let mut single = spinner(0.3);

        let mut elapsed = 0.0;
        for _ in 0..600 {
            elapsed += 1.0 / 60.0;
            stepped.tick(1.0 / 60.0, elapsed);
        }
        single.tick(10.0, 10.0);

        assert_relative_eq!(
            stepped.orientation_angle(),
            single.orientation_angle(),
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_small_steps_still_advance_after_days_of_uptime() {
        let six_days = 6.0 * 24.0 * 3600.0;
        for speed in [0.2, 0.5] {
            let mut object = spinner(speed);
            object.tick(six_days, six_days);
            let before = object.orientation_angle();

            let mut elapsed = six_days;
            for _ in 0..600 {
                elapsed += 1.0 / 60.0;
                object.tick(1.0 / 60.0, elapsed);
            }

            let advanced = object.orientation_angle() - before;
            assert_relative_eq!(advanced, 10.0 * f64::from(speed), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_wrapped_orientation_stays_in_one_turn() {
        let mut object = spinner(0.5);
        object.tick(1_000_000.0, 0.0);
        let wrapped = object.wrapped_orientation();
        assert!((0.0..std::f32::consts::TAU).contains(&wrapped));
        assert_relative_eq!(
            f64::from(wrapped),
            object.orientation_angle().rem_euclid(TAU),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_orientation_never_decreases() {
        let mut object = spinner(0.2);
        let mut previous = object.orientation_angle();
        for (delta, elapsed) in [(0.016, 0.016), (0.0, 0.016), (-0.5, 0.02), (0.1, 0.12)] {
            object.tick(delta, elapsed);
            assert!(object.orientation_angle() >= previous);
            previous = object.orientation_angle();
        }
    }

    #[test]
    fn test_tilt_stays_within_amplitude() {
        let tilt = Tilt::new(0.1, 0.03);
        let mut object = AnimatedObject::new(AnimatorSettings::new(0.2).with_tilt(tilt));
        for step in 0..2000 {
            let elapsed = f64::from(step) * 0.37;
            object.tick(0.37, elapsed);
            let angle = object.tilt_angle();
            assert!(angle.abs() <= tilt.amplitude + f32::EPSILON);
            assert_relative_eq!(angle, tilt.angle_at(elapsed));
        }
    }

    #[test]
    fn test_tilt_is_absolute_not_accumulated() {
        let mut object =
            AnimatedObject::new(AnimatorSettings::new(0.2).with_tilt(Tilt::new(0.1, 0.03)));
        object.tick(5.0, 5.0);
        object.tick(5.0, 5.0);
        assert_relative_eq!(object.tilt_angle(), (0.5f32).sin() * 0.03, epsilon = 1e-6);
    }

    #[test]
    fn test_no_tilt_is_flat() {
        let mut object = spinner(0.5);
        object.tick(3.0, 3.0);
        assert_eq!(object.tilt_angle(), 0.0);
    }

    #[test]
    fn test_hover_sequence_scales() {
        let mut object = AnimatedObject::new(AnimatorSettings::new(0.5).with_hover_scale(1.12));
        let mut scales = Vec::new();

        object.on_pointer_enter();
        scales.push(object.effective_scale());
        object.on_pointer_exit();
        scales.push(object.effective_scale());
        object.on_pointer_enter();
        scales.push(object.effective_scale());

        assert_eq!(scales, vec![1.12, 1.0, 1.12]);
    }

    #[test]
    fn test_last_pointer_event_wins() {
        let mut object = AnimatedObject::new(AnimatorSettings::new(0.5).with_hover_scale(1.05));
        object.on_pointer_exit();
        object.on_pointer_exit();
        assert_eq!(object.effective_scale(), 1.0);

        object.on_pointer_enter();
        object.on_pointer_enter();
        assert!(object.is_hovered());
        assert_eq!(object.effective_scale(), 1.05);
    }
}
