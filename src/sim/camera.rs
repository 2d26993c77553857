//! Multi-target framing camera
//!
//! Keeps every tracked body on screen: the target center is the mean of the
//! body centers and the target scale fits their padded bounding box into the
//! viewport. Live center and scale ease toward their targets each update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SimError;

/// Smoothing, zoom bounds, and framing padding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Fraction of the remaining center offset closed per update
    pub position_smoothing: f32,
    /// Fraction of the remaining scale difference closed per update
    pub scale_smoothing: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// World units kept visible beyond the outermost bodies, per side
    pub padding_x: f32,
    pub padding_y: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position_smoothing: 0.1,
            scale_smoothing: 0.05,
            min_scale: 0.6,
            max_scale: 1.0,
            padding_x: 250.0,
            padding_y: 150.0,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), SimError> {
        let in_unit = |f: f32| f > 0.0 && f <= 1.0;
        if !in_unit(self.position_smoothing) || !in_unit(self.scale_smoothing) {
            return Err(SimError::InvalidSettings("camera smoothing must be in (0, 1]"));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(SimError::InvalidSettings("camera needs 0 < min_scale <= max_scale"));
        }
        if self.padding_x < 0.0 || self.padding_y < 0.0 {
            return Err(SimError::InvalidSettings("camera padding must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Live world-space center
    pub center: Vec2,
    /// Live zoom, always within [min_scale, max_scale]
    pub scale: f32,
    pub target_center: Vec2,
    pub target_scale: f32,
    /// Viewport size in screen pixels
    pub viewport: Vec2,
    pub settings: CameraSettings,
}

impl Camera {
    /// Create a camera already settled on `targets`
    pub fn new(targets: &[Vec2], viewport: Vec2, settings: CameraSettings) -> Result<Self, SimError> {
        settings.validate()?;
        if targets.is_empty() {
            return Err(SimError::NoCameraTargets);
        }
        let mut camera = Self {
            center: Vec2::ZERO,
            scale: settings.max_scale,
            target_center: Vec2::ZERO,
            target_scale: settings.max_scale,
            viewport,
            settings,
        };
        camera.retarget(targets);
        camera.center = camera.target_center;
        camera.scale = camera.target_scale;
        Ok(camera)
    }

    /// Zoom that fits `targets` plus padding into the viewport, clamped
    ///
    /// Falls back to `max_scale` when the fit is undefined (no targets or a
    /// zero-sized required extent on either axis).
    pub fn fit_scale(&self, targets: &[Vec2]) -> f32 {
        let s = &self.settings;
        let Some((min, max)) = bounds(targets) else {
            return s.max_scale;
        };

        let required = (max - min) + Vec2::new(s.padding_x, s.padding_y) * 2.0;
        let fit = self.viewport / required;
        // An undefined axis voids the whole fit
        if fit.is_nan() {
            log::warn!("camera fit undefined for {:?}, using max scale", required);
            return s.max_scale;
        }
        fit.min_element().clamp(s.min_scale, s.max_scale)
    }

    /// Recompute targets; an empty slice keeps the previous ones
    fn retarget(&mut self, targets: &[Vec2]) {
        if targets.is_empty() {
            return;
        }
        self.target_center = targets.iter().copied().sum::<Vec2>() / targets.len() as f32;
        self.target_scale = self.fit_scale(targets);
    }

    /// Retarget on the given body centers and ease toward the new framing
    pub fn update(&mut self, targets: &[Vec2]) {
        self.retarget(targets);
        let s = &self.settings;
        self.scale = crate::lerp(self.scale, self.target_scale, s.scale_smoothing)
            .clamp(s.min_scale, s.max_scale);
        self.center = self.center.lerp(self.target_center, s.position_smoothing);
    }

    /// Viewport changed; framing catches up on the next update
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// translate(viewport / 2) * scale * translate(-center)
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.scale + self.viewport * 0.5
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport * 0.5) / self.scale + self.center
    }
}

/// Component-wise min and max of a point set
fn bounds(points: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn camera(targets: &[Vec2]) -> Camera {
        Camera::new(targets, VIEWPORT, CameraSettings::default()).unwrap()
    }

    #[test]
    fn test_requires_targets() {
        assert!(matches!(
            Camera::new(&[], VIEWPORT, CameraSettings::default()),
            Err(SimError::NoCameraTargets)
        ));
    }

    #[test]
    fn test_close_bodies_zoom_to_max() {
        let cam = camera(&[Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]);
        // Required 600 x 300 fits at > 1.0, clamped to max
        assert_eq!(cam.target_scale, 1.0);
        assert_eq!(cam.center, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_spread_bodies_zoom_out() {
        let cam = camera(&[Vec2::new(0.0, 0.0), Vec2::new(1100.0, 0.0)]);
        // 1280 / 1600 = 0.8
        assert!((cam.target_scale - 0.8).abs() < 1e-6);

        let far = camera(&[Vec2::new(0.0, 0.0), Vec2::new(5000.0, 0.0)]);
        assert_eq!(far.target_scale, 0.6);
    }

    #[test]
    fn test_degenerate_fit_uses_max_scale() {
        let cam = Camera::new(
            &[Vec2::ZERO],
            Vec2::ZERO,
            CameraSettings {
                padding_x: 0.0,
                padding_y: 0.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cam.target_scale, 1.0);
        assert_eq!(cam.scale, 1.0);
    }

    #[test]
    fn test_one_undefined_axis_uses_max_scale() {
        // Width fit is 0 / 0, height fit alone would be 720 / 1200 = 0.6
        let cam = Camera::new(
            &[Vec2::ZERO],
            Vec2::new(0.0, 720.0),
            CameraSettings {
                min_scale: 0.1,
                max_scale: 2.0,
                padding_x: 0.0,
                padding_y: 600.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cam.target_scale, 2.0);
    }

    #[test]
    fn test_invalid_settings_rejected_at_construction() {
        let inverted = CameraSettings {
            min_scale: 1.0,
            max_scale: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            Camera::new(&[Vec2::ZERO], VIEWPORT, inverted),
            Err(SimError::InvalidSettings(_))
        ));

        let nan = CameraSettings {
            max_scale: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            Camera::new(&[Vec2::ZERO], VIEWPORT, nan),
            Err(SimError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_converges_on_stationary_targets() {
        let mut cam = camera(&[Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let targets = [Vec2::new(2000.0, 300.0), Vec2::new(3500.0, 500.0)];
        for _ in 0..600 {
            cam.update(&targets);
        }
        assert!((cam.center - cam.target_center).length() < 1e-2);
        assert!((cam.scale - cam.target_scale).abs() < 1e-4);
        assert_eq!(cam.target_center, Vec2::new(2750.0, 400.0));
    }

    #[test]
    fn test_screen_transform_inverts() {
        let mut cam = camera(&[Vec2::new(300.0, -200.0)]);
        cam.scale = 0.75;
        assert_eq!(cam.world_to_screen(cam.center), VIEWPORT * 0.5);

        let p = Vec2::new(123.0, 456.0);
        let back = cam.screen_to_world(cam.world_to_screen(p));
        assert!((back - p).length() < 1e-3);

        cam.resize(800.0, 600.0);
        assert_eq!(cam.world_to_screen(cam.center), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_settings_validation() {
        assert!(CameraSettings::default().validate().is_ok());
        let bad = CameraSettings {
            min_scale: 2.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = CameraSettings {
            scale_smoothing: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_scale_stays_in_bounds(
            points in prop::collection::vec((-1.0e5f32..1.0e5, -1.0e5f32..1.0e5), 1..6),
            steps in 1usize..50,
        ) {
            let targets: Vec<Vec2> = points.into_iter().map(|(x, y)| Vec2::new(x, y)).collect();
            let mut cam = camera(&targets[..1]);
            let s = cam.settings.clone();
            prop_assert!(cam.fit_scale(&targets) >= s.min_scale);
            prop_assert!(cam.fit_scale(&targets) <= s.max_scale);
            for _ in 0..steps {
                cam.update(&targets);
                prop_assert!(cam.scale >= s.min_scale && cam.scale <= s.max_scale);
                prop_assert!(cam.target_scale >= s.min_scale && cam.target_scale <= s.max_scale);
            }
        }
    }
}
