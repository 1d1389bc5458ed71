use std::time::Instant;

use crate::controller::input::{Action, ActionSource};
use crate::model::{Mat4, Pose};

/// Monotonic timing state: the timestamp of the previous frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(last_time: Instant) -> Self {
        Self { last_time }
    }

    /// Seconds since the previous tick; advances the baseline.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_time).as_secs_f32();
        self.last_time = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Integration speeds for the pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Units per second along each axis.
    pub move_speed: f32,
    /// Radians per second.
    pub rot_speed: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            move_speed: 0.6,
            rot_speed: 60f32.to_radians(),
        }
    }
}

/// What one iteration hands to the view and the event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub model: Mat4,
    /// Close was requested this frame. The frame is still drawn.
    pub exit_requested: bool,
}

/// Pose integration state, owned by the loop for the process lifetime.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    pub pose: Pose,
    pub motion: MotionParams,
    margin: f32,
}

impl FrameLoop {
    pub fn new(motion: MotionParams, margin: f32) -> Self {
        Self {
            pose: Pose::default(),
            motion,
            margin,
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Integrate held actions over `dt` seconds and compose the model transform.
    pub fn step(&mut self, input: &impl ActionSource, dt: f32) -> FrameOutput {
        let step = self.motion.move_speed * dt;
        if input.is_held(Action::MoveLeft) {
            self.pose.x -= step;
        }
        if input.is_held(Action::MoveRight) {
            self.pose.x += step;
        }
        if input.is_held(Action::MoveUp) {
            self.pose.y += step;
        }
        if input.is_held(Action::MoveDown) {
            self.pose.y -= step;
        }

        let turn = self.motion.rot_speed * dt;
        if input.is_held(Action::RotatePositive) {
            self.pose.angle += turn;
        }
        if input.is_held(Action::RotateNegative) {
            self.pose.angle -= turn;
        }

        self.pose.clamp_position(self.margin);

        FrameOutput {
            model: self.pose.model_matrix(),
            exit_requested: input.is_held(Action::Exit),
        }
    }
}

/// Rolling frame-rate counter, reports once per second.
#[derive(Debug, Default, Clone)]
pub struct FrameStats {
    frame_count: u32,
    elapsed: f32,
    pub fps: f32,
}

impl FrameStats {
    /// Returns the new FPS figure when a full second has accumulated.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frame_count += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / self.elapsed;
            self.frame_count = 0;
            self.elapsed = 0.0;
            Some(self.fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{margin, TRIANGLE};
    use std::collections::HashSet;
    use std::f32::consts::{FRAC_PI_3, PI};
    use std::time::Duration;

    #[derive(Default)]
    struct Held(HashSet<Action>);

    impl Held {
        fn of(actions: &[Action]) -> Self {
            Self(actions.iter().copied().collect())
        }
    }

    impl ActionSource for Held {
        fn is_held(&self, action: Action) -> bool {
            self.0.contains(&action)
        }
    }

    const ALL: [Action; 6] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::RotatePositive,
        Action::RotateNegative,
    ];

    fn triangle_loop() -> FrameLoop {
        FrameLoop::new(MotionParams::default(), margin(&TRIANGLE))
    }

    #[test]
    fn test_right_for_one_second() {
        let mut fl = triangle_loop();
        fl.step(&Held::of(&[Action::MoveRight]), 1.0);
        assert!((fl.pose.x - 0.6).abs() < 1e-6);
        assert_eq!(fl.pose.y, 0.0);
        assert_eq!(fl.pose.angle, 0.0);
    }

    #[test]
    fn test_positive_rotation_for_one_second() {
        let mut fl = triangle_loop();
        assert!((fl.motion.rot_speed - FRAC_PI_3).abs() < 1e-6);
        fl.step(&Held::of(&[Action::RotatePositive]), 1.0);
        assert!((fl.pose.angle - FRAC_PI_3).abs() < 1e-6);

        fl.step(&Held::of(&[Action::RotateNegative]), 2.0);
        assert!((fl.pose.angle + FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut fl = triangle_loop();
        fl.pose = Pose::new(0.1, -0.2, 0.5);
        let held = Held::of(&[
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveUp,
            Action::MoveDown,
            Action::RotatePositive,
            Action::RotateNegative,
        ]);
        for dt in [0.016, 0.5, 1.0, 3.0] {
            fl.step(&held, dt);
        }
        assert!((fl.pose.x - 0.1).abs() < 1e-6);
        assert!((fl.pose.y + 0.2).abs() < 1e-6);
        assert!((fl.pose.angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut fl = triangle_loop();
        fl.step(&Held::of(&[Action::MoveRight, Action::MoveUp]), 0.5);
        assert!((fl.pose.x - 0.3).abs() < 1e-6);
        assert!((fl.pose.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_position_stays_within_margin_for_every_combination() {
        let m = margin(&TRIANGLE);
        // every subset of the six movement/rotation actions
        for mask in 0u32..(1 << ALL.len()) {
            let held = Held(
                ALL.iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1u32 << *i) != 0)
                    .map(|(_, a)| *a)
                    .collect(),
            );
            let mut fl = triangle_loop();
            for dt in [0.016, 0.25, 1.0, 10.0, 0.0, 100.0] {
                fl.step(&held, dt);
                assert!(fl.pose.x >= -m && fl.pose.x <= m, "x={} mask={mask:#b}", fl.pose.x);
                assert!(fl.pose.y >= -m && fl.pose.y <= m, "y={} mask={mask:#b}", fl.pose.y);
            }
        }
    }

    #[test]
    fn test_clamp_saturates_without_bounce() {
        let mut fl = triangle_loop();
        let m = fl.margin();
        fl.step(&Held::of(&[Action::MoveLeft, Action::MoveDown]), 10.0);
        assert_eq!(fl.pose.x, -m);
        assert_eq!(fl.pose.y, -m);
        // moving back starts from the edge, not from where integration would have left it
        fl.step(&Held::of(&[Action::MoveRight]), 1.0);
        assert!((fl.pose.x - (-m + 0.6)).abs() < 1e-6);
    }

    #[test]
    fn test_angle_is_not_wrapped() {
        let mut fl = triangle_loop();
        fl.step(&Held::of(&[Action::RotatePositive]), 12.0);
        assert!((fl.pose.angle - 4.0 * PI).abs() < 1e-4);
    }

    #[test]
    fn test_exit_still_produces_a_frame() {
        let mut fl = triangle_loop();
        let out = fl.step(&Held::of(&[Action::Exit, Action::MoveUp]), 0.5);
        assert!(out.exit_requested);
        assert!((fl.pose.y - 0.3).abs() < 1e-6);
        assert_eq!(out.model, fl.pose.model_matrix());

        let out = fl.step(&Held::default(), 0.5);
        assert!(!out.exit_requested);
    }

    #[test]
    fn test_idle_frame_is_identity() {
        let mut fl = triangle_loop();
        let out = fl.step(&Held::default(), 0.016);
        assert_eq!(out.model, Mat4::IDENTITY);
    }

    #[test]
    fn test_clock_measures_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);

        let dt = clock.tick_at(start + Duration::from_millis(1250));
        assert!((dt - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clock_never_goes_negative() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(10)), 0.0);
    }

    #[test]
    fn test_stats_report_once_per_second() {
        let mut stats = FrameStats::default();
        for _ in 0..59 {
            assert!(stats.record(1.0 / 60.0).is_none());
        }
        let fps = stats.record(1.0 / 60.0 + 1e-4).expect("a second has passed");
        assert!((fps - 60.0).abs() < 0.5);
        assert!(stats.record(0.01).is_none());
    }
}
