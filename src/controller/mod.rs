// CONTROLLER: Input and the per-frame update
pub mod input;
pub mod frame_loop;

pub use input::{Action, ActionSource, InputState, KeyBindings};
pub use frame_loop::{FrameClock, FrameLoop, FrameOutput, FrameStats, MotionParams};
