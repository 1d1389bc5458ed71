use std::env;
use std::path::{Path, PathBuf};

use crate::controller::{KeyBindings, MotionParams};

const SHADER_DIR_NAME: &str = "shaders";
pub const VERTEX_SHADER_FILE: &str = "triangle.vert.wgsl";
pub const FRAGMENT_SHADER_FILE: &str = "triangle.frag.wgsl";

#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    /// Logical pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "trispin - arrows move, A/D rotate".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Everything tunable about the demo. There is no config file; embedders
/// override the public fields directly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub window: WindowSettings,
    pub motion: MotionParams,
    pub bindings: KeyBindings,
    pub clear_color: [f64; 4],
    pub shader_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            motion: MotionParams::default(),
            bindings: KeyBindings::default(),
            clear_color: [0.1, 0.1, 0.1, 1.0],
            shader_dir: default_shader_dir(),
        }
    }
}

impl Settings {
    pub fn vertex_shader_path(&self) -> PathBuf {
        self.shader_dir.join(VERTEX_SHADER_FILE)
    }

    pub fn fragment_shader_path(&self) -> PathBuf {
        self.shader_dir.join(FRAGMENT_SHADER_FILE)
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }
}

fn default_shader_dir() -> PathBuf {
    let exe_dir = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));
    shader_dir_near(exe_dir.as_deref())
}

/// `shaders/` next to the executable when it exists, else relative to the working directory.
fn shader_dir_near(exe_dir: Option<&Path>) -> PathBuf {
    match exe_dir.map(|dir| dir.join(SHADER_DIR_NAME)) {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from(SHADER_DIR_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.window.width, 800);
        assert_eq!(s.window.height, 600);
        assert_eq!(s.motion, MotionParams::default());
        assert_eq!(s.clear_color(), wgpu::Color { r: 0.1, g: 0.1, b: 0.1, a: 1.0 });
        assert!(s.vertex_shader_path().ends_with("shaders/triangle.vert.wgsl"));
        assert!(s.fragment_shader_path().ends_with("shaders/triangle.frag.wgsl"));
    }

    #[test]
    fn test_field_overrides() {
        let s = Settings {
            shader_dir: PathBuf::from("/tmp/elsewhere"),
            motion: MotionParams { move_speed: 2.0, rot_speed: 1.0 },
            ..Settings::default()
        };
        assert_eq!(s.vertex_shader_path(), PathBuf::from("/tmp/elsewhere/triangle.vert.wgsl"));
        assert_eq!(s.motion.move_speed, 2.0);
    }

    #[test]
    fn test_default_shader_dir_is_resolved_at_runtime() {
        let s = Settings::default();
        assert!(!s.shader_dir.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(s.shader_dir.ends_with("shaders"));
    }

    #[test]
    fn test_shader_dir_next_to_executable() {
        let exe_dir = env::temp_dir().join(format!("trispin-exe-{}", std::process::id()));
        std::fs::create_dir_all(exe_dir.join("shaders")).unwrap();
        assert_eq!(shader_dir_near(Some(&exe_dir)), exe_dir.join("shaders"));
        std::fs::remove_dir_all(&exe_dir).unwrap();
    }

    #[test]
    fn test_shader_dir_falls_back_to_working_directory() {
        let missing = env::temp_dir().join("trispin-no-such-exe-dir");
        assert_eq!(shader_dir_near(Some(&missing)), PathBuf::from("shaders"));
        assert_eq!(shader_dir_near(None), PathBuf::from("shaders"));
    }
}
