//! Viewer-side plugins: scene assembly, camera controls and the debug HUD.

mod hud_plugin;
mod orbit_camera;
mod world_plugin;

pub use hud_plugin::HudPlugin;
pub use orbit_camera::OrbitCameraPlugin;
pub use world_plugin::WorldPlugin;
