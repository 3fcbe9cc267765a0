//! Platform-independent core of the walkable gallery.
//!
//! Nothing here touches the browser: the web crate gathers input and device
//! signals, calls into these modules, and applies the returned commands to
//! the DOM, WebGPU and WebAudio.

pub mod audio;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod interaction;
pub mod mesh;
pub mod navigation;
pub mod scene;
pub mod session;
pub mod uniforms;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::CameraState;
pub use catalog::{PaintingRecord, PlacedPainting};
pub use config::GalleryConfig;
pub use device::{ControlVariant, DeviceProfile, DeviceSignals};
pub use error::{CatalogError, SceneError};
pub use interaction::{InteractionPhase, Notice, UiCommand};
pub use navigation::{MovementIntent, NavigationInput};
pub use scene::SceneDesc;
pub use session::{CompletionQueue, SessionState};
