//! Pathfix Render - procedural scene geometry and orbit camera
//!
//! Builds renderable triangle meshes (thick lines, UV-sphere markers,
//! orientation indicators) from a corrected `PointSequence`, and drives a
//! spherical orbit camera from pointer and wheel input. Display itself is
//! left to a `Surface` implementation supplied by the host.

mod camera;
mod input;
mod primitives;
mod scene;
mod session;
mod surface;

pub use camera::{CameraState, OrbitCamera};
pub use input::{wheel_delta, OrbitController, PointerButton, SurfaceEvent};
pub use primitives::{
    color_ramp, create_thick_line, create_uv_sphere, MeshPrimitive, PrimitiveKind, Vertex,
    SPHERE_LATITUDE_BANDS, SPHERE_LONGITUDE_BANDS,
};
pub use scene::{display_angles, marker_radius, ramp_scalar, DisplayAngles, Scene, SceneBuilder};
pub use session::ViewSession;
pub use surface::{ObjSurface, PresentedFrame, RecordingSurface, Surface};
