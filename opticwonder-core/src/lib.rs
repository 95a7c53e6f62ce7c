pub mod config;
pub mod error;
pub mod mapper;
pub mod optics;
pub mod outline;
pub mod points;
pub mod rays;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod surface;
pub mod viewport;

pub use config::{orientation_swap, RenderConfig, DEFAULT_RENDER_CONFIG, ORIENTATION_PAIRS};
pub use error::OpticsError;
pub use mapper::{clamp_coordinate, CoordinateMapper};
pub use optics::{compute_image, ElementKind, ImageResult, OpticalElement};
pub use outline::{display_name, ObjectOutline, OutlineCatalog, OutlinePoint};
pub use points::Point2D;
pub use rays::{
    classify, image_tip, trace_from_tip, trace_rays, AxisSide, Construction, PlacedObject, Ray,
    RayRegime, RayRole, RayStyle, Reach, StrokePattern,
};
pub use renderer::{MarchReport, PrimitiveRenderer};
pub use scene::{info_lines, FrameReport, SceneComposer};
pub use state::{SimulationState, HEIGHT_SCALE_RANGE};
pub use surface::{Color, DrawCommand, RecordingSurface, Surface, TextAlign, TextStyle};
pub use viewport::{OpticalBounds, Viewport};
