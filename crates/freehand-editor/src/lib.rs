pub mod input;
pub mod palette;
pub mod renderer;
pub mod session;

pub use input::{InputEvent, PointerButton, StrokeAction, surface_point};
pub use palette::Palette;
pub use renderer::StrokeRenderer;
pub use session::DrawingSession;
