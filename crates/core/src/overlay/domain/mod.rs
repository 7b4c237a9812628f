pub mod display_geometry;
pub mod overlay_instruction;
pub mod overlay_mapper;
pub mod overlay_painter;
pub mod text_measurer;
