pub mod photo_file_reader;
pub mod photo_file_writer;
pub mod rgb_overlay_painter;
