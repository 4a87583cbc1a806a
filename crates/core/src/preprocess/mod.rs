pub mod frame_normalizer;
pub mod still_loader;
