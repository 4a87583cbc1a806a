pub mod sharpness;
