pub mod brdf;
pub mod renderer;
pub mod settings;
pub mod shading;
pub mod vertex;
