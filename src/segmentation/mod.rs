pub mod background;
pub mod composite;
pub mod confidence;
pub mod config;
pub mod density;
pub mod downscale;
pub mod edges;
pub mod feather;
pub mod morphology;
pub mod organic;
pub mod pipeline;
pub mod region_growing;
pub mod source;
pub mod summed_area_table;
