pub mod coe;
pub mod padding;
pub mod pixel_stream;
pub mod quality;
pub mod wiener;
