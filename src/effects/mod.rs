pub mod dither;
pub mod pixelate;
