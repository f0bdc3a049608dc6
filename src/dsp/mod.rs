pub mod fft;
pub mod line;
pub mod window;
pub mod zoom;
