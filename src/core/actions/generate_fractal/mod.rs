pub mod generate_fractal_rayon;
pub mod ports;
