pub type Hours = f64;
pub type Degrees = f64;

pub fn deg_to_hours(deg: Degrees) -> Hours {
    deg / 15.
}

pub fn modulo(a: f64, m: f64) -> f64 {
    let r = a % m;
    if r < 0. {
        r + m
    } else {
        r
    }
}
