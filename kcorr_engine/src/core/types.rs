/// Numeric type used for all scatter calculations
pub type Number = f64;
pub type Vector2 = glam::DVec2;
pub type Vector3 = glam::DVec3;
