mod rotate;
pub use rotate::{get_rotation_matrix2d, rotate_90, rotate_nearest, transform_point};
