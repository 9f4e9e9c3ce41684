mod convert;
mod gray;

pub use convert::{convert_color_space, to_gray_u8};
pub use gray::{gray_from_rgb, gray_from_rgb_u8, gray_from_rgba_u8, rgb_from_gray};
