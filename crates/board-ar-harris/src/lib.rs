//! Harris corner response from first principles.
//!
//! The pipeline follows the classic formulation: Sobel gradients, a
//! Gaussian-windowed structure tensor, the response
//! `R = det(M) - k * trace(M)^2` clamped below at zero, 3x3
//! non-maximum suppression and a threshold relative to the strongest
//! response.
//!
//! ```
//! use board_ar_core::GrayImage;
//! use board_ar_harris::{harris_corners, HarrisParams};
//!
//! let img = GrayImage::new(32, 32);
//! let corners = harris_corners(&img.view(), &HarrisParams::default());
//! assert!(corners.is_empty());
//! ```

mod convolve;
mod gradient;
mod map;
mod response;

pub use convolve::{convolve_separable, gaussian_kernel_1d};
pub use gradient::{sobel_x, sobel_y, sobel_xy};
pub use map::FloatMap;
pub use response::{
    corners_from_response, harris_corners, harris_response, HarrisCorner, HarrisParams,
};
