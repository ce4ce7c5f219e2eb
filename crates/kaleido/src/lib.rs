#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use kaleido_image as image;

#[doc(inline)]
pub use kaleido_imgproc as imgproc;

#[doc(inline)]
pub use kaleido_io as io;
