#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use pixfilter_image as image;

#[doc(inline)]
pub use pixfilter_imgproc as imgproc;

#[doc(inline)]
pub use pixfilter_io as io;
