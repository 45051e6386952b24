mod framer;
mod stream;

pub use framer::LineFramer;
pub use stream::DeviceStream;
