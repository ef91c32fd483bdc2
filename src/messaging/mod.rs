mod rep;
mod req;

pub use rep::RepSocket;
pub use req::ReqSocket;
