
pub mod aabb;
pub mod frame;
pub mod scene;
pub mod session;
pub mod replay;
pub mod numeric;
pub mod json_parser;

pub mod prelude;
