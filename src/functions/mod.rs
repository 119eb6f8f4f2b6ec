pub mod primitives;
pub mod registry;
pub mod traits;

pub use registry::{FunctionRegistry, DEFAULT_FUNCTIONS};
pub use traits::{CustomPrimitive, Function, Primitive};
