pub mod category_ops;
pub mod ids;
pub mod reducer;
pub mod task_ops;

pub use ids::IdGenerator;
pub use reducer::{Action, reduce};
