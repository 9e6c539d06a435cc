pub mod result;
pub mod util;

pub use result::ScenarioResult;
pub use util::{run_stamp, split_csv};
