pub mod report;
pub mod response;

pub use report::*;
pub use response::*;
