mod deadline;
mod logging;

pub use deadline::deadline_middleware;
pub use logging::logging_middleware;
