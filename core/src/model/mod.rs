pub mod stats;
pub mod template;
pub mod trip;
