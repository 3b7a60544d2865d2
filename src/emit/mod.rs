pub mod format;
pub mod generator;
pub mod templates;
pub mod writer;

pub use format::TypeFormatter;
pub use generator::ModuleGenerator;
pub use writer::ModuleWriter;
