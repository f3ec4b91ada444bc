pub mod file;
pub mod mirror;
pub mod templates;
pub mod traits;

pub use file::CsvJournalRepository;
pub use mirror::FileMirror;
pub use templates::FileTemplateRepository;
pub use traits::{JournalMirror, JournalRepository};
