mod go;

pub use go::{GoGenerator, ENTRY_POINT, FMT_IMPORT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Name written in the `package` clause.
    pub package: String,
    /// One level of indentation.
    pub indent: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package: "main".into(),
            indent: "\t".into(),
        }
    }
}
