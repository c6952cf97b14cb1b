pub mod analysis;
pub mod error;
pub mod shop;
pub mod styleset;

// Re-export key types for easier usage
pub use analysis::{BlockAnalysisResult, BlockAnalyzer, NewBlockRecord, create_block};
pub use error::{AnalysisError, PersistError, VariableError};
pub use shop::{Shop, ShopDirectory, ShopId, ShopRef};
pub use styleset::{
    StylesetCompiler, StylesetDefinition, StylesetFactory, StylesetValidator, ValidationReport,
};
