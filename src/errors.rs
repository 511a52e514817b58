use thiserror::Error;

use crate::dictionary::DictType;

/// All possible failure paths of the lookup pipeline.
///
/// "No results" is never an error; every variant here is a contract
/// violation that callers should surface loudly instead of treating as an
/// empty lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("dictionary `{dict_name}` ({dict_type:?}) holds a `{family}` record, which the {stage} stage cannot handle")]
    SchemaMismatch {
        dict_name: String,
        dict_type: DictType,
        family: &'static str,
        stage: &'static str,
    },
}
