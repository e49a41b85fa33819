//! Key resolution: plural/context candidates, table lookup and
//! missing-translation rendering, plus table loading.

mod loader;
mod options;
mod plural;
mod table;
mod translator;

pub use loader::{
    JsonFileLoader,
    LoadError,
    MemoryLoader,
    TableCache,
    TableLoader,
    Translations,
};
pub use options::{
    TranslateOptions,
    Translation,
    TranslationKeys,
};
pub use plural::{
    OTHER_SUFFIX,
    PluralCategory,
    candidate_keys,
    candidate_suffixes,
};
pub use table::{
    DEFAULT_MISSING_TRANSLATION,
    Lookup,
    TranslationTable,
    template_text,
};
pub use translator::Translator;
