//! interp-i18n
//!
//! JSON 翻訳テーブルに対するキー解決とプレースホルダー展開
//!
//! ```
//! use std::sync::Arc;
//!
//! use interp_i18n::{TranslateOptions, TranslationTable, Translator};
//! use serde_json::json;
//!
//! let table = TranslationTable::new(
//!     json!({"cart_1": "One item", "cart_other": "{n, number(de-DE)} items"}),
//!     "{key}",
//! );
//! let translator = Translator::from_table(Arc::new(table), "en", None);
//!
//! let text = translator.t("cart", TranslateOptions::new().count(1234).value("n", 1234)).unwrap();
//! assert_eq!(text.as_text(), Some("1.234 items"));
//! ```

pub mod config;
pub mod format;
pub mod resolver;
pub mod template;
pub mod values;

// よく使う型を再エクスポート
pub use resolver::{
    TranslateOptions,
    Translation,
    TranslationTable,
    Translations,
    Translator,
};
pub use template::{
    TemplateError,
    TransformRegistry,
    expand,
};
pub use values::{
    SubstitutionValue,
    Values,
};
