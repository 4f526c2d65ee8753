//! WASM bindings for Blifparser.
//!
//! This module provides JavaScript-friendly bindings for linting BLIF text
//! in web editors.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmBlifLinter } from 'blifparser';
//!
//! await init();
//!
//! const linter = new WasmBlifLinter(`
//!   .model and2
//!   .inputs a b
//!   .outputs c
//!   .names a b c
//!   11 1
//!   .end
//! `);
//!
//! for (const problem of linter.problems()) {
//!   console.warn(problem);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::document::{Blif, Keyword};
use crate::error::BlifError;
use crate::parser;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A parsed BLIF document exposed to JavaScript.
#[wasm_bindgen]
pub struct WasmBlifLinter {
    blif: Blif,
}

#[wasm_bindgen]
impl WasmBlifLinter {
    /// Parse BLIF source text.
    ///
    /// Parsing never fails; problems are collected on the returned object.
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str) -> WasmBlifLinter {
        WasmBlifLinter {
            blif: parser::parse_str(source),
        }
    }

    /// All diagnostics, in the order they were found.
    #[wasm_bindgen]
    pub fn problems(&self) -> Vec<String> {
        self.blif.problems.clone()
    }

    /// Non-fatal notes, such as latches without an initial value.
    #[wasm_bindgen]
    pub fn warnings(&self) -> Vec<String> {
        self.blif.warnings()
    }

    /// Number of diagnostics.
    #[wasm_bindgen(getter)]
    pub fn problem_count(&self) -> usize {
        self.blif.problems.len()
    }

    /// Name of the declared model, if any.
    #[wasm_bindgen(getter)]
    pub fn model_name(&self) -> Option<String> {
        self.blif.model_name().map(str::to_string)
    }

    /// Occurrences of a keyword such as `".names"`.
    ///
    /// # Returns
    /// The count, or an error for an unrecognized keyword.
    #[wasm_bindgen]
    pub fn keyword_count(&self, keyword: &str) -> Result<usize, JsValue> {
        let kw = keyword.parse::<Keyword>().map_err(|_| {
            let err = BlifError::WasmError {
                message: format!("unknown keyword '{}'", keyword),
            };
            JsValue::from_str(&err.to_string())
        })?;
        Ok(self.blif.keyword_count(kw))
    }

    /// Canonical re-serialization of the document.
    #[wasm_bindgen]
    pub fn render(&self) -> String {
        self.blif.to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
