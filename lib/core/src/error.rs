//! Error handling foundation for parakeet.
//!
//! Only the `Result` alias lives here. Each crate defines its own
//! domain-specific error enums in its own error module, attaching
//! layer-appropriate context with rootcause's `.context()` as errors
//! propagate upward.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_alias_holds_values() {
        let ok: Result<&str> = Ok("fine");
        assert_eq!(ok.expect("should be ok"), "fine");
    }
}
