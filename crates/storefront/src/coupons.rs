//! Coupon policy.
//!
//! The cart store accepts any code with a caller-supplied discount; deciding
//! what a code is worth happens here, at the edge.

use falcon_core::Price;

/// Code granting [`SAVE10_PERCENT`] off the subtotal (case-insensitive).
pub const SAVE10_CODE: &str = "save10";

/// Percentage taken off by [`SAVE10_CODE`].
pub const SAVE10_PERCENT: u32 = 10;

/// Flat discount a code is worth against the given subtotal.
///
/// Unknown codes are worth nothing but are still recorded on the cart.
#[must_use]
pub fn discount_for(code: &str, subtotal: Price) -> Price {
    if code.trim().eq_ignore_ascii_case(SAVE10_CODE) {
        subtotal.percent(SAVE10_PERCENT)
    } else {
        Price::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save10_is_ten_percent() {
        assert_eq!(
            discount_for("SAVE10", Price::from_major(300)),
            Price::from_major(30)
        );
        assert_eq!(
            discount_for("save10", Price::from_major(300)),
            Price::from_major(30)
        );
    }

    #[test]
    fn test_unknown_code_is_worth_nothing() {
        assert_eq!(discount_for("FREESTUFF", Price::from_major(300)), Price::ZERO);
    }

    #[test]
    fn test_discount_tracks_subtotal_at_apply_time() {
        assert_eq!(discount_for("SAVE10", Price::ZERO), Price::ZERO);
    }
}
