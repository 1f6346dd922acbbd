use crate::constants::DISCOUNT_RATE;
use crate::models::geo::round_centavos;
use crate::models::DiscountCategory;

/// Result of applying the discount policy to one base fare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountedFare {
    pub base: f64,
    pub final_fare: f64,
    pub applied: bool,
}

/// Flat statutory reduction for students, seniors and PWDs.
pub struct DiscountPolicy;

impl DiscountPolicy {
    /// Apply the system-wide 20% reduction when `category` is active.
    /// Zero fares (walk legs) are never counted as discounted.
    pub fn apply(base: f64, category: DiscountCategory) -> DiscountedFare {
        let base = round_centavos(base);
        if category.is_active() && base > 0.0 {
            DiscountedFare {
                base,
                final_fare: round_centavos(base * (1.0 - DISCOUNT_RATE)),
                applied: true,
            }
        } else {
            DiscountedFare {
                base,
                final_fare: base,
                applied: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_category_keeps_base_fare() {
        let fare = DiscountPolicy::apply(56.0, DiscountCategory::None);
        assert_eq!(fare.final_fare, 56.0);
        assert!(!fare.applied);
    }

    #[test]
    fn every_active_category_takes_twenty_percent() {
        for category in [
            DiscountCategory::Student,
            DiscountCategory::Senior,
            DiscountCategory::Pwd,
        ] {
            let fare = DiscountPolicy::apply(56.0, category);
            assert_eq!(fare.final_fare, 44.8, "category={category}");
            assert!(fare.applied);
        }
    }

    #[test]
    fn discounted_fare_is_rounded_to_centavos() {
        for base in [12.0, 13.75, 15.0, 25.0, 40.0, 57.6, 99.99] {
            let fare = DiscountPolicy::apply(base, DiscountCategory::Student);
            assert_eq!(fare.final_fare, round_centavos(base * 0.80), "base={base}");
        }
    }

    #[test]
    fn zero_fare_is_not_discounted() {
        let fare = DiscountPolicy::apply(0.0, DiscountCategory::Senior);
        assert_eq!(fare.final_fare, 0.0);
        assert!(!fare.applied);
    }
}
