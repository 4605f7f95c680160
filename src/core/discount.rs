use crate::core::Lab;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Discounts below this percentage are not applied at all.
pub const DISCOUNT_THRESHOLD: f64 = 20.0;

/// Returns the price after discount. The discount only applies from the
/// threshold upwards; below it the price is returned unchanged.
pub fn calculate_discount(price: f64, discount_percent: f64) -> f64 {
    if discount_percent >= DISCOUNT_THRESHOLD {
        price - price * (discount_percent / 100.0)
    } else {
        price
    }
}

pub struct DiscountLab {
    price: f64,
    percent: f64,
}

impl DiscountLab {
    pub fn new(price: f64, percent: f64) -> Self {
        Self { price, percent }
    }
}

#[async_trait]
impl Lab for DiscountLab {
    fn name(&self) -> &'static str {
        "discount"
    }

    async fn run(&self) -> Result<String> {
        let final_price = calculate_discount(self.price, self.percent);

        let summary = if self.percent >= DISCOUNT_THRESHOLD {
            format!("Discount applied! The final price is: ${:.2}", final_price)
        } else {
            format!("No discount was applied. The final price is: ${:.2}", final_price)
        };

        println!("{}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_applied_at_or_above_threshold() {
        assert_eq!(calculate_discount(100.0, 20.0), 80.0);
        assert_eq!(calculate_discount(100.0, 50.0), 50.0);
        assert_eq!(calculate_discount(200.0, 25.0), 150.0);
    }

    #[test]
    fn test_no_discount_below_threshold() {
        assert_eq!(calculate_discount(100.0, 19.99), 100.0);
        assert_eq!(calculate_discount(100.0, 0.0), 100.0);
        assert_eq!(calculate_discount(59.99, 10.0), 59.99);
    }

    #[test]
    fn test_formula_matches_definition() {
        // p >= 0, d >= 20  =>  final = p * (1 - d/100)
        for price in [0.0, 1.0, 19.99, 250.0] {
            for percent in [20.0, 33.0, 75.0, 100.0] {
                let expected = price * (1.0 - percent / 100.0);
                assert!((calculate_discount(price, percent) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_full_discount_is_free() {
        assert_eq!(calculate_discount(49.99, 100.0), 0.0);
    }

    #[tokio::test]
    async fn test_lab_summary_mentions_applied_discount() {
        let lab = DiscountLab::new(100.0, 30.0);
        let summary = lab.run().await.unwrap();
        assert!(summary.contains("Discount applied"));
        assert!(summary.contains("$70.00"));
    }

    #[tokio::test]
    async fn test_lab_summary_without_discount() {
        let lab = DiscountLab::new(100.0, 10.0);
        let summary = lab.run().await.unwrap();
        assert!(summary.contains("No discount"));
        assert!(summary.contains("$100.00"));
    }
}
