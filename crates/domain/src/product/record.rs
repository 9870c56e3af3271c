use super::ProductId;
use crate::common::ValidationError;

// =============================================================================
// Product
// =============================================================================

/// A catalogued product.
///
/// `weight` is in grams, `value` in minor currency units; both are
/// non-negative and copied into orders at placement time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub value: i64,
    pub weight: i64,
    pub image: String,
}

impl Product {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        value: i64,
        weight: i64,
        image: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::empty_value("name"));
        }
        if value < 0 {
            return Err(ValidationError::out_of_range("value", 0, i64::MAX, value));
        }
        if weight < 0 {
            return Err(ValidationError::out_of_range("weight", 0, i64::MAX, weight));
        }
        Ok(Self {
            product_id,
            name,
            description: description.into(),
            value,
            weight,
            image: image.into(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn product_id() -> ProductId {
        ProductId::new(1).unwrap()
    }

    #[rstest]
    fn new_creates_product() {
        let product = Product::new(product_id(), "Kettle", "Electric kettle", 2500, 1200, "kettle.png")
            .unwrap();

        assert_eq!(product.name, "Kettle");
        assert_eq!(product.value, 2500);
        assert_eq!(product.weight, 1200);
    }

    #[rstest]
    fn new_rejects_empty_name() {
        assert!(Product::new(product_id(), "", "d", 1, 1, "i").is_err());
    }

    #[rstest]
    fn new_rejects_negative_value() {
        assert!(Product::new(product_id(), "n", "d", -1, 1, "i").is_err());
    }

    #[rstest]
    fn new_rejects_negative_weight() {
        assert!(Product::new(product_id(), "n", "d", 1, -1, "i").is_err());
    }
}
