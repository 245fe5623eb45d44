use crate::catalog::{Product, ProductDraft};

// String-backed field state shared by the add form and the edit window.
// Price keeps parseFloat semantics: trimmed leading number, otherwise NaN.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }

    pub fn parsed_price(&self) -> f64 {
        parse_price(&self.price)
    }

    pub fn price_is_numeric(&self) -> bool {
        !self.parsed_price().is_nan()
    }

    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            price: self.parsed_price(),
            description: self.description.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.price.is_empty()
            && self.description.is_empty()
            && self.category.is_empty()
            && self.image.is_empty()
    }
}

// parseFloat semantics: the longest numeric prefix wins, anything else is
// NaN. Unlike f64::from_str, alphabetic forms ("inf", "nan") do not count
// as numbers, so the scan stops at any character a decimal literal cannot
// contain and a prefix only qualifies once it holds a digit.
fn parse_price(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut end = 0;
    for (index, ch) in trimmed.char_indices() {
        if !matches!(ch, '0'..='9' | '.' | '+' | '-' | 'e' | 'E') {
            break;
        }
        let boundary = index + ch.len_utf8();
        let prefix = &trimmed[..boundary];
        if prefix.contains(|c: char| c.is_ascii_digit()) && prefix.parse::<f64>().is_ok() {
            end = boundary;
        }
    }
    if end == 0 {
        f64::NAN
    } else {
        trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_price, ProductForm};
    use crate::catalog::Product;

    #[test]
    fn numeric_price_string_parses_to_the_number() {
        let form = ProductForm {
            price: "19.99".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(form.parsed_price(), 19.99);
        assert!(form.price_is_numeric());
    }

    #[test]
    fn non_numeric_price_becomes_nan_and_still_builds_a_draft() {
        let form = ProductForm {
            title: "X".to_string(),
            price: "cheap".to_string(),
            ..ProductForm::default()
        };
        assert!(!form.price_is_numeric());
        let draft = form.draft();
        assert!(draft.price.is_nan());
        assert_eq!(draft.title, "X");
    }

    #[test]
    fn numeric_prefix_parses_like_parse_float() {
        assert_eq!(parse_price("12.5abc"), 12.5);
        assert_eq!(parse_price("  7 "), 7.0);
        assert_eq!(parse_price("-3.25"), -3.25);
        assert_eq!(parse_price(".5"), 0.5);
        assert_eq!(parse_price("1e3"), 1000.0);
        assert!(parse_price("").is_nan());
        assert!(parse_price("abc").is_nan());
    }

    #[test]
    fn alphabetic_float_forms_are_not_numbers() {
        assert!(parse_price("inf").is_nan());
        assert!(parse_price("infinity").is_nan());
        assert!(parse_price("-inf").is_nan());
        assert!(parse_price("nan").is_nan());
        assert!(parse_price("NaN").is_nan());
    }

    #[test]
    fn from_product_prefills_every_field() {
        let product = Product {
            id: 4,
            title: "Lamp".to_string(),
            price: 24.0,
            description: "desk lamp".to_string(),
            category: "home".to_string(),
            image: "https://img.example/4.png".to_string(),
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.title, "Lamp");
        assert_eq!(form.price, "24");
        assert_eq!(form.category, "home");
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut form = ProductForm {
            title: "X".to_string(),
            price: "5".to_string(),
            description: "d".to_string(),
            category: "c".to_string(),
            image: "u".to_string(),
        };
        form.reset();
        assert!(form.is_blank());
    }

    #[test]
    fn empty_string_fields_survive_into_the_draft() {
        let form = ProductForm {
            title: String::new(),
            price: "1".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(form.draft().title, "");
    }
}
