use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
}

impl ProductDraft {
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
        }
    }
}

// Session-scoped product state. The sequence order is display order; the
// active category narrows `visible()` without touching the sequence itself.
// All mutations resolve positions by product id at call time.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    active_category: Option<String>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn prepend(&mut self, product: Product) {
        self.products.insert(0, product);
    }

    pub fn update(&mut self, id: u64, draft: ProductDraft) -> Option<Product> {
        let slot = self
            .products
            .iter_mut()
            .find(|product| product.id == id)?;
        *slot = draft.into_product(id);
        Some(slot.clone())
    }

    pub fn remove(&mut self, id: u64) -> Option<Product> {
        let position = self
            .products
            .iter()
            .position(|product| product.id == id)?;
        Some(self.products.remove(position))
    }

    pub fn set_active_category(&mut self, category: String) {
        self.active_category = Some(category);
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn visible(&self) -> Vec<&Product> {
        match self.active_category.as_deref() {
            None => self.products.iter().collect(),
            Some(active) => self
                .products
                .iter()
                .filter(|product| product.category == active)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, Product, ProductDraft};

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            price: 10.0,
            description: format!("{title} description"),
            category: category.to_string(),
            image: format!("https://img.example/{id}.png"),
        }
    }

    fn loaded_catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.replace_all(vec![
            product(1, "Backpack", "bags"),
            product(2, "Monitor", "electronics"),
            product(3, "Keyboard", "electronics"),
        ]);
        catalog
    }

    #[test]
    fn replace_all_makes_every_product_visible() {
        let catalog = loaded_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.visible().len(), 3);
    }

    #[test]
    fn remove_drops_exactly_one_and_shifts_the_rest() {
        let mut catalog = loaded_catalog();
        let removed = catalog.remove(2).expect("product 2 should exist");
        assert_eq!(removed.title, "Monitor");
        assert_eq!(catalog.len(), 2);
        let titles: Vec<&str> = catalog
            .visible()
            .iter()
            .map(|product| product.title.as_str())
            .collect();
        assert_eq!(titles, ["Backpack", "Keyboard"]);
    }

    #[test]
    fn remove_unknown_id_leaves_catalog_untouched() {
        let mut catalog = loaded_catalog();
        assert!(catalog.remove(99).is_none());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn update_overwrites_fields_and_keeps_identity() {
        let mut catalog = loaded_catalog();
        let draft = ProductDraft {
            title: String::new(),
            price: 19.99,
            description: "flat".to_string(),
            category: "electronics".to_string(),
            image: "https://img.example/flat.png".to_string(),
        };
        let updated = catalog.update(2, draft).expect("product 2 should exist");
        assert_eq!(updated.id, 2);
        assert_eq!(updated.title, "");
        assert_eq!(updated.price, 19.99);
        assert_eq!(catalog.get(2).map(|p| p.price), Some(19.99));
    }

    #[test]
    fn active_category_filters_the_view_not_the_sequence() {
        let mut catalog = loaded_catalog();
        catalog.set_active_category("electronics".to_string());
        let visible = catalog.visible();
        assert_eq!(visible.len(), 2);
        assert!(visible
            .iter()
            .all(|product| product.category == "electronics"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn remove_resolves_by_id_even_while_filtered() {
        let mut catalog = loaded_catalog();
        catalog.set_active_category("electronics".to_string());
        catalog.remove(3).expect("product 3 should exist");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.visible().len(), 1);
        assert!(catalog.get(1).is_some());
    }

    #[test]
    fn prepend_puts_the_new_product_first() {
        let mut catalog = loaded_catalog();
        catalog.prepend(product(4, "Lamp", "home"));
        assert_eq!(catalog.visible()[0].title, "Lamp");
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn product_deserializes_ignoring_unknown_fields() {
        let raw = r#"{
            "id": 7,
            "title": "Hat",
            "price": 12.5,
            "description": "wool",
            "category": "clothing",
            "image": "https://img.example/7.png",
            "rating": { "rate": 4.1, "count": 130 }
        }"#;
        let parsed: Product = serde_json::from_str(raw).expect("product json should parse");
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.price, 12.5);
    }
}
